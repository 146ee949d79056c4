//! Produced-token records.

use std::borrow::Cow;

/// The separator that terminated a segment.
///
/// A tagged variant rather than an untyped char-or-string field: the
/// built-in families emit [`Char`](Separator::Char); [`Str`](Separator::Str)
/// exists for callers composing multi-character separators on top of the
/// primitives; [`None`](Separator::None) marks the end-of-input segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Separator {
    /// End-of-input: no separator terminated the segment.
    #[default]
    None,
    /// Single-character separator.
    Char(char),
    /// Multi-character separator.
    Str(String),
}

/// One produced token: the captured text, the separator that ended it,
/// and that separator's identifying index within the candidate set
/// (position in a [`SeparatorSpec::AnyOf`](crate::SeparatorSpec::AnyOf)
/// list; `0` for single-char and predicate separators; `None` at
/// end-of-input).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitResult<'a> {
    /// Captured text span. Borrowed from the input where the segment is
    /// contiguous; owned where quote stripping or escape collapsing made
    /// it non-contiguous.
    pub text: Cow<'a, str>,
    /// Separator that terminated this segment.
    pub separator: Separator,
    /// Identifying index of the separator within the candidate set.
    pub separator_index: Option<usize>,
}

/// One group ("row") from a two-level split: the entries produced
/// between two consecutive primary-separator matches, plus the primary
/// separator that closed the group.
///
/// The last entry inside a group carries [`Separator::None`]: it was
/// ended by the group's primary separator (recorded here), not by a
/// secondary one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleSplitResult<'a> {
    /// Entries delimited by the secondary separator.
    pub entries: Vec<SplitResult<'a>>,
    /// Primary separator that closed this group.
    pub separator: Separator,
    /// Identifying index of the primary separator.
    pub separator_index: Option<usize>,
}
