//! Configuration structs for the split families.
//!
//! One struct per family instead of per-flag function variants; all
//! flags combine independently and default to off.

/// Configuration for the single-level family ([`split`](crate::split),
/// [`split_ex`](crate::split_ex), [`SplitIter`](crate::SplitIter)).
#[derive(Clone, Copy, Debug, Default)]
pub struct SplitOptions {
    /// Trim whitespace from both ends of each segment.
    pub trim: bool,
    /// Drop segments that are empty (after trimming).
    pub remove_empty: bool,
    /// Include the terminating separator character in each segment.
    pub keep_separator: bool,
    /// Byte offset where the scan starts.
    pub start: usize,
    /// Byte length of the scanned range (`None` = to end of text).
    /// Ignored by [`SplitIter`](crate::SplitIter), whose range is the
    /// reader's window.
    pub len: Option<usize>,
}

/// Configuration for the quote-aware family
/// ([`split_quoted`](crate::split_quoted),
/// [`split_quoted_ex`](crate::split_quoted_ex)).
#[derive(Clone, Copy, Debug, Default)]
pub struct QuotedSplitOptions {
    /// Trim whitespace from both ends of each segment.
    pub trim: bool,
    /// Drop segments that are empty (after trimming).
    pub remove_empty: bool,
    /// Include the terminating separator character in each segment.
    pub keep_separator: bool,
    /// Copy quote delimiters into the segment text.
    pub keep_quotes: bool,
    /// Byte offset where the scan starts.
    pub start: usize,
    /// Byte length of the scanned range (`None` = to end of text).
    pub len: Option<usize>,
}

/// Configuration for the two-level family
/// ([`double_split`](crate::double_split)).
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleSplitOptions {
    /// Trim whitespace from both ends of each entry.
    pub trim: bool,
    /// Drop entries that are empty (after trimming).
    pub remove_empty: bool,
    /// Drop groups left without entries.
    pub remove_empty_groups: bool,
    /// Copy quote delimiters into the entry text.
    pub keep_quotes: bool,
}
