//! Separator and quote-pair specifications.

use crate::error::SplitError;

/// Polymorphic separator specification: one character, a ranked
/// character set, or a predicate.
///
/// For [`AnyOf`](Self::AnyOf) the position in the slice is the
/// separator's identifying index, reported back through
/// [`SplitResult::separator_index`](crate::SplitResult::separator_index)
/// when callers need to know which candidate fired.
#[derive(Clone, Copy, Debug)]
pub enum SeparatorSpec<'s> {
    /// A single separator character.
    Char(char),
    /// Any character from a ranked candidate list.
    AnyOf(&'s [char]),
    /// Any character satisfying the predicate.
    Pred(fn(char) -> bool),
}

impl SeparatorSpec<'_> {
    /// Identifying index of `c` within the candidate set, or `None`
    /// when `c` is not a separator.
    #[inline]
    pub fn matches(&self, c: char) -> Option<usize> {
        match *self {
            Self::Char(sep) => (c == sep).then_some(0),
            Self::AnyOf(set) => set.iter().position(|&s| s == c),
            Self::Pred(pred) => pred(c).then_some(0),
        }
    }
}

/// Ordered list of (left, right) quote-delimiter pairs.
///
/// While the scan is inside an open pair, separator characters and the
/// delimiters of *other* pairs are literal content. A pair with
/// `left != right` nests via a depth counter (another `left` deepens,
/// each `right` closes one level); a pair with `left == right` closes at
/// the first further occurrence.
#[derive(Clone, Debug)]
pub struct QuotePairs {
    left: Vec<char>,
    right: Vec<char>,
}

impl QuotePairs {
    /// Build from parallel left/right delimiter lists.
    ///
    /// Fails when the lists differ in length (each left delimiter needs
    /// its right counterpart at the same index).
    pub fn new(left: &[char], right: &[char]) -> Result<Self, SplitError> {
        if left.len() != right.len() {
            return Err(SplitError::MismatchedQuoteConfig {
                left_len: left.len(),
                right_len: right.len(),
            });
        }
        Ok(Self {
            left: left.to_vec(),
            right: right.to_vec(),
        })
    }

    /// Single-pair convenience constructor.
    pub fn pair(left: char, right: char) -> Self {
        Self {
            left: vec![left],
            right: vec![right],
        }
    }

    /// Index of the pair whose left delimiter is `c`, if any.
    #[inline]
    pub(crate) fn opening(&self, c: char) -> Option<usize> {
        self.left.iter().position(|&l| l == c)
    }

    /// Right delimiter of the pair at `index`.
    ///
    /// # Contract
    ///
    /// `index` comes from [`opening`](Self::opening), so it is in range.
    #[inline]
    pub(crate) fn closing(&self, index: usize) -> char {
        self.right[index]
    }
}
