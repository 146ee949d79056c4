//! Split-family errors.
//!
//! Only three conditions are hard errors: an invalid `start`/`len`
//! window, a malformed quote configuration, and an unterminated quoted
//! region at end-of-input. Everything else ("separator not found",
//! empty segments) degrades gracefully into the produced sequence.

use thiserror::Error;

/// Errors raised by the split families.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// `start`/`len` window outside the text.
    #[error("window of length {len} at {start} out of bounds for text of length {text_len}")]
    Range {
        start: usize,
        len: usize,
        text_len: usize,
    },

    /// Window edge splits a multi-byte UTF-8 character.
    #[error("byte offset {offset} is not a character boundary")]
    NotCharBoundary { offset: usize },

    /// Left and right quote-delimiter lists differ in length.
    #[error("left and right quote lists differ in length ({left_len} vs {right_len})")]
    MismatchedQuoteConfig { left_len: usize, right_len: usize },

    /// End-of-input reached while a quoted region was still open.
    #[error("unterminated quote: `{open}` at byte {pos} has no matching `{close}`")]
    UnterminatedQuote { open: char, close: char, pos: usize },
}
