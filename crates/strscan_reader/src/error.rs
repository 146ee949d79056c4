//! Hard errors for reader construction and indexed access.
//!
//! Only range-style violations surface as `Err`: invalid start/length
//! combinations on construction, and out-of-window or off-boundary
//! offsets on `substring`/`char_at`. Probe-style read failures are not
//! errors and never appear here.

use thiserror::Error;

/// Range and boundary violations raised by [`StringReader`](crate::StringReader).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ReaderError {
    /// Start index past the end of the backing text.
    #[error("start index {start} out of range for text of length {text_len}")]
    StartOutOfRange { start: u32, text_len: u32 },

    /// `start + len` past the end of the backing text.
    #[error("window of length {window_len} at {start} exceeds text length {text_len}")]
    WindowOutOfRange {
        start: u32,
        window_len: u32,
        text_len: u32,
    },

    /// Indexed access outside the current `[pos, end)` window.
    #[error("offset {offset} out of range for window of length {window_len}")]
    OffsetOutOfRange { offset: u32, window_len: u32 },

    /// Byte offset splits a multi-byte UTF-8 character.
    #[error("byte offset {offset} is not a character boundary")]
    NotCharBoundary { offset: u32 },
}
