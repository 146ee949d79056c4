//! Cursor-based string reader for hand-written lexers.
//!
//! [`StringReader`] is a `Copy` cursor over a borrowed `&str`, exposing a
//! half-open `[pos, end)` reading window. Forward reads move `pos` up,
//! reverse reads move `end` down, and the window invariant
//! `start <= pos <= end <= text.len()` holds after every operation.
//!
//! Probe-style operations (`read_if_eq`, `read_unsigned_integer`,
//! `read_identifier`, ...) never fail: absence of the expected token is a
//! normal outcome reported via `bool` or `Option`. Hard errors
//! ([`ReaderError`]) are reserved for out-of-range construction and
//! explicit `substring`/`char_at` access.

mod error;
mod reader;

pub use error::ReaderError;
pub use reader::{IdentifierOptions, NumberOptions, ReadUntilOptions, StringReader};
