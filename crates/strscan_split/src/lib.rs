//! Quote-aware single- and two-level string splitting.
//!
//! Three families, all driven by one left-to-right scan shape:
//!
//! - **single-level** ([`split`], [`split_ex`], [`SplitIter`]): separator
//!   hits end segments; the cursor-driven [`SplitIter`] enumerator is the
//!   lazy, single-pass variant built on
//!   [`StringReader`](strscan_reader::StringReader).
//! - **quote-aware** ([`split_quoted`], [`split_quoted_ex`]): separators
//!   inside a configured quote pair are literal content; an unterminated
//!   quote at end-of-input is the family's only hard parse failure.
//! - **two-level** ([`double_split`]): a primary separator delimits
//!   groups, a secondary separator delimits entries within a group, both
//!   respecting the same quote rules.
//!
//! Separator specification is a single polymorphic parameter
//! ([`SeparatorSpec`]: one char, a ranked char set, or a predicate)
//! rather than per-representation function variants.

mod double;
mod error;
mod options;
mod quoted;
mod separator;
mod single;
mod split_result;

pub use double::double_split;
pub use error::SplitError;
pub use options::{DoubleSplitOptions, QuotedSplitOptions, SplitOptions};
pub use quoted::{split_quoted, split_quoted_ex};
pub use separator::{QuotePairs, SeparatorSpec};
pub use single::{split, split_ex, SplitIter};
pub use split_result::{DoubleSplitResult, Separator, SplitResult};
