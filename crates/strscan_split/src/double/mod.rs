//! Two-level ("double") split.
//!
//! One pass over the text, classifying each separator match: a primary
//! hit closes the in-progress group and emits it as one
//! [`DoubleSplitResult`]; a secondary hit closes the in-progress entry
//! within the group. Both respect the same quote rules as the
//! quote-aware family. A character matching both specs counts as
//! primary.
//!
//! The final group at end-of-input (no trailing primary separator) is
//! always produced, subject to `remove_empty_groups`.

use crate::error::SplitError;
use crate::options::DoubleSplitOptions;
use crate::quoted::{consume_quoted, flush_segment};
use crate::separator::{QuotePairs, SeparatorSpec};
use crate::split_result::{DoubleSplitResult, Separator, SplitResult};

/// Split `text` into groups of entries in one pass: `primary` delimits
/// groups, `secondary` delimits entries within a group.
///
/// With `quotes`, separators inside an open quote pair are literal
/// content, exactly as in
/// [`split_quoted`](crate::split_quoted).
pub fn double_split<'a>(
    text: &'a str,
    primary: &SeparatorSpec<'_>,
    secondary: &SeparatorSpec<'_>,
    quotes: Option<&QuotePairs>,
    opts: &DoubleSplitOptions,
) -> Result<Vec<DoubleSplitResult<'a>>, SplitError> {
    let mut out = Vec::new();
    let mut group: Vec<SplitResult<'a>> = Vec::new();
    let mut acc = String::new();
    let mut iter = text.char_indices();
    while let Some((i, c)) = iter.next() {
        let opening = quotes.and_then(|q| q.opening(c).map(|qi| (q, qi)));
        if let Some((q, qi)) = opening {
            consume_quoted(&mut iter, c, i, q.closing(qi), opts.keep_quotes, &mut acc)?;
        } else if let Some(pi) = primary.matches(c) {
            flush_segment(&mut group, &mut acc, None, opts.trim, opts.remove_empty);
            close_group(&mut out, &mut group, Some((c, pi)), opts.remove_empty_groups);
        } else if let Some(si) = secondary.matches(c) {
            flush_segment(&mut group, &mut acc, Some((c, si)), opts.trim, opts.remove_empty);
        } else {
            acc.push(c);
        }
    }
    flush_segment(&mut group, &mut acc, None, opts.trim, opts.remove_empty);
    close_group(&mut out, &mut group, None, opts.remove_empty_groups);
    Ok(out)
}

/// Emit the in-progress group, keyed by the primary separator that
/// closed it (`None` for the final group at end-of-input).
fn close_group<'a>(
    out: &mut Vec<DoubleSplitResult<'a>>,
    group: &mut Vec<SplitResult<'a>>,
    term: Option<(char, usize)>,
    remove_empty_groups: bool,
) {
    let entries = std::mem::take(group);
    if remove_empty_groups && entries.is_empty() {
        return;
    }
    let (separator, separator_index) = match term {
        Some((c, idx)) => (Separator::Char(c), Some(idx)),
        None => (Separator::None, None),
    };
    out.push(DoubleSplitResult {
        entries,
        separator,
        separator_index,
    });
}
