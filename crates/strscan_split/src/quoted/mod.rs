//! Quote-aware split family.
//!
//! Extends the single-level scan with one piece of state: the open
//! quote. While a configured pair is open, separator characters and the
//! delimiters of other pairs are copied into the current segment as
//! literal content. End-of-input with a quote still open is the
//! family's only hard parse failure.
//!
//! Segments here are accumulated into an owned buffer: with
//! `keep_quotes` off, stripping the delimiters makes a segment like
//! `ab{x,y}cd` non-contiguous in the input.

use std::borrow::Cow;
use std::str::CharIndices;

use crate::error::SplitError;
use crate::options::QuotedSplitOptions;
use crate::separator::{QuotePairs, SeparatorSpec};
use crate::single::scan_window;
use crate::split_result::{Separator, SplitResult};

/// Split `text` on `sep`, treating separators inside `quotes` as
/// literal content.
pub fn split_quoted<'a>(
    text: &'a str,
    sep: &SeparatorSpec<'_>,
    quotes: &QuotePairs,
    opts: &QuotedSplitOptions,
) -> Result<Vec<Cow<'a, str>>, SplitError> {
    Ok(split_quoted_ex(text, sep, quotes, opts)?
        .into_iter()
        .map(|r| r.text)
        .collect())
}

/// Quote-aware split, additionally reporting per segment the separator
/// that terminated it and that separator's identifying index.
pub fn split_quoted_ex<'a>(
    text: &'a str,
    sep: &SeparatorSpec<'_>,
    quotes: &QuotePairs,
    opts: &QuotedSplitOptions,
) -> Result<Vec<SplitResult<'a>>, SplitError> {
    let w = scan_window(text, opts.start, opts.len)?;
    let mut out = Vec::new();
    let mut acc = String::new();
    let mut iter = w.char_indices();
    while let Some((i, c)) = iter.next() {
        if let Some(qi) = quotes.opening(c) {
            consume_quoted(
                &mut iter,
                c,
                opts.start + i,
                quotes.closing(qi),
                opts.keep_quotes,
                &mut acc,
            )?;
        } else if let Some(idx) = sep.matches(c) {
            if opts.keep_separator {
                acc.push(c);
            }
            flush_segment(&mut out, &mut acc, Some((c, idx)), opts.trim, opts.remove_empty);
        } else {
            acc.push(c);
        }
    }
    flush_segment(&mut out, &mut acc, None, opts.trim, opts.remove_empty);
    Ok(out)
}

/// Consume a quoted run after its opening delimiter has been read.
///
/// `keep_quotes` controls only the outermost pair's delimiters; nested
/// same-pair delimiters are content either way. A pair with
/// `open != close` nests via a depth counter; `open == close` closes at
/// the first further occurrence.
pub(crate) fn consume_quoted(
    iter: &mut CharIndices<'_>,
    open: char,
    open_pos: usize,
    close: char,
    keep_quotes: bool,
    acc: &mut String,
) -> Result<(), SplitError> {
    if keep_quotes {
        acc.push(open);
    }
    let nesting = open != close;
    let mut depth = 1u32;
    for (_, qc) in iter.by_ref() {
        if qc == close {
            depth -= 1;
            if depth == 0 {
                if keep_quotes {
                    acc.push(qc);
                }
                return Ok(());
            }
            acc.push(qc);
        } else if nesting && qc == open {
            depth += 1;
            acc.push(qc);
        } else {
            acc.push(qc);
        }
    }
    Err(SplitError::UnterminatedQuote {
        open,
        close,
        pos: open_pos,
    })
}

/// Take the accumulated segment, post-process, and append it.
pub(crate) fn flush_segment<'a>(
    out: &mut Vec<SplitResult<'a>>,
    acc: &mut String,
    term: Option<(char, usize)>,
    trim: bool,
    remove_empty: bool,
) {
    let mut text = std::mem::take(acc);
    if trim && text.trim().len() != text.len() {
        text = text.trim().to_owned();
    }
    if remove_empty && text.is_empty() {
        return;
    }
    let (separator, separator_index) = match term {
        Some((c, idx)) => (Separator::Char(c), Some(idx)),
        None => (Separator::None, None),
    };
    out.push(SplitResult {
        text: Cow::Owned(text),
        separator,
        separator_index,
    });
}
