//! Single-level split family.
//!
//! One parameterized left-to-right scan serves every separator
//! representation: a segment-start index advances through the range, and
//! each separator hit (or the end of the range) emits the segment
//! `[segment_start, i)`. Emission order is stable left-to-right; the
//! segment at end-of-input is always emitted — even empty — unless
//! `remove_empty` suppresses it.
//!
//! [`SplitIter`] is the lazy, cursor-driven variant of the same scan:
//! single-pass, forward-only, driving a [`StringReader`] over its
//! current window.

use std::borrow::Cow;

use strscan_reader::StringReader;

use crate::error::SplitError;
use crate::options::SplitOptions;
use crate::separator::SeparatorSpec;
use crate::split_result::{Separator, SplitResult};

/// Validate and slice the `[start, start + len)` scan range.
pub(crate) fn scan_window(
    text: &str,
    start: usize,
    len: Option<usize>,
) -> Result<&str, SplitError> {
    let text_len = text.len();
    if start > text_len {
        return Err(SplitError::Range {
            start,
            len: len.unwrap_or(0),
            text_len,
        });
    }
    let end = match len {
        Some(l) => start
            .checked_add(l)
            .filter(|&e| e <= text_len)
            .ok_or(SplitError::Range {
                start,
                len: l,
                text_len,
            })?,
        None => text_len,
    };
    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(SplitError::NotCharBoundary { offset });
        }
    }
    Ok(&text[start..end])
}

/// Split `text` into substrings on `sep`.
///
/// Zero-copy: every returned segment borrows from `text`.
pub fn split<'a>(
    text: &'a str,
    sep: &SeparatorSpec<'_>,
    opts: &SplitOptions,
) -> Result<Vec<Cow<'a, str>>, SplitError> {
    Ok(split_ex(text, sep, opts)?.into_iter().map(|r| r.text).collect())
}

/// Split `text`, additionally reporting per segment the separator that
/// terminated it and that separator's identifying index.
pub fn split_ex<'a>(
    text: &'a str,
    sep: &SeparatorSpec<'_>,
    opts: &SplitOptions,
) -> Result<Vec<SplitResult<'a>>, SplitError> {
    let w = scan_window(text, opts.start, opts.len)?;
    let mut out = Vec::new();
    let mut seg_start = 0usize;
    for (i, c) in w.char_indices() {
        if let Some(idx) = sep.matches(c) {
            let seg_end = if opts.keep_separator {
                i + c.len_utf8()
            } else {
                i
            };
            emit(&mut out, &w[seg_start..seg_end], Some((c, idx)), opts);
            seg_start = i + c.len_utf8();
        }
    }
    emit(&mut out, &w[seg_start..], None, opts);
    Ok(out)
}

/// Post-process and append one segment: trim, then drop if empty.
fn emit<'a>(
    out: &mut Vec<SplitResult<'a>>,
    seg: &'a str,
    term: Option<(char, usize)>,
    opts: &SplitOptions,
) {
    let seg = if opts.trim { seg.trim() } else { seg };
    if opts.remove_empty && seg.is_empty() {
        return;
    }
    let (separator, separator_index) = match term {
        Some((c, idx)) => (Separator::Char(c), Some(idx)),
        None => (Separator::None, None),
    };
    out.push(SplitResult {
        text: Cow::Borrowed(seg),
        separator,
        separator_index,
    });
}

/// Lazy, cursor-driven split enumerator.
///
/// Scans the reader's current `[pos, end)` window; single-pass and not
/// restartable once partially consumed (snapshot the reader first for a
/// second scan — it is `Copy`). The `start`/`len` fields of the options
/// are ignored: the range is the reader's window.
#[derive(Debug)]
pub struct SplitIter<'a, 's> {
    reader: StringReader<'a>,
    sep: SeparatorSpec<'s>,
    opts: SplitOptions,
    done: bool,
}

impl<'a, 's> SplitIter<'a, 's> {
    /// Start a scan over the reader's remaining window.
    pub fn new(reader: StringReader<'a>, sep: SeparatorSpec<'s>, opts: SplitOptions) -> Self {
        Self {
            reader,
            sep,
            opts,
            done: false,
        }
    }
}

impl<'a> Iterator for SplitIter<'a, '_> {
    type Item = SplitResult<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            let sep = self.sep;
            let seg = self.reader.read_while(|c| sep.matches(c).is_none());
            let term = self.reader.read_char();
            if term.is_none() {
                // Final segment: emitted (even empty), then the iterator
                // is exhausted.
                self.done = true;
            }
            let text: Cow<'a, str> = match term {
                Some(c) if self.opts.keep_separator => {
                    let mut s = String::with_capacity(seg.len() + c.len_utf8());
                    s.push_str(seg);
                    s.push(c);
                    Cow::Owned(s)
                }
                _ => Cow::Borrowed(seg),
            };
            let text = if self.opts.trim { trim_cow(text) } else { text };
            if self.opts.remove_empty && text.is_empty() {
                continue;
            }
            let (separator, separator_index) = match term {
                Some(c) => (Separator::Char(c), sep.matches(c)),
                None => (Separator::None, None),
            };
            return Some(SplitResult {
                text,
                separator,
                separator_index,
            });
        }
    }
}

/// Trim a segment in place, keeping the borrow where nothing changed.
fn trim_cow(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => {
            if s.trim().len() == s.len() {
                Cow::Owned(s)
            } else {
                Cow::Owned(s.trim().to_owned())
            }
        }
    }
}
