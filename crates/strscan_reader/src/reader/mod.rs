//! Mutable scanning cursor over an immutable text buffer.
//!
//! [`StringReader`] exposes a half-open `[pos, end)` reading window over a
//! borrowed `&str`. Forward operations only move `pos` up, reverse
//! operations only move `end` down, and both always land on UTF-8
//! character boundaries.
//!
//! # Probe semantics
//!
//! All `read_*` operations are probes: absence of the expected token is a
//! normal outcome reported via `bool` or `Option`, never an error. Simple
//! character probes leave the cursor unmoved on a miss. Two documented
//! exceptions commit partial progress even on an overall miss:
//!
//! - whitespace-skipping probes ([`read_if_eq`](StringReader::read_if_eq),
//!   [`read_if_starts_with`](StringReader::read_if_starts_with)) keep the
//!   leading whitespace consumed,
//! - [`read_until`](StringReader::read_until) leaves the cursor past all
//!   scanned characters when the terminator is absent.
//!
//! Callers rely on this (e.g. chained reads that assume whitespace was
//! consumed even on a word mismatch), so it is part of the contract.

use std::borrow::Cow;

use crate::error::ReaderError;

/// Byte width of `c` in UTF-8, as `u32`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "char::len_utf8 is always 1..=4"
)]
#[inline]
fn char_w(c: char) -> u32 {
    c.len_utf8() as u32
}

/// Byte length of `s` as `u32`.
///
/// # Contract
///
/// `s` must derive from a u32-bounded reader window, which
/// [`saturated_len`] guarantees at construction.
#[allow(
    clippy::cast_possible_truncation,
    reason = "slices derive from a u32-bounded window"
)]
#[inline]
fn len_u32(s: &str) -> u32 {
    s.len() as u32
}

/// Text length saturated to `u32`.
///
/// Inputs past 4 GiB are truncated to the last character boundary at or
/// below `u32::MAX`; the tail beyond that point is simply outside every
/// window.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the fallback cast is bounded by u32::MAX"
)]
fn saturated_len(text: &str) -> u32 {
    match u32::try_from(text.len()) {
        Ok(n) => n,
        Err(_) => {
            let mut n = u32::MAX as usize;
            while !text.is_char_boundary(n) {
                n -= 1;
            }
            n as u32
        }
    }
}

/// Find the byte offset of `target` in `haystack`.
///
/// Uses memchr for ASCII targets (an ASCII byte never appears inside a
/// multi-byte UTF-8 sequence, so a raw byte search is exact); falls back
/// to `str::find` for multi-byte characters.
#[inline]
pub(crate) fn find_char(haystack: &str, target: char) -> Option<usize> {
    if target.is_ascii() {
        #[allow(clippy::cast_possible_truncation, reason = "ASCII fits in one byte")]
        let b = target as u8;
        memchr::memchr(b, haystack.as_bytes())
    } else {
        haystack.find(target)
    }
}

/// Configuration for [`StringReader::read_until`].
///
/// All flags combine independently.
#[derive(Clone, Copy, Debug)]
pub struct ReadUntilOptions {
    /// Include the terminator character in the returned text.
    pub include_terminator: bool,
    /// Leave the cursor after the terminator (`true`, default) or at it
    /// (`false`, the terminator is not consumed).
    pub stop_after_terminator: bool,
    /// Trim leading whitespace from the returned text.
    pub trim_result_start: bool,
    /// Trim trailing whitespace from the returned text.
    pub trim_result_end: bool,
    /// When the terminator is absent, return the remaining window
    /// (`true`, default) instead of `None`. Either way the cursor ends up
    /// at the window end — the scan is not rolled back.
    pub remainder_if_missing: bool,
    /// Treat two consecutive terminators as one literal occurrence that
    /// does not end the scan (doubled-terminator escaping).
    pub doubled_escape: bool,
}

impl Default for ReadUntilOptions {
    fn default() -> Self {
        Self {
            include_terminator: false,
            stop_after_terminator: true,
            trim_result_start: false,
            trim_result_end: false,
            remainder_if_missing: true,
            doubled_escape: false,
        }
    }
}

/// Configuration for the numeric probes.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberOptions {
    /// Consume exactly one trailing non-digit character after a
    /// successful read. Off by default: `read_unsigned_integer` over
    /// `"123abc"` leaves the cursor at `"abc"`.
    pub consume_terminator: bool,
}

/// Configuration for [`StringReader::read_identifier`].
#[derive(Clone, Copy, Debug)]
pub struct IdentifierOptions {
    /// Predicate for the first character (default: letter or `_`).
    pub is_start: fn(char) -> bool,
    /// Predicate for subsequent characters (default: letter, digit, or `_`).
    pub is_continue: fn(char) -> bool,
}

fn default_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn default_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Default for IdentifierOptions {
    fn default() -> Self {
        Self {
            is_start: default_ident_start,
            is_continue: default_ident_continue,
        }
    }
}

/// Mutable scanning cursor over a borrowed text buffer.
///
/// The reader never copies the backing text; substrings returned by read
/// operations borrow from it (`&'a str`), except where escape collapsing
/// forces an owned buffer ([`read_until`](Self::read_until) with
/// `doubled_escape`).
///
/// The reader is [`Copy`], enabling cheap state snapshots for
/// backtracking. It is not restartable past reverse reads: only the
/// original window `start` is retained for [`reset`](Self::reset);
/// shrinkage of `end` is permanent.
///
/// # Invariant
///
/// `start <= pos <= end <= text.len()` holds after every operation, and
/// `pos`/`end` always lie on character boundaries.
#[derive(Clone, Copy, Debug)]
pub struct StringReader<'a> {
    /// Backing text; read-only for the reader's lifetime.
    text: &'a str,
    /// Original window start, retained for `reset`.
    start: u32,
    /// Current read head. Only moves up.
    pos: u32,
    /// Current read tail. Only moves down (reverse reads).
    end: u32,
    /// ASCII-case-insensitive comparison mode for word probes.
    case_insensitive: bool,
}

/// Size assertion: `StringReader` should be <= 32 bytes on 64-bit
/// platforms. &str = 16 (fat pointer), 3 x u32 = 12, bool = 1 => 32 padded.
const _: () = assert!(std::mem::size_of::<StringReader<'static>>() <= 32);

impl<'a> StringReader<'a> {
    /// Create a reader whose window covers the whole text.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            start: 0,
            pos: 0,
            end: saturated_len(text),
            case_insensitive: false,
        }
    }

    /// Create a reader over `[start, text.len())`.
    ///
    /// Fails when `start` is past the end of the text or splits a
    /// multi-byte character.
    pub fn with_start(text: &'a str, start: u32) -> Result<Self, ReaderError> {
        let text_len = saturated_len(text);
        if start > text_len {
            return Err(ReaderError::StartOutOfRange { start, text_len });
        }
        if !text.is_char_boundary(start as usize) {
            return Err(ReaderError::NotCharBoundary { offset: start });
        }
        Ok(Self {
            text,
            start,
            pos: start,
            end: text_len,
            case_insensitive: false,
        })
    }

    /// Create a reader over `[start, start + len)`.
    ///
    /// Fails when the window exceeds the text or either edge splits a
    /// multi-byte character.
    pub fn with_window(text: &'a str, start: u32, len: u32) -> Result<Self, ReaderError> {
        let text_len = saturated_len(text);
        if start > text_len {
            return Err(ReaderError::StartOutOfRange { start, text_len });
        }
        let end = start
            .checked_add(len)
            .filter(|&e| e <= text_len)
            .ok_or(ReaderError::WindowOutOfRange {
                start,
                window_len: len,
                text_len,
            })?;
        for offset in [start, end] {
            if !text.is_char_boundary(offset as usize) {
                return Err(ReaderError::NotCharBoundary { offset });
            }
        }
        Ok(Self {
            text,
            start,
            pos: start,
            end,
            case_insensitive: false,
        })
    }

    /// Switch the comparison mode used by word probes
    /// ([`read_if_starts_with`](Self::read_if_starts_with)).
    ///
    /// Case-insensitive mode compares ASCII letters without regard to
    /// case (ordinal otherwise).
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Copy-construct a fresh reader over the current `[pos, end)` window.
    ///
    /// The new reader's `start` is the current position, so its `reset`
    /// returns here rather than to the original window start.
    pub fn remaining_reader(&self) -> StringReader<'a> {
        StringReader {
            text: self.text,
            start: self.pos,
            pos: self.pos,
            end: self.end,
            case_insensitive: self.case_insensitive,
        }
    }

    // ─── Queries ──────────────────────────────────────────────────────

    /// The current `[pos, end)` window as a string slice.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos as usize..self.end as usize]
    }

    /// `true` when the window is empty (`pos == end`).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.end
    }

    /// Byte length of the current window.
    #[inline]
    pub fn remaining_len(&self) -> u32 {
        self.end - self.pos
    }

    /// Current read head (byte offset into the backing text).
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Current read tail (byte offset into the backing text).
    #[inline]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Original window start (the `reset` target).
    #[inline]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// `true` when word probes compare ASCII-case-insensitively.
    #[inline]
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// First character of the window, or `None` when exhausted.
    #[inline]
    pub fn first_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Last character of the window, or `None` when exhausted.
    #[inline]
    pub fn last_char(&self) -> Option<char> {
        self.remaining().chars().next_back()
    }

    /// Character starting at byte `offset` relative to the current
    /// position.
    ///
    /// Fails when `offset` is outside `[0, remaining_len)` or splits a
    /// multi-byte character.
    pub fn char_at(&self, offset: u32) -> Result<char, ReaderError> {
        let w = self.remaining();
        let window_len = len_u32(w);
        if offset >= window_len {
            return Err(ReaderError::OffsetOutOfRange { offset, window_len });
        }
        let off = offset as usize;
        if !w.is_char_boundary(off) {
            return Err(ReaderError::NotCharBoundary { offset });
        }
        w[off..]
            .chars()
            .next()
            .ok_or(ReaderError::OffsetOutOfRange { offset, window_len })
    }

    /// Extract `[start, start + len)` from the backing text (absolute
    /// offsets, independent of the current window).
    ///
    /// Fails with a range error on out-of-bounds offsets, and with a
    /// boundary error when an edge splits a multi-byte character.
    pub fn substring(&self, start: u32, len: u32) -> Result<&'a str, ReaderError> {
        let text_len = saturated_len(self.text);
        if start > text_len {
            return Err(ReaderError::StartOutOfRange { start, text_len });
        }
        let end = start
            .checked_add(len)
            .filter(|&e| e <= text_len)
            .ok_or(ReaderError::WindowOutOfRange {
                start,
                window_len: len,
                text_len,
            })?;
        for offset in [start, end] {
            if !self.text.is_char_boundary(offset as usize) {
                return Err(ReaderError::NotCharBoundary { offset });
            }
        }
        Ok(&self.text[start as usize..end as usize])
    }

    // ─── Forward operations ───────────────────────────────────────────

    /// Move the read head back to the original window start.
    ///
    /// Does not restore `end`: window shrinkage from reverse reads is
    /// permanent.
    pub fn reset(&mut self) {
        self.pos = self.start;
    }

    /// Advance by `n` characters, clamped at the window end.
    pub fn advance(&mut self, n: u32) {
        for _ in 0..n {
            if self.read_char().is_none() {
                break;
            }
        }
    }

    /// Advance past leading whitespace. Idempotent; exhausts the reader
    /// when the window is all whitespace.
    pub fn trim_start(&mut self) {
        let trimmed = self.remaining().trim_start();
        self.pos = self.end - len_u32(trimmed);
    }

    /// Return the current character and advance past it, or `None` when
    /// exhausted. Never fails.
    #[inline]
    pub fn read_char(&mut self) -> Option<char> {
        let c = self.first_char()?;
        self.pos += char_w(c);
        Some(c)
    }

    /// Consume `target` if it is the first character of the window
    /// (ordinal compare), optionally trimming leading whitespace first.
    ///
    /// On a miss, only the optional whitespace trim persists.
    pub fn read_if_eq(&mut self, target: char, skip_leading_ws: bool) -> bool {
        if skip_leading_ws {
            self.trim_start();
        }
        match self.first_char() {
            Some(c) if c == target => {
                self.pos += char_w(c);
                true
            }
            _ => false,
        }
    }

    /// Consume `word` if the window starts with it, honoring the
    /// reader's comparison mode.
    ///
    /// The leading-whitespace trim is NOT rolled back on a mismatch: a
    /// failed probe leaves the cursor at the post-trim position. Callers
    /// rely on this when chaining probes.
    pub fn read_if_starts_with(&mut self, word: &str, skip_leading_ws: bool) -> bool {
        if skip_leading_ws {
            self.trim_start();
        }
        let matched = match self.remaining().get(..word.len()) {
            Some(prefix) if self.case_insensitive => prefix.eq_ignore_ascii_case(word),
            Some(prefix) => prefix == word,
            None => false,
        };
        if matched {
            self.pos += len_u32(word);
        }
        matched
    }

    /// Consume and return the maximal prefix satisfying `pred`.
    ///
    /// Always succeeds; the result is empty when the first character
    /// already fails the predicate.
    pub fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let w = self.remaining();
        let stop = w.find(|c: char| !pred(c)).unwrap_or(w.len());
        self.pos += len_u32(&w[..stop]);
        &w[..stop]
    }

    /// Scan forward to `target`, consuming everything up to it.
    ///
    /// Returns the captured text, shaped by `opts` (terminator
    /// inclusion, stop position, result trimming, doubled-terminator
    /// escaping). When the terminator is absent the cursor still ends up
    /// at the window end; the return value is then the remainder or
    /// `None` depending on `remainder_if_missing`.
    ///
    /// The result borrows from the backing text except in
    /// `doubled_escape` mode, where collapsing forces an owned buffer.
    pub fn read_until(&mut self, target: char, opts: &ReadUntilOptions) -> Option<Cow<'a, str>> {
        if opts.doubled_escape {
            self.read_until_doubled(target, opts)
        } else {
            self.read_until_plain(target, opts)
        }
    }

    fn read_until_plain(&mut self, target: char, opts: &ReadUntilOptions) -> Option<Cow<'a, str>> {
        let w = self.remaining();
        match find_char(w, target) {
            Some(hit) => {
                let captured = if opts.include_terminator {
                    &w[..hit + target.len_utf8()]
                } else {
                    &w[..hit]
                };
                self.pos += len_u32(&w[..hit]);
                if opts.stop_after_terminator {
                    self.pos += char_w(target);
                }
                Some(Cow::Borrowed(trimmed(captured, opts)))
            }
            None => {
                // The whole window has been scanned; the position is not
                // restored even when returning the miss sentinel.
                self.pos = self.end;
                if opts.remainder_if_missing {
                    Some(Cow::Borrowed(trimmed(w, opts)))
                } else {
                    None
                }
            }
        }
    }

    /// Escape-aware variant: `target target` collapses to one literal
    /// `target` in the output and does not end the scan.
    fn read_until_doubled(
        &mut self,
        target: char,
        opts: &ReadUntilOptions,
    ) -> Option<Cow<'a, str>> {
        let w = self.remaining();
        let tw = target.len_utf8();
        let mut out = String::new();
        let mut i = 0usize;
        let hit = loop {
            match find_char(&w[i..], target) {
                None => {
                    out.push_str(&w[i..]);
                    break None;
                }
                Some(off) => {
                    let at = i + off;
                    out.push_str(&w[i..at]);
                    let after = at + tw;
                    if w[after..].starts_with(target) {
                        // Doubled terminator: one literal occurrence.
                        out.push(target);
                        i = after + tw;
                    } else {
                        break Some(at);
                    }
                }
            }
        };
        match hit {
            Some(at) => {
                if opts.include_terminator {
                    out.push(target);
                }
                self.pos += len_u32(&w[..at]);
                if opts.stop_after_terminator {
                    self.pos += char_w(target);
                }
                Some(trim_owned(out, opts))
            }
            None => {
                self.pos = self.end;
                if opts.remainder_if_missing {
                    Some(trim_owned(out, opts))
                } else {
                    None
                }
            }
        }
    }

    // ─── Numeric probes ───────────────────────────────────────────────

    /// Read an unsigned ASCII decimal integer.
    ///
    /// `None` (cursor unmoved) when the window does not start with a
    /// digit, or on `u64` overflow.
    pub fn read_unsigned_integer(&mut self, opts: &NumberOptions) -> Option<u64> {
        let w = self.remaining();
        let n = scan_digits(w);
        if n == 0 {
            return None;
        }
        let value = parse_u64_checked(&w[..n])?;
        self.pos += len_u32(&w[..n]);
        self.maybe_consume_terminator(opts);
        Some(value)
    }

    /// Read a signed ASCII decimal integer (optional leading `+`/`-`).
    ///
    /// `None` (cursor unmoved) when the window does not start with a
    /// digit or sign+digit, or on `i64` overflow.
    pub fn read_integer(&mut self, opts: &NumberOptions) -> Option<i64> {
        let w = self.remaining();
        let (negative, sign_len) = sign_prefix(w);
        let digits = &w[sign_len..];
        let n = scan_digits(digits);
        if n == 0 {
            return None;
        }
        let magnitude = parse_u64_checked(&digits[..n])?;
        let value = if negative {
            negate_magnitude(magnitude)?
        } else {
            i64::try_from(magnitude).ok()?
        };
        self.pos += len_u32(&w[..sign_len + n]);
        self.maybe_consume_terminator(opts);
        Some(value)
    }

    /// Read an unsigned decimal number (`digits [ '.' digits ]`).
    ///
    /// The decimal point is consumed only when at least one digit
    /// follows it. `None` (cursor unmoved) when the window does not
    /// start with a digit.
    pub fn read_unsigned_decimal(&mut self, opts: &NumberOptions) -> Option<f64> {
        let w = self.remaining();
        let n = scan_decimal(w)?;
        let value: f64 = w[..n].parse().ok()?;
        self.pos += len_u32(&w[..n]);
        self.maybe_consume_terminator(opts);
        Some(value)
    }

    /// Read a signed decimal number (optional leading `+`/`-`).
    pub fn read_decimal(&mut self, opts: &NumberOptions) -> Option<f64> {
        let w = self.remaining();
        let (_, sign_len) = sign_prefix(w);
        let n = scan_decimal(&w[sign_len..])?;
        let total = sign_len + n;
        let value: f64 = w[..total].parse().ok()?;
        self.pos += len_u32(&w[..total]);
        self.maybe_consume_terminator(opts);
        Some(value)
    }

    fn maybe_consume_terminator(&mut self, opts: &NumberOptions) {
        if opts.consume_terminator {
            let _ = self.read_char();
        }
    }

    /// Read an identifier: one start character followed by any number of
    /// continuation characters (predicates per `opts`).
    ///
    /// `None` with the cursor unmoved when the first character fails the
    /// start predicate.
    pub fn read_identifier(&mut self, opts: &IdentifierOptions) -> Option<&'a str> {
        let w = self.remaining();
        let first = w.chars().next()?;
        if !(opts.is_start)(first) {
            return None;
        }
        let rest = &w[first.len_utf8()..];
        let cont = rest.find(|c: char| !(opts.is_continue)(c)).unwrap_or(rest.len());
        let total = first.len_utf8() + cont;
        self.pos += len_u32(&w[..total]);
        Some(&w[..total])
    }

    // ─── Backward operations ──────────────────────────────────────────

    /// Return the last character of the window and shrink `end` past it,
    /// or `None` when exhausted. Never fails.
    pub fn reverse_read_char(&mut self) -> Option<char> {
        let c = self.last_char()?;
        self.end -= char_w(c);
        Some(c)
    }

    /// Shrink the window past trailing whitespace. Idempotent.
    pub fn trim_end(&mut self) {
        let trimmed = self.remaining().trim_end();
        self.end = self.pos + len_u32(trimmed);
    }

    /// Consume `target` if it is the last character of the window
    /// (ordinal compare), optionally trimming trailing whitespace first.
    ///
    /// Mirror image of [`read_if_eq`](Self::read_if_eq): on a miss, only
    /// the optional whitespace trim persists.
    pub fn reverse_read_if_eq(&mut self, target: char, skip_trailing_ws: bool) -> bool {
        if skip_trailing_ws {
            self.trim_end();
        }
        match self.last_char() {
            Some(c) if c == target => {
                self.end -= char_w(c);
                true
            }
            _ => false,
        }
    }
}

/// Length of the leading ASCII digit run.
fn scan_digits(s: &str) -> usize {
    s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len())
}

/// Length of a leading `digits [ '.' digits ]` run, or `None` when `s`
/// does not start with a digit.
fn scan_decimal(s: &str) -> Option<usize> {
    let int_len = scan_digits(s);
    if int_len == 0 {
        return None;
    }
    let rest = &s[int_len..];
    if rest.starts_with('.') {
        let frac_len = scan_digits(&rest[1..]);
        if frac_len > 0 {
            return Some(int_len + 1 + frac_len);
        }
    }
    Some(int_len)
}

/// `(negative, sign byte length)` for an optional leading `+`/`-`.
fn sign_prefix(s: &str) -> (bool, usize) {
    match s.chars().next() {
        Some('-') => (true, 1),
        Some('+') => (false, 1),
        _ => (false, 0),
    }
}

/// Negate a decimal magnitude into `i64`, or `None` past `|i64::MIN|`.
#[allow(
    clippy::cast_possible_wrap,
    reason = "magnitude <= 2^63; two's complement negation is exact"
)]
fn negate_magnitude(magnitude: u64) -> Option<i64> {
    if magnitude > i64::MIN.unsigned_abs() {
        return None;
    }
    Some(magnitude.wrapping_neg() as i64)
}

/// Accumulate ASCII digits into a `u64` with checked arithmetic.
/// `None` on overflow.
fn parse_u64_checked(digits: &str) -> Option<u64> {
    let mut value: u64 = 0;
    for c in digits.chars() {
        let d = c.to_digit(10)?;
        value = value.checked_mul(10)?.checked_add(u64::from(d))?;
    }
    Some(value)
}

/// Apply the result-trim flags to a borrowed slice.
fn trimmed<'a>(s: &'a str, opts: &ReadUntilOptions) -> &'a str {
    let s = if opts.trim_result_start { s.trim_start() } else { s };
    if opts.trim_result_end {
        s.trim_end()
    } else {
        s
    }
}

/// Apply the result-trim flags to an owned buffer, re-allocating only
/// when trimming actually removed something.
fn trim_owned<'a>(s: String, opts: &ReadUntilOptions) -> Cow<'a, str> {
    let t = trimmed(&s, opts);
    if t.len() == s.len() {
        Cow::Owned(s)
    } else {
        Cow::Owned(t.to_owned())
    }
}

#[cfg(test)]
mod tests;
