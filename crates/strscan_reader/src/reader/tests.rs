use std::borrow::Cow;

use pretty_assertions::assert_eq;

use super::{IdentifierOptions, NumberOptions, ReadUntilOptions, StringReader};
use crate::ReaderError;

/// Build a windowed reader, panicking on a rejected window (test inputs
/// are always valid).
fn windowed(text: &str, start: u32, len: u32) -> StringReader<'_> {
    match StringReader::with_window(text, start, len) {
        Ok(r) => r,
        Err(e) => panic!("valid window rejected: {e}"),
    }
}

// === Construction ===

#[test]
fn new_covers_whole_text() {
    let r = StringReader::new("hello");
    assert_eq!(r.pos(), 0);
    assert_eq!(r.end(), 5);
    assert_eq!(r.remaining(), "hello");
    assert!(!r.is_exhausted());
}

#[test]
fn new_on_empty_text_is_exhausted() {
    let r = StringReader::new("");
    assert!(r.is_exhausted());
    assert_eq!(r.remaining_len(), 0);
}

#[test]
fn with_start_offsets_window() {
    let r = match StringReader::with_start("hello world", 6) {
        Ok(r) => r,
        Err(e) => panic!("valid start rejected: {e}"),
    };
    assert_eq!(r.remaining(), "world");
    assert_eq!(r.start(), 6);
}

#[test]
fn with_start_past_end_is_range_error() {
    assert_eq!(
        StringReader::with_start("abc", 4).err(),
        Some(ReaderError::StartOutOfRange {
            start: 4,
            text_len: 3
        })
    );
}

#[test]
fn with_start_at_end_is_valid_and_exhausted() {
    let r = match StringReader::with_start("abc", 3) {
        Ok(r) => r,
        Err(e) => panic!("start == len must be valid: {e}"),
    };
    assert!(r.is_exhausted());
}

#[test]
fn with_window_selects_range() {
    let r = windowed("hello world", 6, 3);
    assert_eq!(r.remaining(), "wor");
    assert_eq!(r.end(), 9);
}

#[test]
fn with_window_overrunning_text_is_range_error() {
    assert_eq!(
        StringReader::with_window("abc", 1, 5).err(),
        Some(ReaderError::WindowOutOfRange {
            start: 1,
            window_len: 5,
            text_len: 3
        })
    );
}

#[test]
fn with_window_overflowing_u32_is_range_error() {
    assert!(StringReader::with_window("abc", 2, u32::MAX).is_err());
}

#[test]
fn with_window_inside_multibyte_char_is_boundary_error() {
    // 'é' is 2 bytes at offset 1
    assert_eq!(
        StringReader::with_window("aébc", 2, 1).err(),
        Some(ReaderError::NotCharBoundary { offset: 2 })
    );
}

// === Queries ===

#[test]
fn first_and_last_char() {
    let r = StringReader::new("abc");
    assert_eq!(r.first_char(), Some('a'));
    assert_eq!(r.last_char(), Some('c'));
}

#[test]
fn first_and_last_char_on_exhausted_window() {
    let r = StringReader::new("");
    assert_eq!(r.first_char(), None);
    assert_eq!(r.last_char(), None);
}

#[test]
fn char_at_relative_to_position() {
    let mut r = StringReader::new("abcdef");
    r.advance(2);
    assert_eq!(r.char_at(0), Ok('c'));
    assert_eq!(r.char_at(3), Ok('f'));
}

#[test]
fn char_at_outside_window_is_index_error() {
    let r = StringReader::new("abc");
    assert_eq!(
        r.char_at(3),
        Err(ReaderError::OffsetOutOfRange {
            offset: 3,
            window_len: 3
        })
    );
}

#[test]
fn char_at_off_boundary_is_boundary_error() {
    let r = StringReader::new("é");
    assert_eq!(r.char_at(1), Err(ReaderError::NotCharBoundary { offset: 1 }));
}

#[test]
fn substring_is_absolute_and_checked() {
    let mut r = StringReader::new("hello world");
    r.advance(8); // substring ignores the current window
    assert_eq!(r.substring(0, 5), Ok("hello"));
    assert_eq!(r.substring(6, 5), Ok("world"));
    assert!(r.substring(7, 5).is_err());
}

// === advance / read_char ===

#[test]
fn advance_moves_by_characters() {
    let mut r = StringReader::new("aébc");
    r.advance(2); // 'a' (1 byte) + 'é' (2 bytes)
    assert_eq!(r.remaining(), "bc");
}

#[test]
fn advance_clamps_at_end() {
    let mut r = StringReader::new("ab");
    r.advance(10);
    assert!(r.is_exhausted());
    assert_eq!(r.pos(), r.end());
}

#[test]
fn read_char_advances_and_reports_eof_as_none() {
    let mut r = StringReader::new("ab");
    assert_eq!(r.read_char(), Some('a'));
    assert_eq!(r.read_char(), Some('b'));
    assert_eq!(r.read_char(), None);
    assert_eq!(r.read_char(), None); // still None, never fails
}

// === trim_start / trim_end ===

#[test]
fn trim_start_skips_leading_whitespace() {
    let mut r = StringReader::new("  \t hello");
    r.trim_start();
    assert_eq!(r.remaining(), "hello");
}

#[test]
fn trim_start_is_idempotent() {
    let mut r = StringReader::new("   x");
    r.trim_start();
    let pos = r.pos();
    r.trim_start();
    assert_eq!(r.pos(), pos);
}

#[test]
fn trim_start_exhausts_all_whitespace_window() {
    let mut r = StringReader::new("   \t\n  ");
    r.trim_start();
    assert!(r.is_exhausted());
}

#[test]
fn trim_end_shrinks_window_tail() {
    let mut r = StringReader::new("hello   ");
    r.trim_end();
    assert_eq!(r.remaining(), "hello");
    let end = r.end();
    r.trim_end();
    assert_eq!(r.end(), end);
}

// === read_if_eq ===

#[test]
fn read_if_eq_consumes_on_match() {
    let mut r = StringReader::new("abc");
    assert!(r.read_if_eq('a', false));
    assert_eq!(r.remaining(), "bc");
}

#[test]
fn read_if_eq_leaves_cursor_on_mismatch() {
    let mut r = StringReader::new("abc");
    assert!(!r.read_if_eq('x', false));
    assert_eq!(r.remaining(), "abc");
}

#[test]
fn read_if_eq_skips_leading_whitespace() {
    let mut r = StringReader::new("   =rest");
    assert!(r.read_if_eq('=', true));
    assert_eq!(r.remaining(), "rest");
}

#[test]
fn read_if_eq_keeps_trim_on_mismatch() {
    let mut r = StringReader::new("   x");
    assert!(!r.read_if_eq('=', true));
    // Whitespace trim persists even though the probe missed.
    assert_eq!(r.remaining(), "x");
}

// === read_if_starts_with ===

#[test]
fn read_if_starts_with_consumes_word() {
    let mut r = StringReader::new("select x");
    assert!(r.read_if_starts_with("select", true));
    assert_eq!(r.remaining(), " x");
}

#[test]
fn read_if_starts_with_does_not_roll_back_trim() {
    // Mismatch after trim: the trim is NOT rolled back.
    let mut r = StringReader::new(" select x");
    assert!(!r.read_if_starts_with("selectx", true));
    assert_eq!(r.remaining(), "select x");
}

#[test]
fn read_if_starts_with_case_insensitive_mode() {
    let mut r = StringReader::new("SELECT x").with_case_insensitive(true);
    assert!(r.read_if_starts_with("select", false));
    assert_eq!(r.remaining(), " x");
}

#[test]
fn read_if_starts_with_case_sensitive_by_default() {
    let mut r = StringReader::new("SELECT x");
    assert!(!r.read_if_starts_with("select", false));
    assert_eq!(r.remaining(), "SELECT x");
}

#[test]
fn read_if_starts_with_near_window_end() {
    let mut r = StringReader::new("sel");
    assert!(!r.read_if_starts_with("select", false));
    assert_eq!(r.remaining(), "sel");
}

// === read_while ===

#[test]
fn read_while_consumes_maximal_prefix() {
    let mut r = StringReader::new("aaabbb");
    assert_eq!(r.read_while(|c| c == 'a'), "aaa");
    assert_eq!(r.remaining(), "bbb");
}

#[test]
fn read_while_may_return_empty() {
    let mut r = StringReader::new("hello");
    assert_eq!(r.read_while(|c| c == 'z'), "");
    assert_eq!(r.pos(), 0);
}

#[test]
fn read_while_runs_to_eof() {
    let mut r = StringReader::new("aaa");
    assert_eq!(r.read_while(|c| c == 'a'), "aaa");
    assert!(r.is_exhausted());
}

// === read_until ===

#[test]
fn read_until_stops_after_terminator() {
    let mut r = StringReader::new("key=value");
    let got = r.read_until('=', &ReadUntilOptions::default());
    assert_eq!(got.as_deref(), Some("key"));
    assert_eq!(r.remaining(), "value");
}

#[test]
fn read_until_can_stop_at_terminator() {
    let mut r = StringReader::new("key=value");
    let opts = ReadUntilOptions {
        stop_after_terminator: false,
        ..ReadUntilOptions::default()
    };
    assert_eq!(r.read_until('=', &opts).as_deref(), Some("key"));
    assert_eq!(r.remaining(), "=value");
}

#[test]
fn read_until_can_include_terminator() {
    let mut r = StringReader::new("key=value");
    let opts = ReadUntilOptions {
        include_terminator: true,
        ..ReadUntilOptions::default()
    };
    assert_eq!(r.read_until('=', &opts).as_deref(), Some("key="));
    assert_eq!(r.remaining(), "value");
}

#[test]
fn read_until_trims_result_edges() {
    let mut r = StringReader::new("  key  ;rest");
    let opts = ReadUntilOptions {
        trim_result_start: true,
        trim_result_end: true,
        ..ReadUntilOptions::default()
    };
    assert_eq!(r.read_until(';', &opts).as_deref(), Some("key"));
    assert_eq!(r.remaining(), "rest");
}

#[test]
fn read_until_missing_returns_remainder_by_default() {
    let mut r = StringReader::new("no terminator");
    let got = r.read_until(';', &ReadUntilOptions::default());
    assert_eq!(got.as_deref(), Some("no terminator"));
    assert!(r.is_exhausted());
}

#[test]
fn read_until_missing_without_remainder_commits_the_scan() {
    let mut r = StringReader::new("no terminator");
    let opts = ReadUntilOptions {
        remainder_if_missing: false,
        ..ReadUntilOptions::default()
    };
    assert_eq!(r.read_until(';', &opts), None);
    // The position is NOT restored: all scanned characters are consumed.
    assert!(r.is_exhausted());
}

#[test]
fn read_until_doubled_escape_collapses_pairs() {
    let mut r = StringReader::new("a;;b;rest");
    let opts = ReadUntilOptions {
        doubled_escape: true,
        ..ReadUntilOptions::default()
    };
    assert_eq!(r.read_until(';', &opts).as_deref(), Some("a;b"));
    assert_eq!(r.remaining(), "rest");
}

#[test]
fn read_until_doubled_escape_result_is_owned() {
    let mut r = StringReader::new("a;;b;rest");
    let opts = ReadUntilOptions {
        doubled_escape: true,
        ..ReadUntilOptions::default()
    };
    match r.read_until(';', &opts) {
        Some(Cow::Owned(s)) => assert_eq!(s, "a;b"),
        other => panic!("expected owned result, got {other:?}"),
    }
}

#[test]
fn read_until_doubled_escape_at_eof() {
    // Trailing doubled pair, then EOF with no lone terminator.
    let mut r = StringReader::new("a;;");
    let opts = ReadUntilOptions {
        doubled_escape: true,
        ..ReadUntilOptions::default()
    };
    assert_eq!(r.read_until(';', &opts).as_deref(), Some("a;"));
    assert!(r.is_exhausted());
}

#[test]
fn read_until_multibyte_terminator() {
    let mut r = StringReader::new("abc→def");
    let got = r.read_until('→', &ReadUntilOptions::default());
    assert_eq!(got.as_deref(), Some("abc"));
    assert_eq!(r.remaining(), "def");
}

// === Numeric probes ===

#[test]
fn trim_then_read_unsigned_integer() {
    let mut r = StringReader::new("  123abc");
    r.trim_start();
    assert_eq!(r.read_unsigned_integer(&NumberOptions::default()), Some(123));
    assert_eq!(r.remaining(), "abc");
}

#[test]
fn read_unsigned_integer_requires_leading_digit() {
    let mut r = StringReader::new("abc");
    assert_eq!(r.read_unsigned_integer(&NumberOptions::default()), None);
    assert_eq!(r.pos(), 0);
}

#[test]
fn read_unsigned_integer_overflow_is_a_miss() {
    let mut r = StringReader::new("99999999999999999999999");
    assert_eq!(r.read_unsigned_integer(&NumberOptions::default()), None);
    assert_eq!(r.pos(), 0);
}

#[test]
fn read_unsigned_integer_can_consume_terminator() {
    let mut r = StringReader::new("42,rest");
    let opts = NumberOptions {
        consume_terminator: true,
    };
    assert_eq!(r.read_unsigned_integer(&opts), Some(42));
    assert_eq!(r.remaining(), "rest");
}

#[test]
fn read_unsigned_integer_consume_terminator_at_eof() {
    let mut r = StringReader::new("42");
    let opts = NumberOptions {
        consume_terminator: true,
    };
    assert_eq!(r.read_unsigned_integer(&opts), Some(42));
    assert!(r.is_exhausted());
}

#[test]
fn read_integer_with_signs() {
    let mut r = StringReader::new("-17 +4 9");
    let opts = NumberOptions::default();
    assert_eq!(r.read_integer(&opts), Some(-17));
    r.trim_start();
    assert_eq!(r.read_integer(&opts), Some(4));
    r.trim_start();
    assert_eq!(r.read_integer(&opts), Some(9));
}

#[test]
fn read_integer_sign_without_digit_is_a_miss() {
    let mut r = StringReader::new("-abc");
    assert_eq!(r.read_integer(&NumberOptions::default()), None);
    assert_eq!(r.remaining(), "-abc");
}

#[test]
fn read_integer_extremes() {
    let mut r = StringReader::new("-9223372036854775808");
    assert_eq!(r.read_integer(&NumberOptions::default()), Some(i64::MIN));
    let mut r = StringReader::new("9223372036854775807");
    assert_eq!(r.read_integer(&NumberOptions::default()), Some(i64::MAX));
    let mut r = StringReader::new("9223372036854775808");
    assert_eq!(r.read_integer(&NumberOptions::default()), None);
}

#[test]
fn read_unsigned_decimal_with_fraction() {
    let mut r = StringReader::new("3.25rest");
    assert_eq!(
        r.read_unsigned_decimal(&NumberOptions::default()),
        Some(3.25)
    );
    assert_eq!(r.remaining(), "rest");
}

#[test]
fn read_unsigned_decimal_stops_before_bare_dot() {
    // The dot is only consumed when a digit follows it.
    let mut r = StringReader::new("12.x");
    assert_eq!(
        r.read_unsigned_decimal(&NumberOptions::default()),
        Some(12.0)
    );
    assert_eq!(r.remaining(), ".x");
}

#[test]
fn read_unsigned_decimal_consumes_one_point_only() {
    let mut r = StringReader::new("1.5.6");
    assert_eq!(r.read_unsigned_decimal(&NumberOptions::default()), Some(1.5));
    assert_eq!(r.remaining(), ".6");
}

#[test]
fn read_decimal_with_sign() {
    let mut r = StringReader::new("-2.5;");
    assert_eq!(r.read_decimal(&NumberOptions::default()), Some(-2.5));
    assert_eq!(r.remaining(), ";");
}

// === read_identifier ===

#[test]
fn read_identifier_default_predicates() {
    let mut r = StringReader::new("foo_1 bar");
    assert_eq!(
        r.read_identifier(&IdentifierOptions::default()),
        Some("foo_1")
    );
    assert_eq!(r.remaining(), " bar");
}

#[test]
fn read_identifier_underscore_start() {
    let mut r = StringReader::new("_x");
    assert_eq!(r.read_identifier(&IdentifierOptions::default()), Some("_x"));
}

#[test]
fn read_identifier_digit_start_is_a_miss() {
    let mut r = StringReader::new("1abc");
    assert_eq!(r.read_identifier(&IdentifierOptions::default()), None);
    assert_eq!(r.pos(), 0); // cursor unmoved
}

#[test]
fn read_identifier_custom_predicates() {
    let opts = IdentifierOptions {
        is_start: |c| c.is_ascii_alphabetic(),
        is_continue: |c| c.is_ascii_alphanumeric() || c == '-',
    };
    let mut r = StringReader::new("kebab-case rest");
    assert_eq!(r.read_identifier(&opts), Some("kebab-case"));
}

// === Backward operations ===

#[test]
fn reverse_read_char_shrinks_end() {
    let mut r = StringReader::new("abc");
    assert_eq!(r.reverse_read_char(), Some('c'));
    assert_eq!(r.remaining(), "ab");
    assert_eq!(r.reverse_read_char(), Some('b'));
    assert_eq!(r.reverse_read_char(), Some('a'));
    assert_eq!(r.reverse_read_char(), None);
}

#[test]
fn reverse_read_if_eq_matches_suffix() {
    let mut r = StringReader::new("stmt;  ");
    assert!(r.reverse_read_if_eq(';', true));
    assert_eq!(r.remaining(), "stmt");
}

#[test]
fn reverse_read_if_eq_keeps_trim_on_mismatch() {
    let mut r = StringReader::new("stmt  ");
    assert!(!r.reverse_read_if_eq(';', true));
    assert_eq!(r.remaining(), "stmt");
}

// === Copy / reset / remaining_reader ===

#[test]
fn reader_is_copy_for_checkpointing() {
    let mut r = StringReader::new("abcdef");
    r.advance(2);
    let saved = r;
    r.advance(3);
    assert_eq!(r.remaining(), "f");
    assert_eq!(saved.remaining(), "cdef");
}

#[test]
fn reset_restores_original_start_only() {
    let mut r = windowed("abcdef", 1, 4); // window "bcde"
    r.advance(2);
    let _ = r.reverse_read_char(); // shrink end past 'e'
    r.reset();
    assert_eq!(r.pos(), 1);
    // End shrinkage is permanent: window is now "bcd".
    assert_eq!(r.remaining(), "bcd");
}

#[test]
fn remaining_reader_starts_at_current_position() {
    let mut r = StringReader::new("abcdef");
    r.advance(2);
    let mut fresh = r.remaining_reader();
    assert_eq!(fresh.remaining(), "cdef");
    fresh.advance(2);
    fresh.reset();
    assert_eq!(fresh.remaining(), "cdef"); // reset target is the copy point
    assert_eq!(r.remaining(), "cdef"); // original untouched
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_window {
    use proptest::prelude::*;

    use super::super::{NumberOptions, ReadUntilOptions, StringReader};

    /// One reader operation for the invariant property.
    #[derive(Clone, Debug)]
    enum Op {
        Advance(u32),
        TrimStart,
        TrimEnd,
        ReadChar,
        ReverseReadChar,
        ReadIfEq(char, bool),
        ReadUntil(char),
        ReadUnsignedInteger,
        Reset,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..8).prop_map(Op::Advance),
            Just(Op::TrimStart),
            Just(Op::TrimEnd),
            Just(Op::ReadChar),
            Just(Op::ReverseReadChar),
            (any::<char>(), any::<bool>()).prop_map(|(c, ws)| Op::ReadIfEq(c, ws)),
            any::<char>().prop_map(Op::ReadUntil),
            Just(Op::ReadUnsignedInteger),
            Just(Op::Reset),
        ]
    }

    fn check_invariant(r: &StringReader<'_>, text: &str) {
        assert!(r.start() <= r.pos(), "start {} > pos {}", r.start(), r.pos());
        assert!(r.pos() <= r.end(), "pos {} > end {}", r.pos(), r.end());
        assert!(
            r.end() as usize <= text.len(),
            "end {} > text length {}",
            r.end(),
            text.len()
        );
        assert!(text.is_char_boundary(r.pos() as usize));
        assert!(text.is_char_boundary(r.end() as usize));
    }

    proptest! {
        #[test]
        fn window_invariant_holds_under_any_ops(
            text in ".{0,64}",
            ops in proptest::collection::vec(op_strategy(), 0..32),
        ) {
            let mut r = StringReader::new(&text);
            for op in ops {
                match op {
                    Op::Advance(n) => r.advance(n),
                    Op::TrimStart => r.trim_start(),
                    Op::TrimEnd => r.trim_end(),
                    Op::ReadChar => {
                        let _ = r.read_char();
                    }
                    Op::ReverseReadChar => {
                        let _ = r.reverse_read_char();
                    }
                    Op::ReadIfEq(c, ws) => {
                        let _ = r.read_if_eq(c, ws);
                    }
                    Op::ReadUntil(c) => {
                        let _ = r.read_until(c, &ReadUntilOptions::default());
                    }
                    Op::ReadUnsignedInteger => {
                        let _ = r.read_unsigned_integer(&NumberOptions::default());
                    }
                    Op::Reset => r.reset(),
                }
                check_invariant(&r, &text);
            }
        }

        #[test]
        fn trim_start_is_idempotent_for_any_text(text in ".{0,64}") {
            let mut r = StringReader::new(&text);
            r.trim_start();
            let once = r.pos();
            r.trim_start();
            prop_assert_eq!(r.pos(), once);
        }

        #[test]
        fn read_while_never_exceeds_window(text in ".{0,64}") {
            let mut r = StringReader::new(&text);
            let taken = r.read_while(char::is_alphanumeric);
            prop_assert!(taken.len() <= text.len());
            prop_assert!(r.pos() <= r.end());
        }
    }
}
