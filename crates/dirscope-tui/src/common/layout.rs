//! Text layout engine.
//!
//! Splits a block of text into display rows under a [`WrapPolicy`] and
//! measures the result. Lengths are counted in `char`s: this engine works on
//! logical columns, not grapheme clusters or terminal cell widths.
//!
//! Logical lines are separated by `\n`; a trailing `\r` on a line is dropped so
//! CRLF text lays out like LF text. A trailing line break produces one extra
//! empty row, matching what an unwrapped display shows.
//!
//! Word wrapping tokenizes on runs of whitespace and discards empty tokens, so
//! repeated separators collapse into the single space used to join a row.

use std::borrow::Cow;

pub use dirscope_core::WrapPolicy;

/// Size of a laid-out block of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    /// Length of the longest display row, in chars.
    pub longest_line_length: usize,
    /// Number of display rows. Never zero: empty text is one empty row.
    pub line_count: usize,
}

impl LineStats {
    /// Stats of an empty document.
    pub const EMPTY: LineStats = LineStats {
        longest_line_length: 0,
        line_count: 1,
    };
}

impl Default for LineStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Computes line statistics for `text` laid out at `viewport_width`.
///
/// A width of 0 is treated as 1 so wrapping always makes progress.
/// `WrapPolicy::None` ignores the width entirely.
pub fn compute_line_stats(text: &str, viewport_width: usize, policy: WrapPolicy) -> LineStats {
    let rows = wrap_rows(text, viewport_width, policy);
    LineStats {
        longest_line_length: rows.iter().map(|row| char_len(row)).max().unwrap_or(0),
        line_count: rows.len().max(1),
    }
}

/// Lays `text` out into display rows.
///
/// Rows borrow from `text` where possible; word-wrapped rows are rebuilt with
/// single spaces between tokens. The result always holds at least one row.
pub fn wrap_rows(text: &str, viewport_width: usize, policy: WrapPolicy) -> Vec<Cow<'_, str>> {
    let width = viewport_width.max(1);
    let mut rows = Vec::new();
    for line in logical_lines(text) {
        match policy {
            WrapPolicy::None => rows.push(Cow::Borrowed(line)),
            WrapPolicy::Character => wrap_chars(line, width, &mut rows),
            WrapPolicy::Word => wrap_words(line, width, &mut rows),
        }
    }
    rows
}

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn logical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn wrap_chars<'a>(line: &'a str, width: usize, rows: &mut Vec<Cow<'a, str>>) {
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in line.char_indices() {
        if count == width {
            rows.push(Cow::Borrowed(&line[start..idx]));
            start = idx;
            count = 0;
        }
        count += 1;
    }
    rows.push(Cow::Borrowed(&line[start..]));
}

fn wrap_words<'a>(line: &'a str, width: usize, rows: &mut Vec<Cow<'a, str>>) {
    let mut current = String::new();
    let mut current_len = 0;
    for token in line.split_whitespace() {
        let token_len = char_len(token);
        if current.is_empty() {
            // Oversized tokens land here too and keep their full length.
            current.push_str(token);
            current_len = token_len;
        } else if current_len + 1 + token_len <= width {
            current.push(' ');
            current.push_str(token);
            current_len += 1 + token_len;
        } else {
            rows.push(Cow::Owned(std::mem::take(&mut current)));
            current.push_str(token);
            current_len = token_len;
        }
    }
    rows.push(Cow::Owned(current));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(longest: usize, count: usize) -> LineStats {
        LineStats {
            longest_line_length: longest,
            line_count: count,
        }
    }

    const POLICIES: [WrapPolicy; 3] = [WrapPolicy::None, WrapPolicy::Character, WrapPolicy::Word];

    const SAMPLES: &[&str] = &[
        "",
        "\n",
        "\n\n\n",
        "a\nb\nc\n",
        "hello world",
        "the quick brown fox jumps over the lazy dog",
        "supercalifragilisticexpialidocious is long",
        "  leading and   repeated   spaces  ",
        "line one\r\nline two\r\n",
        "tab\tseparated\twords\n\nafter blank",
    ];

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(compute_line_stats("", 10, WrapPolicy::None), stats(0, 1));
        assert_eq!(compute_line_stats("", 10, WrapPolicy::Character), stats(0, 1));
        assert_eq!(compute_line_stats("", 10, WrapPolicy::Word), stats(0, 1));
    }

    #[test]
    fn test_character_wrap_splits_every_line() {
        assert_eq!(
            compute_line_stats("aaaa\naaaa\naaaa\naaaa", 2, WrapPolicy::Character),
            stats(2, 8)
        );
    }

    #[test]
    fn test_trailing_break_adds_empty_line() {
        assert_eq!(compute_line_stats("a\nb\nc\n", 50, WrapPolicy::None), stats(1, 4));
    }

    #[test]
    fn test_character_wrap_exact_multiple() {
        assert_eq!(
            compute_line_stats("bbbbbbbbbbbbbbbb", 8, WrapPolicy::Character),
            stats(8, 2)
        );
        assert_eq!(
            compute_line_stats("bbbbbbbbbbbbbbbbb", 8, WrapPolicy::Character),
            stats(8, 3)
        );
    }

    #[test]
    fn test_only_line_breaks() {
        for policy in POLICIES {
            assert_eq!(compute_line_stats("\n\n\n", 4, policy), stats(0, 4));
        }
    }

    #[test]
    fn test_character_wrap_short_lines_report_longest_line() {
        assert_eq!(
            compute_line_stats("abc\nabcde\n", 10, WrapPolicy::Character),
            stats(5, 3)
        );
    }

    #[test]
    fn test_zero_width_is_treated_as_one() {
        assert_eq!(compute_line_stats("abc", 0, WrapPolicy::Character), stats(1, 3));
        assert_eq!(compute_line_stats("ab cd", 0, WrapPolicy::Word), stats(2, 2));
    }

    #[test]
    fn test_word_wrap_packs_greedily() {
        let text = "the quick brown fox jumps";
        assert_eq!(
            wrap_rows(text, 10, WrapPolicy::Word),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(compute_line_stats(text, 10, WrapPolicy::Word), stats(9, 3));
    }

    #[test]
    fn test_word_wrap_row_may_fill_width_exactly() {
        assert_eq!(wrap_rows("ab cd ef", 5, WrapPolicy::Word), vec!["ab cd", "ef"]);
    }

    #[test]
    fn test_word_wrap_oversized_token_gets_own_row() {
        let text = "a supercalifragilistic b";
        assert_eq!(
            wrap_rows(text, 5, WrapPolicy::Word),
            vec!["a", "supercalifragilistic", "b"]
        );
        assert_eq!(compute_line_stats(text, 5, WrapPolicy::Word), stats(20, 3));
    }

    #[test]
    fn test_word_wrap_collapses_whitespace_runs() {
        assert_eq!(wrap_rows("a   b", 3, WrapPolicy::Word), vec!["a b"]);
        assert_eq!(wrap_rows("   ", 3, WrapPolicy::Word), vec![""]);
    }

    #[test]
    fn test_word_wrap_keeps_empty_lines() {
        assert_eq!(compute_line_stats("a\n\nb", 10, WrapPolicy::Word), stats(1, 3));
    }

    #[test]
    fn test_crlf_matches_lf() {
        for policy in POLICIES {
            assert_eq!(
                compute_line_stats("ab\r\ncd\r\n", 1, policy),
                compute_line_stats("ab\ncd\n", 1, policy)
            );
        }
    }

    #[test]
    fn test_lengths_count_chars_not_bytes() {
        assert_eq!(compute_line_stats("héllo", 10, WrapPolicy::None), stats(5, 1));
        assert_eq!(
            wrap_rows("日本語テキスト", 3, WrapPolicy::Character),
            vec!["日本語", "テキス", "ト"]
        );
    }

    #[test]
    fn test_line_count_is_never_zero() {
        for text in SAMPLES {
            for width in 0..12 {
                for policy in POLICIES {
                    assert!(compute_line_stats(text, width, policy).line_count >= 1);
                }
            }
        }
    }

    #[test]
    fn test_no_wrap_ignores_width() {
        for text in SAMPLES {
            let reference = compute_line_stats(text, 1, WrapPolicy::None);
            for width in [0, 2, 7, 80, 1000] {
                assert_eq!(compute_line_stats(text, width, WrapPolicy::None), reference);
            }
        }
    }

    #[test]
    fn test_character_wrap_never_exceeds_width() {
        for text in SAMPLES {
            let unwrapped = compute_line_stats(text, 1, WrapPolicy::None).longest_line_length;
            for width in 1..12 {
                let longest = compute_line_stats(text, width, WrapPolicy::Character)
                    .longest_line_length;
                assert_eq!(longest, unwrapped.min(width), "{text:?} at {width}");
            }
        }
    }

    #[test]
    fn test_word_wrap_exceeds_width_only_for_long_tokens() {
        for text in SAMPLES {
            let longest_token = text.split_whitespace().map(char_len).max().unwrap_or(0);
            for width in 1..12 {
                let longest =
                    compute_line_stats(text, width, WrapPolicy::Word).longest_line_length;
                assert!(longest <= width.max(longest_token), "{text:?} at {width}");
                if longest > width {
                    assert_eq!(longest, longest_token);
                }
            }
        }
    }

    #[test]
    fn test_stats_are_idempotent_and_match_rows() {
        for text in SAMPLES {
            for policy in POLICIES {
                let first = compute_line_stats(text, 6, policy);
                assert_eq!(first, compute_line_stats(text, 6, policy));
                assert_eq!(first.line_count, wrap_rows(text, 6, policy).len());
            }
        }
    }
}
