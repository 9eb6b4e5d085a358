//! Single-pass marker scanner.
//!
//! Classifies a text segment into literal runs, string delimiters, column
//! markers and directive markers. Markers never overlap and are taken greedily
//! from left to right.
//!
//! - `"` not preceded by `\` toggles a string-literal span. Column markers are
//!   not recognised inside it; directive markers are.
//! - `[path]` is a column marker when `path` is non-empty, made of word
//!   characters and `.`, and ends in a word character. A `[` directly after a
//!   word character or `\` stays literal (`arr[1]`).
//! - `%%name` is a directive marker for any non-empty run of word characters;
//!   whether `name` is known is decided by the caller.

use crate::directive::DIRECTIVE_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Span<'a> {
    Literal(&'a str),
    /// An unescaped `"`.
    Quote,
    /// Contents of a `[...]` column marker.
    Column(&'a str),
    /// `%%name`; `offset` is the byte offset of `%%`.
    Directive { name: &'a str, offset: usize },
}

pub(crate) fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Length of the run of word characters at the start of `s`.
pub(crate) fn word_len(s: &str) -> usize {
    s.bytes().take_while(|b| is_word(*b)).count()
}

pub(crate) fn scan(text: &str) -> Vec<Span<'_>> {
    let bytes = text.as_bytes();
    let prefix = DIRECTIVE_PREFIX.len();
    let mut spans = Vec::new();
    let mut literal_start = 0;
    let mut in_string = false;
    let mut i = 0;

    macro_rules! flush {
        () => {
            if literal_start < i {
                spans.push(Span::Literal(&text[literal_start..i]));
            }
        };
    }

    while i < bytes.len() {
        match bytes[i] {
            b'"' if i == 0 || bytes[i - 1] != b'\\' => {
                flush!();
                spans.push(Span::Quote);
                in_string = !in_string;
                i += 1;
                literal_start = i;
            }
            b'[' if !in_string && bracket_allowed(bytes, i) => match column_end(bytes, i) {
                Some(end) => {
                    flush!();
                    spans.push(Span::Column(&text[i + 1..end]));
                    i = end + 1;
                    literal_start = i;
                }
                None => i += 1,
            },
            b'%' if text[i..].starts_with(DIRECTIVE_PREFIX) => {
                let name_len = word_len(&text[i + prefix..]);
                if name_len == 0 {
                    // Bare `%%`: literal, and never the start of another marker.
                    i += prefix;
                    continue;
                }
                flush!();
                let name_start = i + prefix;
                spans.push(Span::Directive {
                    name: &text[name_start..name_start + name_len],
                    offset: i,
                });
                i = name_start + name_len;
                literal_start = i;
            }
            _ => i += 1,
        }
    }
    flush!();
    spans
}

fn bracket_allowed(bytes: &[u8], i: usize) -> bool {
    i == 0 || !(is_word(bytes[i - 1]) || bytes[i - 1] == b'\\')
}

/// Index of the closing `]` of a column marker opened at `open`.
fn column_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut j = open + 1;
    while j < bytes.len() && (is_word(bytes[j]) || bytes[j] == b'.') {
        j += 1;
    }
    let closed = j < bytes.len() && bytes[j] == b']';
    (closed && j > open + 1 && is_word(bytes[j - 1])).then_some(j)
}
