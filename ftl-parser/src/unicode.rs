//! Decoding of escape sequences in parsed string literals.
//!
//! The parser stores string literals with their escapes still encoded
//! (`\\`, `\"`, `\uXXXX`, `\UXXXXXX`). Consumers call [`unescape_unicode`]
//! to obtain the textual form. Malformed escapes decode to U+FFFD.

use std::borrow::Cow;

const UNKNOWN_CHAR: char = '\u{FFFD}';

fn encode_unicode(sequence: &str, expected_len: usize) -> char {
    if sequence.chars().count() != expected_len {
        return UNKNOWN_CHAR;
    }
    u32::from_str_radix(sequence, 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(UNKNOWN_CHAR)
}

/// Decode `\\`, `\"`, `\uXXXX` and `\UXXXXXX` sequences in `input`.
///
/// Borrows the input when it contains no backslash. A `\u`/`\U` escape with
/// missing or non-hex digits, a value outside the Unicode scalar range, an
/// unknown escape, or a lone trailing `\` all decode to U+FFFD; the cursor
/// always advances past every character the escape consumed.
pub fn unescape_unicode(input: &str) -> Cow<'_, str> {
    let Some(first_backslash) = input.find('\\') else {
        return Cow::Borrowed(input);
    };

    let mut result = String::with_capacity(input.len());
    result.push_str(&input[..first_backslash]);

    let mut chars = input[first_backslash..].chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some(u @ ('u' | 'U')) => {
                let len = if u == 'u' { 4 } else { 6 };
                let sequence: String = chars.by_ref().take(len).collect();
                result.push(encode_unicode(&sequence, len));
            }
            _ => result.push(UNKNOWN_CHAR),
        }
    }
    Cow::Owned(result)
}
