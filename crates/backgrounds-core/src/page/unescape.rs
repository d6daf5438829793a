//! Backslash escape decoding for the embedded JS string literal.

use std::iter::Peekable;
use std::str::Chars;

/// Decodes backslash escapes in one pass.
///
/// Handles `\uXXXX` (surrogate pairs are combined, lone surrogates become
/// U+FFFD), `\UXXXXXXXX`, `\xHH`, octal `\ooo`, line continuations and the
/// single-character escapes. Unknown escapes such as `\/` are kept verbatim
/// so later cleanup can decide what to do with them. An escaped backslash
/// yields one backslash and is not re-scanned, so `\\u003d` decodes to the
/// text `\u003d`.
pub(crate) fn decode_escapes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '\n' => {}
            'x' => push_code(&mut out, &mut chars, 2, "\\x"),
            'U' => push_code(&mut out, &mut chars, 8, "\\U"),
            'u' => push_utf16(&mut out, &mut chars),
            '0'..='7' => {
                let mut code = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

/// Reads exactly `n` hex digits. On a short read returns the digits consumed.
fn take_hex(chars: &mut Peekable<Chars<'_>>, n: usize) -> Result<u32, String> {
    let mut digits = String::with_capacity(n);
    while digits.len() < n {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => return Err(digits),
        }
    }
    u32::from_str_radix(&digits, 16).map_err(|_| digits)
}

fn push_code(out: &mut String, chars: &mut Peekable<Chars<'_>>, n: usize, prefix: &str) {
    match take_hex(chars, n) {
        Ok(code) => out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
        Err(partial) => {
            out.push_str(prefix);
            out.push_str(&partial);
        }
    }
}

fn push_utf16(out: &mut String, chars: &mut Peekable<Chars<'_>>) {
    let high = match take_hex(chars, 4) {
        Ok(code) => code,
        Err(partial) => {
            out.push_str("\\u");
            out.push_str(&partial);
            return;
        }
    };
    if !(0xD800..0xDC00).contains(&high) {
        out.push(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        return;
    }

    let mut ahead = chars.clone();
    let low = match (ahead.next(), ahead.next()) {
        (Some('\\'), Some('u')) => take_hex(&mut ahead, 4)
            .ok()
            .filter(|lo| (0xDC00..0xE000).contains(lo)),
        _ => None,
    };
    match low {
        Some(low) => {
            *chars = ahead;
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_and_unicode_escapes() {
        assert_eq!(decode_escapes(r"\x22a\x22"), "\"a\"");
        assert_eq!(decode_escapes(r"caf\u00e9"), "caf\u{e9}");
        assert_eq!(decode_escapes(r"\U0001F600"), "\u{1F600}");
    }

    #[test]
    fn surrogate_pair_combined() {
        assert_eq!(decode_escapes(r"\ud83d\ude00!"), "\u{1F600}!");
        assert_eq!(decode_escapes(r"\ud83dx"), "\u{FFFD}x");
    }

    #[test]
    fn escaped_backslash_is_not_rescanned() {
        assert_eq!(decode_escapes(r"a\\u003db"), r"a\u003db");
        assert_eq!(decode_escapes(r"a\u003db"), "a=b");
    }

    #[test]
    fn unknown_escape_kept_verbatim() {
        assert_eq!(decode_escapes(r"https:\/\/x"), r"https:\/\/x");
    }

    #[test]
    fn simple_and_octal_escapes() {
        assert_eq!(decode_escapes(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(decode_escapes(r"\101\0"), "A\0");
        assert_eq!(decode_escapes(r"it\'s"), "it's");
    }

    #[test]
    fn truncated_escapes_are_left_alone() {
        assert_eq!(decode_escapes(r"\x2"), r"\x2");
        assert_eq!(decode_escapes(r"\uzz"), r"\uzz");
        assert_eq!(decode_escapes("end\\"), "end\\");
    }
}
