//! PDF name-object escaping.
//!
//! Engine font names are raw bytes. Anything outside the printable ASCII
//! range, plus whitespace, the PDF delimiters and `#` itself, is written as
//! `#XX`. The escaped form is pure ASCII, which keeps the later UTF-16 widening
//! exact no matter what bytes the font name carried.

const DELIMITERS: &[u8] = b"()<>[]{}/%#";

fn is_regular(byte: u8) -> bool {
    (b'!'..=b'~').contains(&byte) && !DELIMITERS.contains(&byte)
}

/// Escapes raw name bytes into the body of a PDF name (without the leading `/`).
pub fn escape_name(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len());
    for &byte in raw {
        if is_regular(byte) {
            out.push(char::from(byte));
        } else {
            out.push('#');
            out.push_str(&format!("{byte:02X}"));
        }
    }
    out
}

/// Reverses [`escape_name`]. Malformed `#` sequences are kept literally.
pub fn unescape_name(escaped: &str) -> Vec<u8> {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn hex_digit(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).and_then(|d| u8::try_from(d).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(escape_name(b"Helvetica-BoldOblique"), "Helvetica-BoldOblique");
        assert_eq!(escape_name(b"ABCDEF+Arial,Bold"), "ABCDEF+Arial,Bold");
    }

    #[test]
    fn whitespace_and_delimiters_are_escaped() {
        assert_eq!(escape_name(b"Times New Roman"), "Times#20New#20Roman");
        assert_eq!(escape_name(b"A/B#C"), "A#2FB#23C");
    }

    #[test]
    fn non_ascii_bytes_are_escaped() {
        let escaped = escape_name("Ünicode".as_bytes());
        assert_eq!(escaped, "#C3#9Cnicode");
        assert!(escaped.is_ascii());
    }

    #[test]
    fn unescape_restores_bytes() {
        let raw = "Noto Sans 日本".as_bytes();
        assert_eq!(unescape_name(&escape_name(raw)), raw);
    }

    #[test]
    fn dangling_hash_is_literal() {
        assert_eq!(unescape_name("A#4"), b"A#4");
        assert_eq!(unescape_name("A#zz"), b"A#zz");
    }
}
