//! Character decoding for page bytes.
//!
//! Pages captured from a tab may arrive as raw bytes in a legacy charset.
//! The declared charset is read from the first kilobyte and the bytes are
//! decoded to UTF-8 before the page is parsed.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Matches both `<meta charset=...>` and the `http-equiv` content-type form.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Bytes inspected when looking for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Detect the declared encoding of an HTML byte buffer, defaulting to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than rejected.
///
/// ```
/// use rs_lastmessage::encoding::transcode_to_utf8;
///
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(transcode_to_utf8(html).contains("Café"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }

    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utf8_without_declaration() {
        assert_eq!(detect_encoding(b"<p>hi</p>"), UTF_8);
    }

    #[test]
    fn reads_meta_charset() {
        let html = br#"<head><meta charset="ISO-8859-1"></head>"#;
        // WHATWG maps latin-1 onto windows-1252
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn reads_http_equiv_charset() {
        let html =
            br#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; CHARSET=windows-1252">"#;
        assert_eq!(detect_encoding(html).name(), "windows-1252");
    }

    #[test]
    fn ignores_unknown_labels() {
        let html = br#"<meta charset="no-such-charset">"#;
        assert_eq!(detect_encoding(html), UTF_8);
    }

    #[test]
    fn lossy_on_invalid_utf8() {
        let decoded = transcode_to_utf8(b"<p>Thanks \xFF\xFE see you</p>");
        assert!(decoded.contains("Thanks"));
        assert!(decoded.contains("see you"));
    }

    #[test]
    fn decodes_smart_quotes() {
        let html = b"<meta charset=\"windows-1252\"><p>\x93Hi\x94</p>";
        assert!(transcode_to_utf8(html).contains("\u{201C}Hi\u{201D}"));
    }
}
