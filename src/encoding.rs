//! Decoding saved pages to UTF-8.
//!
//! Pages handed to the `clip_page` binary arrive as raw bytes from disk or
//! stdin. The charset comes from a byte-order mark, then from the first
//! `<meta>` declaration, then falls back to UTF-8.

use encoding_rs::{Encoding, UTF_8};

use crate::patterns::{CHARSET_META, CONTENT_TYPE_CHARSET};

/// How far into the document a `<meta>` charset declaration is looked for.
const SNIFF_LEN: usize = 1024;

/// Encoding of an HTML byte stream.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);

    [&*CHARSET_META, &*CONTENT_TYPE_CHARSET]
        .iter()
        .filter_map(|re| re.captures(&head))
        .filter_map(|caps| caps.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Malformed sequences become U+FFFD; decoding never fails.
///
/// ```
/// use webclip::encoding::decode_html;
///
/// let html = b"<html><body>caf\xe9</body></html><meta charset=latin1>";
/// assert!(decode_html(html).contains("caf\u{e9}"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, had_errors) = encoding.decode_with_bom_removal(html);
    if had_errors {
        log::debug!("Replaced malformed {} sequences while decoding page", encoding.name());
    }
    decoded.into_owned()
}
