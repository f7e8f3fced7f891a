//! Canonical text normalization.

use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::error::Result;

/// Convert raw name bytes to their canonical form.
///
/// The input must be UTF-8. The canonical form is its NFC composition, so
/// `"e\u{301}"` and `"\u{e9}"` name the same object.
///
/// # Examples
///
/// ```
/// use cdf_names::normalize;
///
/// assert_eq!(normalize("cafe\u{301}").unwrap(), "caf\u{e9}");
/// assert!(normalize(b"\xff\xfe").is_err());
/// ```
pub fn normalize(raw: impl AsRef<[u8]>) -> Result<String> {
    let text = std::str::from_utf8(raw.as_ref())?;
    if is_nfc(text) {
        return Ok(text.to_owned());
    }
    Ok(text.nfc().collect())
}
