//! General naming rules for dataset objects.
//!
//! A valid name:
//! - Must be non-empty valid UTF-8
//! - Must be at most [`MAX_NAME`] bytes
//! - Must start with a letter, digit, or `_` (or any non-ASCII character)
//! - Must not contain `/`
//! - Must not contain ASCII control characters or DEL
//! - Must not end with ASCII whitespace

use cdf_types::MAX_NAME;

use crate::error::{NameError, Result};

fn invalid(name: &str, reason: impl Into<String>) -> NameError {
    NameError::Invalid {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a name, returning `Ok(())` if valid.
///
/// Rules are applied to the name as supplied, before normalization.
///
/// # Examples
///
/// ```
/// use cdf_names::check_name;
///
/// assert!(check_name("time").is_ok());
/// assert!(check_name("_FillValue").is_ok());
/// assert!(check_name("").is_err());
/// assert!(check_name("a/b").is_err());
/// ```
pub fn check_name(raw: impl AsRef<[u8]>) -> Result<()> {
    let name = std::str::from_utf8(raw.as_ref())?;

    if name.is_empty() {
        return Err(invalid(name, "name must not be empty"));
    }

    if name.len() > MAX_NAME {
        return Err(NameError::TooLong {
            len: name.len(),
            max: MAX_NAME,
        });
    }

    if name.contains('/') {
        return Err(invalid(name, "must not contain '/'"));
    }

    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        if first.is_ascii() && !(first.is_ascii_alphanumeric() || first == '_') {
            return Err(invalid(
                name,
                format!("must start with a letter, digit, or '_', not {first:?}"),
            ));
        }
    }

    if let Some(ch) = name.chars().find(|c| c.is_ascii_control()) {
        return Err(invalid(name, format!("contains control character: {ch:?}")));
    }

    if name.ends_with(|c: char| c.is_ascii_whitespace()) {
        return Err(invalid(name, "must not end with whitespace"));
    }

    Ok(())
}
