//! The owned, canonical name stored by every dimension.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{NameError, Result};
use crate::normalize::normalize;

/// A canonical name with a fixed byte capacity.
///
/// The capacity is the byte length of the name the buffer was built with.
/// Once a dataset header has been written the name field occupies exactly
/// that many bytes on disk, so in-place rewrites ([`NameBuf::rewrite`]) may
/// shrink the name but never grow it. Wholesale replacement
/// ([`NameBuf::replace`]) builds a fresh buffer with a fresh capacity.
#[derive(PartialEq, Eq, Hash)]
pub struct NameBuf {
    text: String,
    capacity: usize,
}

impl NameBuf {
    /// Normalize `raw` and store it.
    pub fn new(raw: impl AsRef<[u8]>) -> Result<Self> {
        let canonical = normalize(raw)?;
        Self::from_canonical(&canonical)
    }

    /// Store text that is already canonical.
    ///
    /// The bytes are copied into an exactly sized allocation; an allocation
    /// failure is reported instead of aborting.
    pub fn from_canonical(canonical: &str) -> Result<Self> {
        let mut text = String::new();
        text.try_reserve_exact(canonical.len())?;
        text.push_str(canonical);
        Ok(Self {
            capacity: canonical.len(),
            text,
        })
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Largest byte length an in-place rewrite may store.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Build a replacement buffer from raw text.
    pub fn replace(&self, raw: impl AsRef<[u8]>) -> Result<Self> {
        Self::new(raw)
    }

    /// Overwrite the content in place with canonical text.
    ///
    /// Fails without touching the buffer if `canonical` is longer than
    /// [`capacity`](Self::capacity).
    pub fn rewrite(&mut self, canonical: &str) -> Result<()> {
        if canonical.len() > self.capacity {
            return Err(NameError::CapacityExceeded {
                needed: canonical.len(),
                capacity: self.capacity,
            });
        }
        // The allocation already spans `capacity` bytes, so this never
        // reallocates.
        self.text.clear();
        self.text.push_str(canonical);
        Ok(())
    }

    /// Deep copy with the same content and capacity.
    pub fn try_clone(&self) -> Result<Self> {
        let mut text = String::new();
        text.try_reserve_exact(self.capacity)?;
        text.push_str(&self.text);
        Ok(Self {
            text,
            capacity: self.capacity,
        })
    }
}

impl AsRef<str> for NameBuf {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<str> for NameBuf {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for NameBuf {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl fmt::Debug for NameBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameBuf")
            .field("text", &self.text)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl fmt::Display for NameBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for NameBuf {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
