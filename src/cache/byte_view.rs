//! Byte View Module
//!
//! Immutable view over the bytes of a cached value.

use std::fmt;
use std::sync::Arc;

use crate::cache::CacheValue;

// == Byte View ==
/// An immutable, cheaply clonable view over a byte sequence.
///
/// Clones share the backing buffer. Nothing hands out mutable access to it;
/// callers that want bytes they can modify receive a copy from [`ByteView::to_vec`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view holding a copy of `bytes`.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }

    /// Returns the number of bytes in the view.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows the bytes read-only.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns an owned copy of the bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Decodes the bytes as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::copy_from(&[])
    }
}

impl From<Vec<u8>> for ByteView {
    /// Takes ownership of the buffer; no other handle to it survives the move.
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&str> for ByteView {
    fn from(value: &str) -> Self {
        Self::copy_from(value.as_bytes())
    }
}

impl CacheValue for ByteView {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteView")
            .field(&self.to_string_lossy())
            .finish()
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
