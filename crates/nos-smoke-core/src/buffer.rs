//! Heap buffer lifecycle: allocate, zero, resize, release.
//!
//! Allocation goes through `try_reserve_exact` so exhaustion surfaces as a
//! [`BufferError`] instead of aborting the process. Release is `Drop`.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::string;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("failed to allocate {requested} bytes: {source}")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("failed to resize buffer from {from} to {to} bytes: {source}")]
    Resize {
        from: usize,
        to: usize,
        #[source]
        source: TryReserveError,
    },
}

/// A fixed-size, NUL-terminated text buffer (the `malloc`/`realloc` analogue).
#[derive(Debug)]
pub struct TextBuffer {
    bytes: Vec<u8>,
}

impl TextBuffer {
    /// Acquires `size` bytes, all zero.
    pub fn allocate(size: usize) -> Result<Self, BufferError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(size)
            .map_err(|source| BufferError::Alloc {
                requested: size,
                source,
            })?;
        bytes.resize(size, 0);
        Ok(Self { bytes })
    }

    /// Size of the buffer in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Fills the whole buffer with `value` (`memset`).
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    /// Overwrites the contents with the C string `text` (`strcpy`).
    ///
    /// Returns the number of bytes written, excluding the terminator.
    pub fn write_str(&mut self, text: &[u8]) -> usize {
        string::strcpy(&mut self.bytes, text)
    }

    /// Appends `text` to the current C string (`strcat`).
    pub fn append_str(&mut self, text: &[u8]) -> usize {
        string::strcat(&mut self.bytes, text)
    }

    /// Current C string length (`strlen`).
    #[must_use]
    pub fn text_len(&self) -> usize {
        string::strlen(&self.bytes)
    }

    /// Current contents as text, up to the first NUL.
    #[must_use]
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        string::as_text(&self.bytes)
    }

    /// Resizes to `new_size` bytes, preserving the existing prefix and
    /// zero-filling any growth (`realloc`).
    ///
    /// Consumes the buffer: on failure the original allocation is released
    /// before the error is returned.
    pub fn resize(mut self, new_size: usize) -> Result<Self, BufferError> {
        let from = self.bytes.len();
        if new_size > from {
            self.bytes
                .try_reserve_exact(new_size - from)
                .map_err(|source| BufferError::Resize {
                    from,
                    to: new_size,
                    source,
                })?;
        }
        self.bytes.resize(new_size, 0);
        if new_size < from
            && let Some(last) = self.bytes.last_mut()
        {
            *last = 0;
        }
        Ok(self)
    }
}

/// Acquires a zero-initialised array of `count` integers (`calloc`).
pub fn zeroed_ints(count: usize) -> Result<Vec<i32>, BufferError> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(count)
        .map_err(|source| BufferError::Alloc {
            requested: count.saturating_mul(std::mem::size_of::<i32>()),
            source,
        })?;
    values.resize(count, 0);
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_zeroed() {
        let buf = TextBuffer::allocate(64).unwrap();
        assert_eq!(buf.size(), 64);
        assert_eq!(buf.text_len(), 0);
    }

    #[test]
    fn allocate_impossible_size_fails() {
        let err = TextBuffer::allocate(usize::MAX).unwrap_err();
        assert!(matches!(err, BufferError::Alloc { requested, .. } if requested == usize::MAX));
    }

    #[test]
    fn resize_preserves_prefix() {
        let mut buf = TextBuffer::allocate(16).unwrap();
        buf.write_str(b"Hello, NOS!");
        let buf = buf.resize(32).unwrap();
        assert_eq!(buf.size(), 32);
        assert_eq!(buf.text(), "Hello, NOS!");
    }

    #[test]
    fn resize_then_extend() {
        let mut buf = TextBuffer::allocate(8).unwrap();
        buf.write_str(b"Hello");
        let mut buf = buf.resize(32).unwrap();
        buf.append_str(b", extended world");
        assert_eq!(buf.text(), "Hello, extended world");
    }

    #[test]
    fn shrinking_keeps_terminator() {
        let mut buf = TextBuffer::allocate(16).unwrap();
        buf.write_str(b"abcdefghij");
        let buf = buf.resize(4).unwrap();
        assert_eq!(buf.text(), "abc");
    }

    #[test]
    fn resize_failure_reports_sizes() {
        let buf = TextBuffer::allocate(8).unwrap();
        let err = buf.resize(usize::MAX).unwrap_err();
        assert!(matches!(err, BufferError::Resize { from: 8, .. }));
    }

    #[test]
    fn zeroed_ints_are_zero() {
        let values = zeroed_ints(10).unwrap();
        assert_eq!(values, vec![0; 10]);
        assert!(zeroed_ints(usize::MAX).is_err());
    }
}
