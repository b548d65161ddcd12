//! # Byte Codec
//!
//! Little-endian primitives shared by the record layout and the instruction
//! codec. Strings are a `u32 LE` byte length followed by UTF-8.

use crate::errors::LayoutError;

/// Length prefix width for strings.
pub const STRING_PREFIX_LENGTH: usize = 4;

/// Appends `value` as a length-prefixed string.
pub fn put_string(out: &mut Vec<u8>, value: &str) {
    // Validation bounds strings far below u32::MAX.
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value.as_bytes());
}

/// Length-prefixed encoding of `value` as a fresh buffer.
#[must_use]
pub fn string_bytes(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(STRING_PREFIX_LENGTH + value.len());
    put_string(&mut out, value);
    out
}

/// Cursor over a byte buffer.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Starts reading at the beginning of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consumes exactly `n` bytes.
    ///
    /// # Errors
    ///
    /// `BufferTooShort` if fewer than `n` bytes remain.
    pub fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], LayoutError> {
        if self.remaining() < n {
            return Err(LayoutError::BufferTooShort {
                field,
                needed: n,
                available: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consumes a fixed-width field.
    ///
    /// # Errors
    ///
    /// `BufferTooShort` if fewer than `N` bytes remain.
    pub fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], LayoutError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(field, N)?);
        Ok(out)
    }

    /// Consumes a length-prefixed string.
    ///
    /// # Errors
    ///
    /// `BufferTooShort` for a missing prefix, `LengthOverrun` when the prefix
    /// points past the buffer, `InvalidUtf8` for bad string bytes.
    pub fn string(&mut self, field: &'static str) -> Result<String, LayoutError> {
        let len = u32::from_le_bytes(self.array::<4>(field)?) as usize;
        if len > self.remaining() {
            return Err(LayoutError::LengthOverrun {
                field,
                declared: len,
                available: self.remaining(),
            });
        }
        let bytes = self.take(field, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| LayoutError::InvalidUtf8 { field })
    }
}
