//! Bit-level cursor over an in-memory CCBI buffer

use crate::error::CcbiError;

/// Forward-only byte/bit cursor over the file buffer
///
/// The encoder mixes byte-aligned fields (magic, floats, strings) with
/// bit-packed variable-length integers, so the cursor tracks both a byte
/// offset and a bit offset within the current byte. Bits are consumed
/// least-significant first. The cursor never moves backward.
pub struct BitCursor<'a> {
    data: &'a [u8],
    byte: usize,
    bit: u8,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, byte: 0, bit: 0 }
    }

    /// Read one byte at the current byte offset
    ///
    /// The bit offset is not consulted; the grammar only reads bytes at
    /// aligned positions (every varint ends with an align).
    pub fn read_byte(&mut self) -> Result<u8, CcbiError> {
        let b = *self.data.get(self.byte).ok_or(CcbiError::TruncatedInput)?;
        self.byte += 1;
        Ok(b)
    }

    /// Read one byte as a boolean (nonzero = true)
    pub fn read_bool(&mut self) -> Result<bool, CcbiError> {
        Ok(self.read_byte()? != 0)
    }

    /// Read `count` raw bytes as a slice of the underlying buffer
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], CcbiError> {
        let end = self.byte.checked_add(count).ok_or(CcbiError::TruncatedInput)?;
        let slice = self.data.get(self.byte..end).ok_or(CcbiError::TruncatedInput)?;
        self.byte = end;
        Ok(slice)
    }

    /// Read the next bit of the current byte, least-significant first
    pub fn read_bit(&mut self) -> Result<bool, CcbiError> {
        let byte = *self.data.get(self.byte).ok_or(CcbiError::TruncatedInput)?;
        let bit = byte & (1 << self.bit) != 0;
        self.bit += 1;
        if self.bit >= 8 {
            self.bit = 0;
            self.byte += 1;
        }
        Ok(bit)
    }

    /// Discard the remaining bits of the current byte
    ///
    /// No-op when already byte-aligned.
    pub fn align(&mut self) {
        if self.bit != 0 {
            self.bit = 0;
            self.byte += 1;
        }
    }

    /// Whether any unread bytes remain
    pub fn has_more(&self) -> bool {
        self.byte < self.data.len()
    }

    /// Current byte offset (for diagnostics)
    pub fn position(&self) -> usize {
        self.byte
    }
}
