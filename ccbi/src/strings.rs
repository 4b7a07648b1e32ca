//! String cache decoding
//!
//! Every string the node graph and sequences reference is stored once, up
//! front, and referenced by index thereafter. The cache is decoded exactly
//! once per file, right after the header, and is read-only from then on.

use crate::codec::read_varint;
use crate::cursor::BitCursor;
use crate::error::CcbiError;

/// Index-addressed table of all strings in the file
#[derive(Debug, Clone, Default)]
pub struct StringCache {
    strings: Vec<String>,
}

impl StringCache {
    /// Decode the string cache section: a count, then that many entries,
    /// each a 16-bit big-endian length prefix followed by UTF-8 bytes
    pub fn decode(cursor: &mut BitCursor<'_>) -> Result<Self, CcbiError> {
        let count = read_varint(cursor, false)? as usize;
        let mut strings = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            strings.push(read_utf8(cursor)?);
        }
        Ok(Self { strings })
    }

    /// Look up a string by cache index
    pub fn get(&self, index: usize) -> Result<&str, CcbiError> {
        self.strings
            .get(index)
            .map(String::as_str)
            .ok_or(CcbiError::StringCacheIndexOutOfRange {
                index,
                len: self.strings.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

fn read_utf8(cursor: &mut BitCursor<'_>) -> Result<String, CcbiError> {
    let hi = cursor.read_byte()? as usize;
    let lo = cursor.read_byte()? as usize;
    let len = hi << 8 | lo;
    let bytes = cursor.read_bytes(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
