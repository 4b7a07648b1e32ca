//! Variable-length integer and float codecs
//!
//! Integers use a universal-code style encoding: a unary run of zero bits
//! gives the mantissa width, a one bit terminates the run, and the mantissa
//! follows most-significant bit first with its leading one left implicit.
//! The encoder byte-aligns after every integer. Floats are tag-prefixed,
//! with fast-path tags for common constants and a raw little-endian literal
//! fallback that is *not* 4-byte aligned in the stream.

use crate::cursor::BitCursor;
use crate::error::CcbiError;

// Float tag bytes. Any tag beyond the integer fast path falls through to the
// 4-byte literal read; the publisher emits FLOAT_LITERAL (5) for it.
const FLOAT_0: u8 = 0;
const FLOAT_1: u8 = 1;
const FLOAT_MINUS1: u8 = 2;
const FLOAT_05: u8 = 3;
const FLOAT_INTEGER: u8 = 4;

/// Read one variable-length integer
///
/// Unsigned values decode to `acc - 1`; signed values use the lowest bit of
/// `acc` as a sign flag (odd = non-negative). The cursor is byte-aligned
/// after the read regardless of how many bits were consumed.
pub fn read_varint(cursor: &mut BitCursor<'_>, signed: bool) -> Result<i64, CcbiError> {
    // Unary prefix: count zero bits up to the terminating one bit
    let mut num_bits: u32 = 0;
    while !cursor.read_bit()? {
        num_bits += 1;
    }
    // 62 bits keeps acc strictly below 2^63, so the i64 conversions below
    // cannot overflow
    if num_bits > 62 {
        return Err(CcbiError::CorruptVarInt(num_bits));
    }

    // Mantissa, most-significant bit first
    let mut acc: u64 = 0;
    for a in (0..num_bits).rev() {
        if cursor.read_bit()? {
            acc |= 1u64 << a;
        }
    }
    // Restore the implicit leading one dropped by the prefix encoding
    acc |= 1u64 << num_bits;

    let num = if signed {
        if acc & 1 != 0 {
            (acc / 2) as i64
        } else {
            -((acc / 2) as i64)
        }
    } else {
        acc as i64 - 1
    };

    cursor.align();
    Ok(num)
}

/// Read one tag-prefixed float
pub fn read_float(cursor: &mut BitCursor<'_>) -> Result<f32, CcbiError> {
    let tag = cursor.read_byte()?;
    match tag {
        FLOAT_0 => Ok(0.0),
        FLOAT_1 => Ok(1.0),
        FLOAT_MINUS1 => Ok(-1.0),
        FLOAT_05 => Ok(0.5),
        FLOAT_INTEGER => Ok(read_varint(cursor, true)? as f32),
        _ => {
            // Literal: 4 raw bytes, little-endian, at whatever offset the
            // cursor happens to be (frequently not 4-byte aligned)
            let bytes = cursor.read_bytes(4)?;
            Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        }
    }
}
