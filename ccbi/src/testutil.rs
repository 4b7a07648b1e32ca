//! Test fixture encoder
//!
//! The decoder is one-way by design, so tests synthesize their own byte
//! streams with this writer. It mirrors the reader exactly: bits are packed
//! least-significant first, varints byte-align after the terminated
//! mantissa, strings carry a big-endian 16-bit length prefix.

/// Bit-packing writer for building CCBI fixtures in tests
pub struct BitWriter {
    bytes: Vec<u8>,
    bit: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self { bytes: Vec::new(), bit: 0 }
    }

    pub fn write_bit(&mut self, bit: bool) {
        if self.bit == 0 {
            self.bytes.push(0);
        }
        if bit {
            *self.bytes.last_mut().unwrap() |= 1 << self.bit;
        }
        self.bit = (self.bit + 1) % 8;
    }

    pub fn align(&mut self) {
        self.bit = 0;
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.align();
        self.bytes.push(byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align();
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_byte(value as u8);
    }

    /// Encode a varint the way the publisher does: unary zero-run prefix,
    /// terminator bit, then the mantissa MSB-first without its leading one
    pub fn write_varint(&mut self, value: i64, signed: bool) {
        let acc: u64 = if signed {
            if value >= 0 {
                value as u64 * 2 + 1
            } else {
                value.unsigned_abs() * 2
            }
        } else {
            value as u64 + 1
        };
        let num_bits = 63 - acc.leading_zeros();
        for _ in 0..num_bits {
            self.write_bit(false);
        }
        self.write_bit(true);
        for a in (0..num_bits).rev() {
            self.write_bit(acc & (1 << a) != 0);
        }
        self.align();
    }

    /// Write a float as a tagged 4-byte literal
    pub fn write_float(&mut self, value: f32) {
        self.write_byte(5);
        self.write_bytes(&value.to_le_bytes());
    }

    /// Write a length-prefixed UTF-8 string (string cache entry format)
    pub fn write_utf8(&mut self, s: &str) {
        let len = s.len() as u16;
        self.write_bytes(&len.to_be_bytes());
        self.write_bytes(s.as_bytes());
    }

    /// Write a string cache section from the given entries
    pub fn write_string_cache(&mut self, strings: &[&str]) {
        self.write_varint(strings.len() as i64, false);
        for s in strings {
            self.write_utf8(s);
        }
    }

    /// Write the file header: magic, supported version, jsControlled flag
    pub fn write_header(&mut self, js_controlled: bool) {
        self.write_bytes(&crate::CCBI_MAGIC.to_le_bytes());
        self.write_varint(crate::CCBI_VERSION, false);
        self.write_bool(js_controlled);
    }

    /// Write an empty sequence section (zero sequences plus the footer)
    pub fn write_empty_sequences(&mut self) {
        self.write_varint(0, false);
        self.write_varint(0, true);
    }

    /// Write a leaf node: class name by cache index, no assignment, no
    /// animated channels, no properties, no children
    pub fn write_empty_node(&mut self, class_index: i64) {
        self.write_varint(class_index, false); // class name
        self.write_varint(crate::TARGET_TYPE_NONE, false); // member var assignment
        self.write_varint(0, false); // animated sequence count
        self.write_varint(0, false); // regular property count
        self.write_varint(0, false); // extra property count
        self.write_varint(0, false); // child count
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        // Unsigned 5: acc = 6 = 0b110, two-bit prefix -> bits 0,0,1,1,0
        let mut w = BitWriter::new();
        w.write_varint(5, false);
        assert_eq!(w.into_bytes(), vec![0b0000_1100]);

        // Signed -1: acc = 2 = 0b10 -> bits 0,1,0
        let mut w = BitWriter::new();
        w.write_varint(-1, true);
        assert_eq!(w.into_bytes(), vec![0b0000_0010]);
    }

    #[test]
    fn test_utf8_length_prefix_is_big_endian() {
        let mut w = BitWriter::new();
        w.write_utf8("abc");
        assert_eq!(w.into_bytes(), vec![0x00, 0x03, b'a', b'b', b'c']);
    }
}
