//! CCBI decoding error types

use thiserror::Error;

/// CCBI decoding error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CcbiError {
    /// Input ended before a read could complete
    #[error("input ended before a read could complete")]
    TruncatedInput,
    /// File does not start with the CCBI magic
    #[error("bad magic 0x{0:08X} (expected 'CCBI' or 'ccbi')")]
    BadMagic(u32),
    /// File was published with a different format version
    #[error("unsupported CCBI version {0} (reader supports {supported})", supported = crate::CCBI_VERSION)]
    UnsupportedVersion(i64),
    /// A cached-string reference exceeds the string cache size
    #[error("string cache index {index} out of range (cache holds {len})")]
    StringCacheIndexOutOfRange { index: usize, len: usize },
    /// A property type id outside the fixed table, or the null sentinel
    #[error("unknown property type id {0}")]
    UnknownPropertyType(i64),
    /// A variable-length integer prefix wider than the value range allows
    #[error("corrupt variable-length integer ({0}-bit prefix)")]
    CorruptVarInt(u32),
}
