//! CCBI: decoder for the compact binary scene-graph format
//!
//! This crate decodes compiled CCBI scene files (the bit-packed binary
//! resource format produced by the scene editor's publisher) into a neutral
//! in-memory document tree. It is the engine half of an offline transcoder:
//! a separate emitter renders the tree back into the editable textual CCB
//! property-list format.
//!
//! # Key Features
//!
//! - **Exact binary grammar**: the format has no self-describing tags for
//!   most fields, so every field is consumed in the width, order, and bit
//!   alignment the encoder used
//! - **Bit-level primitives**: non-byte-aligned variable-length integers and
//!   tag-prefixed floats, including an unaligned 4-byte literal fallback
//! - **Neutral output**: the decoder produces an owned [`CcbiDocument`] tree
//!   and performs no text emission itself
//!
//! # Format Overview
//!
//! A CCBI file contains, in order:
//! - Header: 4-byte magic, format version, a script-controlled flag
//! - String cache: every string referenced later, indexed by position
//! - Sequences: the global timeline list with callback and sound channels
//! - Node graph: one root node, recursively containing all children
//!
//! # Usage
//!
//! ```ignore
//! let data = std::fs::read("scene.ccbi")?;
//! let doc = ccbi::parse_ccbi(&data)?;
//!
//! println!("Root class: {}", doc.root.base_class);
//! println!("Sequences: {}", doc.sequences.len());
//! ```
//!
//! Decoding is single-pass and re-entrant: each call owns its own cursor and
//! string cache, so multiple files can be decoded concurrently with one call
//! each.

mod codec;
mod cursor;
mod document;
mod error;
mod parser;
mod strings;
mod types;

#[cfg(test)]
mod testutil;

pub use codec::{read_float, read_varint};
pub use cursor::BitCursor;
pub use document::{
    AnimatedChannel, CallbackKeyframe, CcbiDocument, Easing, Keyframe, Node, Property,
    PropertyValue, Sequence, SoundKeyframe,
};
pub use error::CcbiError;
pub use parser::parse_ccbi;
pub use strings::StringCache;
pub use types::PropertyType;

// =============================================================================
// Constants
// =============================================================================

/// File magic, stored little-endian (the first four bytes read `IBCC`)
pub const CCBI_MAGIC: u32 = u32::from_be_bytes(*b"CCBI");

/// Lowercase magic variant accepted for legacy files
pub const CCBI_MAGIC_LOWER: u32 = u32::from_be_bytes(*b"ccbi");

/// CCBI format version this reader supports
pub const CCBI_VERSION: i64 = 5;

/// Member variable assignment target meaning "no assignment"
pub const TARGET_TYPE_NONE: i64 = 0;

// =============================================================================
// Easing Constants
// =============================================================================

/// Keyframe easing kinds
pub mod easing {
    /// No interpolation, value snaps at the keyframe
    pub const INSTANT: i64 = 0;
    /// Linear interpolation
    pub const LINEAR: i64 = 1;
    /// Cubic ease-in (parameterized)
    pub const CUBIC_IN: i64 = 2;
    /// Cubic ease-out (parameterized)
    pub const CUBIC_OUT: i64 = 3;
    /// Cubic ease-in-out (parameterized)
    pub const CUBIC_IN_OUT: i64 = 4;
    /// Elastic ease-in (parameterized)
    pub const ELASTIC_IN: i64 = 5;
    /// Elastic ease-out (parameterized)
    pub const ELASTIC_OUT: i64 = 6;
    /// Elastic ease-in-out (parameterized)
    pub const ELASTIC_IN_OUT: i64 = 7;
    /// Bounce ease-in
    pub const BOUNCE_IN: i64 = 8;
    /// Bounce ease-out
    pub const BOUNCE_OUT: i64 = 9;
    /// Bounce ease-in-out
    pub const BOUNCE_IN_OUT: i64 = 10;
    /// Back ease-in
    pub const BACK_IN: i64 = 11;
    /// Back ease-out
    pub const BACK_OUT: i64 = 12;
    /// Back ease-in-out
    pub const BACK_IN_OUT: i64 = 13;

    /// The six parameterized kinds carry one extra float option in the stream
    pub fn has_opt(kind: i64) -> bool {
        (CUBIC_IN..=ELASTIC_IN_OUT).contains(&kind)
    }
}

// =============================================================================
// Tests
// =============================================================================
