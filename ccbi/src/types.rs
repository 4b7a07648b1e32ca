//! Property type table
//!
//! The binary grammar identifies each property payload by a numeric type id
//! with a fixed table of 29 entries. The closed enum below gives every id a
//! variant so decode, display, and animation-code lookups are exhaustive
//! matches; no id can be silently mishandled.

use crate::error::CcbiError;

/// Property type ids 0..28
///
/// Id 28 (`Null`) is a sentinel: it has a display name but no payload, so
/// value decoding treats it the same as an out-of-range id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Position,
    Size,
    Point,
    PointLock,
    ScaleLock,
    Degrees,
    Integer,
    Float,
    FloatVar,
    Check,
    SpriteFrame,
    Texture,
    Byte,
    Color3,
    Color4FVar,
    Flip,
    BlendMode,
    FntFile,
    Text,
    FontTtf,
    IntegerLabeled,
    Block,
    Animation,
    CcbFile,
    String,
    BlockCcControl,
    FloatScale,
    FloatXY,
    Null,
}

impl PropertyType {
    /// Map a raw type id to its table entry
    pub fn from_id(id: i64) -> Result<Self, CcbiError> {
        use PropertyType::*;
        Ok(match id {
            0 => Position,
            1 => Size,
            2 => Point,
            3 => PointLock,
            4 => ScaleLock,
            5 => Degrees,
            6 => Integer,
            7 => Float,
            8 => FloatVar,
            9 => Check,
            10 => SpriteFrame,
            11 => Texture,
            12 => Byte,
            13 => Color3,
            14 => Color4FVar,
            15 => Flip,
            16 => BlendMode,
            17 => FntFile,
            18 => Text,
            19 => FontTtf,
            20 => IntegerLabeled,
            21 => Block,
            22 => Animation,
            23 => CcbFile,
            24 => String,
            25 => BlockCcControl,
            26 => FloatScale,
            27 => FloatXY,
            28 => Null,
            _ => return Err(CcbiError::UnknownPropertyType(id)),
        })
    }

    /// The raw type id this variant occupies in the table
    pub fn id(self) -> i64 {
        use PropertyType::*;
        match self {
            Position => 0,
            Size => 1,
            Point => 2,
            PointLock => 3,
            ScaleLock => 4,
            Degrees => 5,
            Integer => 6,
            Float => 7,
            FloatVar => 8,
            Check => 9,
            SpriteFrame => 10,
            Texture => 11,
            Byte => 12,
            Color3 => 13,
            Color4FVar => 14,
            Flip => 15,
            BlendMode => 16,
            FntFile => 17,
            Text => 18,
            FontTtf => 19,
            IntegerLabeled => 20,
            Block => 21,
            Animation => 22,
            CcbFile => 23,
            String => 24,
            BlockCcControl => 25,
            FloatScale => 26,
            FloatXY => 27,
            Null => 28,
        }
    }

    /// Display name the editor uses for this type
    pub fn name(self) -> &'static str {
        use PropertyType::*;
        match self {
            Position => "Position",
            Size => "Size",
            Point => "Point",
            PointLock => "PointLock",
            ScaleLock => "ScaleLock",
            Degrees => "Degrees",
            Integer => "Integer",
            Float => "Float",
            FloatVar => "FloatVar",
            Check => "Check",
            SpriteFrame => "SpriteFrame",
            Texture => "Texture",
            Byte => "Byte",
            Color3 => "Color3",
            Color4FVar => "Color4FVar",
            Flip => "Flip",
            BlendMode => "Blendmode",
            FntFile => "FntFile",
            Text => "Text",
            FontTtf => "FontTTF",
            IntegerLabeled => "IntegerLabeled",
            Block => "Block",
            Animation => "Animation",
            CcbFile => "CCBFile",
            String => "String",
            BlockCcControl => "BlockCCControl",
            FloatScale => "FloatScale",
            FloatXY => "FloatXY",
            Null => "null",
        }
    }

    /// Numeric code used in place of the raw type id inside animated
    /// keyframe records; `None` for the 22 types that cannot be animated
    pub fn animated_code(self) -> Option<i32> {
        use PropertyType::*;
        match self {
            Check => Some(1),
            Degrees => Some(2),
            Position => Some(3),
            ScaleLock => Some(4),
            Byte => Some(5),
            Color3 => Some(6),
            SpriteFrame => Some(7),
            _ => None,
        }
    }
}
