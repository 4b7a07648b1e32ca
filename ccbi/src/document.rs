//! Decoded document model
//!
//! The neutral output of the decoder: an owned tree the emitter walks
//! read-only. Nothing here is mutated after decode returns.

use crate::types::PropertyType;

/// A fully decoded CCBI file
#[derive(Debug, Clone, PartialEq)]
pub struct CcbiDocument {
    /// Whether the scene is script-controlled (from the header)
    pub js_controlled: bool,
    /// Global timeline definitions
    pub sequences: Vec<Sequence>,
    /// Root of the node graph
    pub root: Node,
}

/// One named timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Duration in seconds
    pub duration: f32,
    pub name: String,
    pub id: i64,
    /// Sequence chained after this one; encoded as -1 when absent
    pub chained_sequence_id: Option<i64>,
    pub callback_keyframes: Vec<CallbackKeyframe>,
    pub sound_keyframes: Vec<SoundKeyframe>,
}

/// Callback-channel keyframe
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackKeyframe {
    pub time: f32,
    pub name: String,
    pub callback_type: i64,
}

/// Sound-channel keyframe
#[derive(Debug, Clone, PartialEq)]
pub struct SoundKeyframe {
    pub time: f32,
    pub file: String,
    pub pitch: f32,
    pub pan: f32,
    pub gain: f32,
}

/// One node of the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub base_class: String,
    /// Controller class name, present only in script-controlled files
    pub js_controller: Option<String>,
    pub member_var_assignment_type: i64,
    /// Present unless the assignment type is the "none" sentinel
    pub member_var_assignment_name: Option<String>,
    pub animated_channels: Vec<AnimatedChannel>,
    pub properties: Vec<Property>,
    pub children: Vec<Node>,
}

impl Node {
    /// Total number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }
}

/// One animated property track on a node
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedChannel {
    /// Timeline this channel belongs to (grouping label for the emitter)
    pub sequence_id: i64,
    pub property_name: String,
    pub property_type: PropertyType,
    pub keyframes: Vec<Keyframe>,
}

/// Keyframe in an animated channel
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub easing: Easing,
    pub value: PropertyValue,
}

/// Keyframe easing, with the option float the parameterized kinds carry
#[derive(Debug, Clone, PartialEq)]
pub struct Easing {
    pub kind: i64,
    pub opt: Option<f32>,
}

/// Regular property on a node
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub kind: PropertyType,
    pub name: String,
    pub value: PropertyValue,
}

/// Decoded property payload, one variant per payload shape
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Position: point plus a unit/reference-corner subtype
    Position { x: f32, y: f32, unit: i64 },
    /// Size: dimensions plus a unit subtype
    Size { width: f32, height: f32, unit: i64 },
    /// Point and PointLock: a bare coordinate pair
    Point { x: f32, y: f32 },
    /// ScaleLock: scale pair plus a unit subtype
    ScaleLock { x: f32, y: f32, unit: i64 },
    /// Float and Degrees
    Float(f32),
    /// FloatXY, and the two-float keyframe shape of Position/ScaleLock
    FloatXY { x: f32, y: f32 },
    /// FloatScale: value plus a unit subtype
    FloatScale { value: f32, unit: i64 },
    /// FloatVar: value plus variance
    FloatVar { value: f32, variance: f32 },
    /// Integer and IntegerLabeled
    Integer(i64),
    /// Check: boolean flag
    Check(bool),
    /// SpriteFrame: sheet plus frame file
    SpriteFrame { sheet: String, file: String },
    /// Texture, FntFile, FontTTF, String, Text, CCBFile: one cached string
    String(String),
    /// Byte, with the encoder's 0xFF placeholder already remapped to 0
    Byte(u8),
    /// Color3: RGB bytes
    Color3 { r: u8, g: u8, b: u8 },
    /// Color4FVar: RGBA color plus per-channel variance
    Color4FVar { color: [f32; 4], variance: [f32; 4] },
    /// Flip: horizontal and vertical flags
    Flip { x: bool, y: bool },
    /// Blendmode: source and destination function codes
    BlendMode { src: i64, dst: i64 },
    /// Block: selector plus target code
    Block { selector: String, target: i64 },
    /// BlockCCControl: selector, target, control event mask
    BlockControl { selector: String, target: i64, control_events: i64 },
    /// Animation: animation file plus clip name
    Animation { file: String, name: String },
}
