//! CCBI decode driver
//!
//! Single-pass recursive descent over the whole buffer: header, string
//! cache, sequences, then the node graph. Every stage consumes the cursor
//! strictly left to right; nothing rewinds.

use crate::codec::{read_float, read_varint};
use crate::cursor::BitCursor;
use crate::document::{
    AnimatedChannel, CallbackKeyframe, CcbiDocument, Easing, Keyframe, Node, Property,
    PropertyValue, Sequence, SoundKeyframe,
};
use crate::error::CcbiError;
use crate::strings::StringCache;
use crate::types::PropertyType;
use crate::{easing, CCBI_MAGIC, CCBI_MAGIC_LOWER, CCBI_VERSION, TARGET_TYPE_NONE};

/// Decode a complete CCBI file from memory
///
/// # Arguments
/// * `data` - Raw CCBI file bytes
///
/// # Returns
/// * `Ok(CcbiDocument)` - Decoded document tree
/// * `Err(CcbiError)` - Decode error
///
/// # Example
/// ```ignore
/// let data = std::fs::read("scene.ccbi")?;
/// let doc = ccbi::parse_ccbi(&data)?;
/// println!("Root: {}", doc.root.base_class);
/// ```
pub fn parse_ccbi(data: &[u8]) -> Result<CcbiDocument, CcbiError> {
    let mut cursor = BitCursor::new(data);

    // Magic is stored little-endian, so a valid file begins "IBCC"
    let magic_bytes = cursor.read_bytes(4)?;
    let magic = u32::from_le_bytes([magic_bytes[0], magic_bytes[1], magic_bytes[2], magic_bytes[3]]);
    if magic != CCBI_MAGIC && magic != CCBI_MAGIC_LOWER {
        return Err(CcbiError::BadMagic(magic));
    }

    let version = read_varint(&mut cursor, false)?;
    if version != CCBI_VERSION {
        return Err(CcbiError::UnsupportedVersion(version));
    }

    let js_controlled = cursor.read_bool()?;
    let strings = StringCache::decode(&mut cursor)?;

    let mut decoder = Decoder {
        cursor,
        strings,
        js_controlled,
    };
    let sequences = decoder.decode_sequences()?;
    let root = decoder.decode_node()?;

    Ok(CcbiDocument {
        js_controlled,
        sequences,
        root,
    })
}

/// Per-invocation decode state: the cursor, the write-once string cache,
/// and the header flag consulted during node decode. Threaded explicitly so
/// each call is independent (no globals).
struct Decoder<'a> {
    cursor: BitCursor<'a>,
    strings: StringCache,
    js_controlled: bool,
}

impl Decoder<'_> {
    fn read_uint(&mut self) -> Result<i64, CcbiError> {
        read_varint(&mut self.cursor, false)
    }

    fn read_int(&mut self) -> Result<i64, CcbiError> {
        read_varint(&mut self.cursor, true)
    }

    fn read_float(&mut self) -> Result<f32, CcbiError> {
        read_float(&mut self.cursor)
    }

    fn read_cached_string(&mut self) -> Result<String, CcbiError> {
        let index = self.read_uint()? as usize;
        Ok(self.strings.get(index)?.to_owned())
    }

    // =========================================================================
    // Sequences
    // =========================================================================

    fn decode_sequences(&mut self) -> Result<Vec<Sequence>, CcbiError> {
        let count = self.read_uint()?;
        let mut sequences = Vec::with_capacity(count.clamp(0, 64) as usize);

        for _ in 0..count {
            let duration = self.read_float()?;
            let name = self.read_cached_string()?;
            let id = self.read_uint()?;

            let chained = self.read_int()?;
            let chained_sequence_id = (chained != -1).then_some(chained);

            let callback_keyframes = self.decode_callback_keyframes()?;
            let sound_keyframes = self.decode_sound_keyframes()?;

            sequences.push(Sequence {
                duration,
                name,
                id,
                chained_sequence_id,
                callback_keyframes,
                sound_keyframes,
            });
        }

        // Fixed-format footer, value unused
        self.read_int()?;

        Ok(sequences)
    }

    fn decode_callback_keyframes(&mut self) -> Result<Vec<CallbackKeyframe>, CcbiError> {
        let count = self.read_uint()?;
        let mut keyframes = Vec::with_capacity(count.clamp(0, 256) as usize);
        for _ in 0..count {
            let time = self.read_float()?;
            let name = self.read_cached_string()?;
            let callback_type = self.read_uint()?;
            keyframes.push(CallbackKeyframe {
                time,
                name,
                callback_type,
            });
        }
        Ok(keyframes)
    }

    fn decode_sound_keyframes(&mut self) -> Result<Vec<SoundKeyframe>, CcbiError> {
        let count = self.read_uint()?;
        let mut keyframes = Vec::with_capacity(count.clamp(0, 256) as usize);
        for _ in 0..count {
            let time = self.read_float()?;
            let file = self.read_cached_string()?;
            let pitch = self.read_float()?;
            let pan = self.read_float()?;
            let gain = self.read_float()?;
            keyframes.push(SoundKeyframe {
                time,
                file,
                pitch,
                pan,
                gain,
            });
        }
        Ok(keyframes)
    }

    // =========================================================================
    // Node graph
    // =========================================================================

    fn decode_node(&mut self) -> Result<Node, CcbiError> {
        let base_class = self.read_cached_string()?;

        let js_controller = if self.js_controlled {
            Some(self.read_cached_string()?)
        } else {
            None
        };

        let member_var_assignment_type = self.read_uint()?;
        let member_var_assignment_name = if member_var_assignment_type != TARGET_TYPE_NONE {
            Some(self.read_cached_string()?)
        } else {
            None
        };

        // Animated channels, grouped by timeline
        let mut animated_channels = Vec::new();
        let num_sequences = self.read_uint()?;
        for _ in 0..num_sequences {
            let sequence_id = self.read_uint()?;
            let num_props = self.read_uint()?;
            for _ in 0..num_props {
                let property_name = self.read_cached_string()?;
                let property_type = PropertyType::from_id(self.read_uint()?)?;
                let num_keyframes = self.read_uint()?;
                let mut keyframes = Vec::with_capacity(num_keyframes.clamp(0, 256) as usize);
                for _ in 0..num_keyframes {
                    keyframes.push(self.decode_keyframe(property_type)?);
                }
                animated_channels.push(AnimatedChannel {
                    sequence_id,
                    property_name,
                    property_type,
                    keyframes,
                });
            }
        }

        // Regular properties; the regular/extra split only affects labeling
        let num_regular = self.read_uint()?;
        let num_extra = self.read_uint()?;
        let total = num_regular.saturating_add(num_extra);
        let mut properties = Vec::with_capacity(total.clamp(0, 256) as usize);
        for _ in 0..total {
            let kind = PropertyType::from_id(self.read_uint()?)?;
            let name = self.read_cached_string()?;
            // Platform filter byte, consumed but not branched on
            let _platform = self.cursor.read_byte()?;
            let value = self.decode_value(kind)?;
            properties.push(Property { kind, name, value });
        }

        let num_children = self.read_uint()?;
        let mut children = Vec::with_capacity(num_children.clamp(0, 256) as usize);
        for _ in 0..num_children {
            children.push(self.decode_node()?);
        }

        Ok(Node {
            base_class,
            js_controller,
            member_var_assignment_type,
            member_var_assignment_name,
            animated_channels,
            properties,
            children,
        })
    }

    fn decode_keyframe(&mut self, kind: PropertyType) -> Result<Keyframe, CcbiError> {
        let time = self.read_float()?;
        let easing_kind = self.read_uint()?;
        let opt = if easing::has_opt(easing_kind) {
            Some(self.read_float()?)
        } else {
            None
        };
        let value = self.decode_keyframe_value(kind)?;
        Ok(Keyframe {
            time,
            easing: Easing {
                kind: easing_kind,
                opt,
            },
            value,
        })
    }

    /// Keyframe payloads cover only the animatable subset, and Position and
    /// ScaleLock shrink to a bare float pair (no unit subtype)
    fn decode_keyframe_value(&mut self, kind: PropertyType) -> Result<PropertyValue, CcbiError> {
        Ok(match kind {
            PropertyType::Check => PropertyValue::Check(self.cursor.read_bool()?),
            PropertyType::Byte => PropertyValue::Byte(self.read_byte_value()?),
            PropertyType::Color3 => PropertyValue::Color3 {
                r: self.cursor.read_byte()?,
                g: self.cursor.read_byte()?,
                b: self.cursor.read_byte()?,
            },
            PropertyType::Degrees => PropertyValue::Float(self.read_float()?),
            PropertyType::ScaleLock | PropertyType::Position | PropertyType::FloatXY => {
                PropertyValue::FloatXY {
                    x: self.read_float()?,
                    y: self.read_float()?,
                }
            }
            PropertyType::SpriteFrame => PropertyValue::SpriteFrame {
                sheet: self.read_cached_string()?,
                file: self.read_cached_string()?,
            },
            other => return Err(CcbiError::UnknownPropertyType(other.id())),
        })
    }

    // =========================================================================
    // Property values
    // =========================================================================

    fn decode_value(&mut self, kind: PropertyType) -> Result<PropertyValue, CcbiError> {
        Ok(match kind {
            PropertyType::Position => PropertyValue::Position {
                x: self.read_float()?,
                y: self.read_float()?,
                unit: self.read_uint()?,
            },
            PropertyType::Size => PropertyValue::Size {
                width: self.read_float()?,
                height: self.read_float()?,
                unit: self.read_uint()?,
            },
            PropertyType::Point | PropertyType::PointLock => PropertyValue::Point {
                x: self.read_float()?,
                y: self.read_float()?,
            },
            PropertyType::ScaleLock => PropertyValue::ScaleLock {
                x: self.read_float()?,
                y: self.read_float()?,
                unit: self.read_uint()?,
            },
            PropertyType::Float | PropertyType::Degrees => {
                PropertyValue::Float(self.read_float()?)
            }
            PropertyType::FloatXY => PropertyValue::FloatXY {
                x: self.read_float()?,
                y: self.read_float()?,
            },
            PropertyType::FloatScale => PropertyValue::FloatScale {
                value: self.read_float()?,
                unit: self.read_uint()?,
            },
            PropertyType::FloatVar => PropertyValue::FloatVar {
                value: self.read_float()?,
                variance: self.read_float()?,
            },
            PropertyType::Integer | PropertyType::IntegerLabeled => {
                PropertyValue::Integer(self.read_int()?)
            }
            PropertyType::Check => PropertyValue::Check(self.cursor.read_bool()?),
            PropertyType::SpriteFrame => PropertyValue::SpriteFrame {
                sheet: self.read_cached_string()?,
                file: self.read_cached_string()?,
            },
            PropertyType::Texture
            | PropertyType::FntFile
            | PropertyType::FontTtf
            | PropertyType::String
            | PropertyType::Text
            | PropertyType::CcbFile => PropertyValue::String(self.read_cached_string()?),
            PropertyType::Byte => PropertyValue::Byte(self.read_byte_value()?),
            PropertyType::Color3 => PropertyValue::Color3 {
                r: self.cursor.read_byte()?,
                g: self.cursor.read_byte()?,
                b: self.cursor.read_byte()?,
            },
            PropertyType::Color4FVar => {
                let mut floats = [0.0f32; 8];
                for f in &mut floats {
                    *f = self.read_float()?;
                }
                PropertyValue::Color4FVar {
                    color: [floats[0], floats[1], floats[2], floats[3]],
                    variance: [floats[4], floats[5], floats[6], floats[7]],
                }
            }
            PropertyType::Flip => PropertyValue::Flip {
                x: self.cursor.read_bool()?,
                y: self.cursor.read_bool()?,
            },
            PropertyType::BlendMode => PropertyValue::BlendMode {
                src: self.read_uint()?,
                dst: self.read_uint()?,
            },
            PropertyType::Block => PropertyValue::Block {
                selector: self.read_cached_string()?,
                target: self.read_uint()?,
            },
            PropertyType::BlockCcControl => PropertyValue::BlockControl {
                selector: self.read_cached_string()?,
                target: self.read_uint()?,
                control_events: self.read_uint()?,
            },
            PropertyType::Animation => PropertyValue::Animation {
                file: self.read_cached_string()?,
                name: self.read_cached_string()?,
            },
            PropertyType::Null => return Err(CcbiError::UnknownPropertyType(kind.id())),
        })
    }

    /// Byte payload; the encoder writes 0xFF as a placeholder for 0
    fn read_byte_value(&mut self) -> Result<u8, CcbiError> {
        let value = self.cursor.read_byte()?;
        Ok(if value == 0xFF { 0 } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::BitWriter;

    #[test]
    fn test_minimal_document() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode"]);
        w.write_empty_sequences();
        w.write_empty_node(0);

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        assert!(!doc.js_controlled);
        assert!(doc.sequences.is_empty());
        assert_eq!(doc.root.base_class, "CCNode");
        assert!(doc.root.properties.is_empty());
        assert!(doc.root.animated_channels.is_empty());
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_lowercase_magic_accepted() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode"]);
        w.write_empty_sequences();
        w.write_empty_node(0);
        let mut bytes = w.into_bytes();
        bytes[..4].copy_from_slice(&crate::CCBI_MAGIC_LOWER.to_le_bytes());

        assert!(parse_ccbi(&bytes).is_ok());
    }

    #[test]
    fn test_bad_magic() {
        let data = b"XXXX\x01\x00";
        let result = parse_ccbi(data);
        assert!(matches!(result, Err(CcbiError::BadMagic(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let mut w = BitWriter::new();
        w.write_bytes(&crate::CCBI_MAGIC.to_le_bytes());
        w.write_varint(4, false);
        let result = parse_ccbi(&w.into_bytes());
        assert_eq!(result.unwrap_err(), CcbiError::UnsupportedVersion(4));
    }

    #[test]
    fn test_truncated_header() {
        assert_eq!(parse_ccbi(b"IB").unwrap_err(), CcbiError::TruncatedInput);
    }

    #[test]
    fn test_js_controlled_reads_controller_name() {
        let mut w = BitWriter::new();
        w.write_header(true);
        w.write_string_cache(&["CCNode", "MainScene"]);
        w.write_empty_sequences();
        // Node with a controller name between class and assignment
        w.write_varint(0, false); // class
        w.write_varint(1, false); // js controller
        w.write_varint(crate::TARGET_TYPE_NONE, false);
        w.write_varint(0, false); // animated sequences
        w.write_varint(0, false); // regular props
        w.write_varint(0, false); // extra props
        w.write_varint(0, false); // children

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        assert!(doc.js_controlled);
        assert_eq!(doc.root.js_controller.as_deref(), Some("MainScene"));
    }

    #[test]
    fn test_member_var_assignment() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode", "mSprite"]);
        w.write_empty_sequences();
        w.write_varint(0, false); // class
        w.write_varint(1, false); // assignment type: document root
        w.write_varint(1, false); // assignment name
        w.write_varint(0, false);
        w.write_varint(0, false);
        w.write_varint(0, false);
        w.write_varint(0, false);

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        assert_eq!(doc.root.member_var_assignment_type, 1);
        assert_eq!(
            doc.root.member_var_assignment_name.as_deref(),
            Some("mSprite")
        );
    }

    #[test]
    fn test_nested_children_in_order() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode", "CCSprite", "CCLabelTTF"]);
        w.write_empty_sequences();
        // Root with two children; the first child has one child of its own
        w.write_varint(0, false);
        w.write_varint(crate::TARGET_TYPE_NONE, false);
        w.write_varint(0, false);
        w.write_varint(0, false);
        w.write_varint(0, false);
        w.write_varint(2, false); // two children
        {
            w.write_varint(1, false); // CCSprite
            w.write_varint(crate::TARGET_TYPE_NONE, false);
            w.write_varint(0, false);
            w.write_varint(0, false);
            w.write_varint(0, false);
            w.write_varint(1, false); // one grandchild
            w.write_empty_node(2); // CCLabelTTF
        }
        w.write_empty_node(1); // second child, CCSprite

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        let root = &doc.root;
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].base_class, "CCSprite");
        assert_eq!(root.children[0].children[0].base_class, "CCLabelTTF");
        assert_eq!(root.children[1].base_class, "CCSprite");
        assert_eq!(root.node_count(), 4);
        assert_eq!(root.depth(), 3);
    }

    #[test]
    fn test_property_decode() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCSprite", "position", "visible", "opacity"]);
        w.write_empty_sequences();
        w.write_varint(0, false); // class
        w.write_varint(crate::TARGET_TYPE_NONE, false);
        w.write_varint(0, false); // animated
        w.write_varint(2, false); // regular props
        w.write_varint(1, false); // extra props
        {
            // Position property
            w.write_varint(PropertyType::Position.id(), false);
            w.write_varint(1, false); // name "position"
            w.write_byte(0); // platform
            w.write_float(10.0);
            w.write_float(20.0);
            w.write_varint(2, false); // unit subtype
        }
        {
            // Check property
            w.write_varint(PropertyType::Check.id(), false);
            w.write_varint(2, false); // name "visible"
            w.write_byte(0);
            w.write_bool(true);
        }
        {
            // Byte property with the 0xFF placeholder
            w.write_varint(PropertyType::Byte.id(), false);
            w.write_varint(3, false); // name "opacity"
            w.write_byte(0);
            w.write_byte(0xFF);
        }
        w.write_varint(0, false); // children

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        let props = &doc.root.properties;
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].name, "position");
        assert_eq!(
            props[0].value,
            PropertyValue::Position {
                x: 10.0,
                y: 20.0,
                unit: 2
            }
        );
        assert_eq!(props[1].value, PropertyValue::Check(true));
        // 0xFF remaps to logical 0
        assert_eq!(props[2].value, PropertyValue::Byte(0));
    }

    #[test]
    fn test_byte_property_plain_value() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCSprite", "opacity"]);
        w.write_empty_sequences();
        w.write_varint(0, false);
        w.write_varint(crate::TARGET_TYPE_NONE, false);
        w.write_varint(0, false);
        w.write_varint(1, false);
        w.write_varint(0, false);
        w.write_varint(PropertyType::Byte.id(), false);
        w.write_varint(1, false);
        w.write_byte(0);
        w.write_byte(0x10);
        w.write_varint(0, false);

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        assert_eq!(doc.root.properties[0].value, PropertyValue::Byte(16));
    }

    #[test]
    fn test_unknown_property_type_is_fatal() {
        for bad_id in [28, 29, 200] {
            let mut w = BitWriter::new();
            w.write_header(false);
            w.write_string_cache(&["CCNode", "junk"]);
            w.write_empty_sequences();
            w.write_varint(0, false);
            w.write_varint(crate::TARGET_TYPE_NONE, false);
            w.write_varint(0, false);
            w.write_varint(1, false);
            w.write_varint(0, false);
            w.write_varint(bad_id, false);
            w.write_varint(1, false);
            w.write_byte(0);

            let result = parse_ccbi(&w.into_bytes());
            assert_eq!(result.unwrap_err(), CcbiError::UnknownPropertyType(bad_id));
        }
    }

    #[test]
    fn test_animated_channel_decode() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCSprite", "rotation"]);
        w.write_empty_sequences();
        w.write_varint(0, false); // class
        w.write_varint(crate::TARGET_TYPE_NONE, false);
        w.write_varint(1, false); // one animated timeline
        {
            w.write_varint(2, false); // sequence id 2
            w.write_varint(1, false); // one channel
            w.write_varint(1, false); // property name "rotation"
            w.write_varint(PropertyType::Degrees.id(), false);
            w.write_varint(2, false); // two keyframes
            {
                // t=0, linear, 0 degrees
                w.write_float(0.0);
                w.write_varint(crate::easing::LINEAR, false);
                w.write_float(0.0);
            }
            {
                // t=1, cubic-in with opt, 90 degrees
                w.write_float(1.0);
                w.write_varint(crate::easing::CUBIC_IN, false);
                w.write_float(0.25); // easing opt
                w.write_float(90.0);
            }
        }
        w.write_varint(0, false); // regular props
        w.write_varint(0, false); // extra props
        w.write_varint(0, false); // children

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        let channels = &doc.root.animated_channels;
        assert_eq!(channels.len(), 1);
        let channel = &channels[0];
        assert_eq!(channel.sequence_id, 2);
        assert_eq!(channel.property_name, "rotation");
        assert_eq!(channel.property_type, PropertyType::Degrees);
        assert_eq!(channel.keyframes.len(), 2);

        let first = &channel.keyframes[0];
        assert_eq!(first.easing.kind, crate::easing::LINEAR);
        assert_eq!(first.easing.opt, None);
        assert_eq!(first.value, PropertyValue::Float(0.0));

        let second = &channel.keyframes[1];
        assert_eq!(second.time, 1.0);
        assert_eq!(second.easing.kind, crate::easing::CUBIC_IN);
        assert_eq!(second.easing.opt, Some(0.25));
        assert_eq!(second.value, PropertyValue::Float(90.0));
    }

    #[test]
    fn test_keyframe_rejects_non_animatable_type() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCSprite", "contentSize"]);
        w.write_empty_sequences();
        w.write_varint(0, false);
        w.write_varint(crate::TARGET_TYPE_NONE, false);
        w.write_varint(1, false);
        w.write_varint(0, false); // sequence id
        w.write_varint(1, false); // one channel
        w.write_varint(1, false); // name
        w.write_varint(PropertyType::Size.id(), false); // not animatable
        w.write_varint(1, false); // one keyframe
        w.write_float(0.0);
        w.write_varint(crate::easing::INSTANT, false);

        let result = parse_ccbi(&w.into_bytes());
        assert_eq!(
            result.unwrap_err(),
            CcbiError::UnknownPropertyType(PropertyType::Size.id())
        );
    }

    #[test]
    fn test_sequence_decode_with_chain() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode", "Intro", "Loop", "onDone", "click.wav"]);
        w.write_varint(2, false); // two sequences
        {
            // "Intro", id 0, chains to 3
            w.write_float(2.5);
            w.write_varint(1, false); // name
            w.write_varint(0, false); // id
            w.write_varint(3, true); // chained id
            w.write_varint(1, false); // one callback keyframe
            w.write_float(1.0);
            w.write_varint(3, false); // "onDone"
            w.write_varint(1, false); // callback type
            w.write_varint(1, false); // one sound keyframe
            w.write_float(0.5);
            w.write_varint(4, false); // "click.wav"
            w.write_float(1.0); // pitch
            w.write_float(0.0); // pan
            w.write_float(0.8); // gain
        }
        {
            // "Loop", id 1, no chain
            w.write_float(4.0);
            w.write_varint(2, false);
            w.write_varint(1, false);
            w.write_varint(-1, true);
            w.write_varint(0, false); // callbacks
            w.write_varint(0, false); // sounds
        }
        w.write_varint(0, true); // footer
        w.write_empty_node(0);

        let doc = parse_ccbi(&w.into_bytes()).unwrap();
        assert_eq!(doc.sequences.len(), 2);

        let intro = &doc.sequences[0];
        assert_eq!(intro.name, "Intro");
        assert_eq!(intro.duration, 2.5);
        assert_eq!(intro.chained_sequence_id, Some(3));
        assert_eq!(intro.callback_keyframes.len(), 1);
        assert_eq!(intro.callback_keyframes[0].name, "onDone");
        assert_eq!(intro.sound_keyframes.len(), 1);
        assert_eq!(intro.sound_keyframes[0].file, "click.wav");
        assert_eq!(intro.sound_keyframes[0].gain, 0.8);

        let looped = &doc.sequences[1];
        assert_eq!(looped.name, "Loop");
        assert_eq!(looped.chained_sequence_id, None);
    }

    #[test]
    fn test_string_cache_reference_out_of_range() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode"]);
        w.write_empty_sequences();
        w.write_empty_node(5); // cache holds one entry

        let result = parse_ccbi(&w.into_bytes());
        assert_eq!(
            result.unwrap_err(),
            CcbiError::StringCacheIndexOutOfRange { index: 5, len: 1 }
        );
    }

    #[test]
    fn test_truncated_mid_node() {
        let mut w = BitWriter::new();
        w.write_header(false);
        w.write_string_cache(&["CCNode"]);
        w.write_empty_sequences();
        w.write_varint(0, false); // class, then nothing else

        let result = parse_ccbi(&w.into_bytes());
        assert_eq!(result.unwrap_err(), CcbiError::TruncatedInput);
    }
}
