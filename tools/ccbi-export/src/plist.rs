//! CCB property-list emitter
//!
//! Walks the decoded document read-only and renders the editable CCB file:
//! an XML plist whose shape mirrors the decoder's output tree, plus the
//! fixed structural defaults the editor expects (file metadata, resolution
//! table, per-sequence playback defaults). The decoder itself knows nothing
//! about this markup.

use std::io::{self, Write};

use ccbi::{AnimatedChannel, CcbiDocument, Keyframe, Node, Property, PropertyValue, Sequence};

/// Plist value tree, the intermediate form between document and markup
#[derive(Debug, Clone, PartialEq)]
pub enum Plist {
    Dict(Vec<(String, Plist)>),
    Array(Vec<Plist>),
    String(String),
    Integer(i64),
    Real(f32),
    Bool(bool),
}

fn kv(key: &str, value: Plist) -> (String, Plist) {
    (key.to_string(), value)
}

fn string(s: &str) -> Plist {
    Plist::String(s.to_string())
}

// =============================================================================
// Document -> Plist
// =============================================================================

/// Build the complete CCB plist for a decoded document
pub fn render_document(doc: &CcbiDocument) -> Plist {
    Plist::Dict(vec![
        kv("centeredOrigin", Plist::Bool(false)),
        kv("currentResolution", Plist::Integer(0)),
        kv("currentSequenceId", Plist::Integer(0)),
        kv("fileType", string("CocosBuilder")),
        kv("fileVersion", Plist::Integer(4)),
        kv("guides", Plist::Array(Vec::new())),
        kv("jsControlled", Plist::Bool(doc.js_controlled)),
        kv("notes", Plist::Array(Vec::new())),
        kv("resolutions", default_resolutions()),
        kv(
            "sequences",
            Plist::Array(doc.sequences.iter().map(render_sequence).collect()),
        ),
        kv("nodeGraph", render_node(&doc.root)),
    ])
}

/// Fixed resolution table the editor expects in every file
fn default_resolutions() -> Plist {
    Plist::Array(vec![Plist::Dict(vec![
        kv("centeredOrigin", Plist::Bool(false)),
        kv("ext", string("iphone")),
        kv("height", Plist::Integer(640)),
        kv("name", string("iPhone Landscape")),
        kv("scale", Plist::Real(1.0)),
        kv("width", Plist::Integer(400)),
    ])])
}

fn render_sequence(seq: &Sequence) -> Plist {
    let mut entries = vec![
        kv("autoPlay", Plist::Bool(true)),
        kv("length", Plist::Real(seq.duration)),
        kv("position", Plist::Real(seq.duration)),
        kv("name", string(&seq.name)),
        kv("sequenceId", Plist::Integer(seq.id)),
    ];
    // -1 in the stream means "no chained sequence" and stays absent here
    if let Some(chained) = seq.chained_sequence_id {
        entries.push(kv("chainedSequenceId", Plist::Integer(chained)));
    }
    entries.push(kv("offset", Plist::Real(0.0)));
    entries.push(kv("resolution", Plist::Real(30.0)));
    entries.push(kv("scale", Plist::Real(512.0)));
    entries.push(kv(
        "callbackChannel",
        Plist::Dict(vec![
            kv(
                "keyframes",
                Plist::Array(
                    seq.callback_keyframes
                        .iter()
                        .map(|k| {
                            Plist::Dict(vec![
                                kv("name", string(&k.name)),
                                kv("time", Plist::Real(k.time)),
                                kv("type", Plist::Integer(k.callback_type)),
                            ])
                        })
                        .collect(),
                ),
            ),
            kv("type", Plist::Integer(10)),
        ]),
    ));
    entries.push(kv(
        "soundChannel",
        Plist::Dict(vec![
            kv(
                "keyframes",
                Plist::Array(
                    seq.sound_keyframes
                        .iter()
                        .map(|k| {
                            Plist::Dict(vec![
                                kv("file", string(&k.file)),
                                kv("gain", Plist::Real(k.gain)),
                                kv("pan", Plist::Real(k.pan)),
                                kv("pitch", Plist::Real(k.pitch)),
                                kv("time", Plist::Real(k.time)),
                            ])
                        })
                        .collect(),
                ),
            ),
            kv("type", Plist::Integer(9)),
        ]),
    ));
    Plist::Dict(entries)
}

fn render_node(node: &Node) -> Plist {
    let mut entries = vec![
        kv("baseClass", string(&node.base_class)),
        kv("customClass", string("")),
        kv("displayName", string(&node.base_class)),
    ];
    if let Some(controller) = &node.js_controller {
        entries.push(kv("jsController", string(controller)));
    }
    entries.push(kv(
        "memberVarAssignmentType",
        Plist::Integer(node.member_var_assignment_type),
    ));
    if let Some(name) = &node.member_var_assignment_name {
        entries.push(kv("memberVarAssignmentName", string(name)));
    }
    if !node.animated_channels.is_empty() {
        entries.push(kv(
            "animatedProperties",
            render_animated_properties(&node.animated_channels),
        ));
    }
    entries.push(kv(
        "properties",
        Plist::Array(node.properties.iter().map(render_property).collect()),
    ));
    entries.push(kv(
        "children",
        Plist::Array(node.children.iter().map(render_node).collect()),
    ));
    Plist::Dict(entries)
}

/// Channels grouped under their timeline id: a dict of sequence-id keys,
/// each holding a dict of property-name keys
fn render_animated_properties(channels: &[AnimatedChannel]) -> Plist {
    let mut groups: Vec<(i64, Vec<&AnimatedChannel>)> = Vec::new();
    for channel in channels {
        match groups.iter_mut().find(|(id, _)| *id == channel.sequence_id) {
            Some((_, group)) => group.push(channel),
            None => groups.push((channel.sequence_id, vec![channel])),
        }
    }
    Plist::Dict(
        groups
            .into_iter()
            .map(|(id, group)| {
                (
                    id.to_string(),
                    Plist::Dict(
                        group
                            .into_iter()
                            .map(|c| (c.property_name.clone(), render_channel(c)))
                            .collect(),
                    ),
                )
            })
            .collect(),
    )
}

fn render_channel(channel: &AnimatedChannel) -> Plist {
    // The animated record carries the channel code, not the raw type id
    let code = channel.property_type.animated_code().unwrap_or(-1);
    Plist::Dict(vec![
        kv(
            "keyframes",
            Plist::Array(
                channel
                    .keyframes
                    .iter()
                    .map(|k| render_keyframe(channel, k))
                    .collect(),
            ),
        ),
        kv("name", string(&channel.property_name)),
        kv("type", Plist::Integer(code as i64)),
    ])
}

fn render_keyframe(channel: &AnimatedChannel, keyframe: &Keyframe) -> Plist {
    let mut easing = vec![kv("type", Plist::Integer(keyframe.easing.kind))];
    if let Some(opt) = keyframe.easing.opt {
        easing.push(kv("opt", Plist::Real(opt)));
    }
    let code = channel.property_type.animated_code().unwrap_or(-1);
    Plist::Dict(vec![
        kv("easing", Plist::Dict(easing)),
        kv("name", string(&channel.property_name)),
        kv("time", Plist::Real(keyframe.time)),
        kv("type", Plist::Integer(code as i64)),
        kv("value", render_keyframe_value(&keyframe.value)),
    ])
}

/// Keyframe sprite frames store file before sheet, unlike properties
fn render_keyframe_value(value: &PropertyValue) -> Plist {
    match value {
        PropertyValue::SpriteFrame { sheet, file } => {
            Plist::Array(vec![string(file), string(sheet)])
        }
        other => render_value(other),
    }
}

fn render_property(prop: &Property) -> Plist {
    Plist::Dict(vec![
        kv("name", string(&prop.name)),
        kv("type", string(prop.kind.name())),
        kv("value", render_value(&prop.value)),
    ])
}

fn render_value(value: &PropertyValue) -> Plist {
    match value {
        PropertyValue::Position { x, y, unit } => Plist::Array(vec![
            Plist::Real(*x),
            Plist::Real(*y),
            Plist::Integer(*unit),
        ]),
        PropertyValue::Size { width, height, unit } => Plist::Array(vec![
            Plist::Real(*width),
            Plist::Real(*height),
            Plist::Integer(*unit),
        ]),
        PropertyValue::Point { x, y } => Plist::Array(vec![Plist::Real(*x), Plist::Real(*y)]),
        // The editor stores a lock flag between the pair and the unit
        PropertyValue::ScaleLock { x, y, unit } => Plist::Array(vec![
            Plist::Real(*x),
            Plist::Real(*y),
            Plist::Bool(false),
            Plist::Integer(*unit),
        ]),
        PropertyValue::Float(f) => Plist::Real(*f),
        PropertyValue::FloatXY { x, y } => Plist::Array(vec![Plist::Real(*x), Plist::Real(*y)]),
        PropertyValue::FloatScale { value, unit } => {
            Plist::Array(vec![Plist::Real(*value), Plist::Integer(*unit)])
        }
        PropertyValue::FloatVar { value, variance } => {
            Plist::Array(vec![Plist::Real(*value), Plist::Real(*variance)])
        }
        PropertyValue::Integer(i) => Plist::Integer(*i),
        PropertyValue::Check(b) => Plist::Bool(*b),
        PropertyValue::SpriteFrame { sheet, file } => {
            Plist::Array(vec![string(sheet), string(file)])
        }
        PropertyValue::String(s) => string(s),
        PropertyValue::Byte(b) => Plist::Integer(*b as i64),
        PropertyValue::Color3 { r, g, b } => Plist::Array(vec![
            Plist::Integer(*r as i64),
            Plist::Integer(*g as i64),
            Plist::Integer(*b as i64),
        ]),
        PropertyValue::Color4FVar { color, variance } => Plist::Array(
            color
                .iter()
                .chain(variance.iter())
                .map(|f| Plist::Real(*f))
                .collect(),
        ),
        PropertyValue::Flip { x, y } => Plist::Array(vec![Plist::Bool(*x), Plist::Bool(*y)]),
        PropertyValue::BlendMode { src, dst } => {
            Plist::Array(vec![Plist::Integer(*src), Plist::Integer(*dst)])
        }
        PropertyValue::Block { selector, target } => {
            Plist::Array(vec![string(selector), Plist::Integer(*target)])
        }
        PropertyValue::BlockControl {
            selector,
            target,
            control_events,
        } => Plist::Array(vec![
            string(selector),
            Plist::Integer(*target),
            Plist::Integer(*control_events),
        ]),
        PropertyValue::Animation { file, name } => Plist::Array(vec![string(file), string(name)]),
    }
}

// =============================================================================
// Plist -> XML
// =============================================================================

/// Render the full CCB file for a decoded document
pub fn write_document<W: Write>(w: &mut W, doc: &CcbiDocument) -> io::Result<()> {
    let root = render_document(doc);
    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">"#
    )?;
    writeln!(w, r#"<plist version="1.0">"#)?;
    write_value(w, &root, 0)?;
    writeln!(w, "</plist>")
}

fn write_value<W: Write>(w: &mut W, value: &Plist, indent: usize) -> io::Result<()> {
    let pad = "\t".repeat(indent);
    match value {
        Plist::Dict(entries) => {
            if entries.is_empty() {
                writeln!(w, "{pad}<dict/>")
            } else {
                writeln!(w, "{pad}<dict>")?;
                for (key, v) in entries {
                    writeln!(w, "{pad}\t<key>{}</key>", escape(key))?;
                    write_value(w, v, indent + 1)?;
                }
                writeln!(w, "{pad}</dict>")
            }
        }
        Plist::Array(items) => {
            if items.is_empty() {
                writeln!(w, "{pad}<array/>")
            } else {
                writeln!(w, "{pad}<array>")?;
                for item in items {
                    write_value(w, item, indent + 1)?;
                }
                writeln!(w, "{pad}</array>")
            }
        }
        Plist::String(s) => writeln!(w, "{pad}<string>{}</string>", escape(s)),
        Plist::Integer(i) => writeln!(w, "{pad}<integer>{i}</integer>"),
        Plist::Real(r) => writeln!(w, "{pad}<real>{r}</real>"),
        Plist::Bool(true) => writeln!(w, "{pad}<true/>"),
        Plist::Bool(false) => writeln!(w, "{pad}<false/>"),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
