//! File-level conversion driver: CCBI in, CCB plist out.

use anyhow::{Context, Result};
use ccbi::{parse_ccbi, CcbiDocument};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::plist::write_document;

/// Parses a `.ccbi` file from disk.
pub fn load_file(input: &Path) -> Result<CcbiDocument> {
    let data = fs::read(input).with_context(|| format!("Failed to read {:?}", input))?;
    parse_ccbi(&data).with_context(|| format!("Failed to parse {:?}", input))
}

/// Converts a single `.ccbi` file to a `.ccb` plist document.
pub fn convert_file(input: &Path, output: &Path) -> Result<()> {
    let document = load_file(input)?;
    tracing::info!(
        "Parsed {:?}: {} nodes, {} sequences",
        input,
        document.root.node_count(),
        document.sequences.len()
    );

    let file = File::create(output).with_context(|| format!("Failed to create {:?}", output))?;
    let mut writer = BufWriter::new(file);
    write_document(&mut writer, &document)
        .with_context(|| format!("Failed to write {:?}", output))?;
    Ok(())
}

/// Prints a summary of a `.ccbi` file without converting it.
pub fn print_info(input: &Path) -> Result<()> {
    let document = load_file(input)?;
    println!("File:        {}", input.display());
    println!("Root class:  {}", document.root.base_class);
    println!("JS control:  {}", document.js_controlled);
    println!("Nodes:       {}", document.root.node_count());
    println!("Graph depth: {}", document.root.depth());
    println!("Sequences:   {}", document.sequences.len());
    for seq in &document.sequences {
        let chain = match seq.chained_sequence_id {
            Some(id) => format!(" -> {}", id),
            None => String::new(),
        };
        println!(
            "  [{}] {:?} ({:.2}s){}",
            seq.id, seq.name, seq.duration, chain
        );
    }
    Ok(())
}
