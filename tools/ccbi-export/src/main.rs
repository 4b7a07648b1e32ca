//! ccbi-export - CocosBuilder binary scene converter
//!
//! Converts published binary scene files (.ccbi) back to editable
//! CocosBuilder documents (.ccb plist XML).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ccbi_export::convert;

#[derive(Parser)]
#[command(name = "ccbi-export")]
#[command(about = "CocosBuilder binary scene converter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single .ccbi file to a .ccb document
    Convert {
        /// Input .ccbi file
        input: PathBuf,

        /// Output .ccb file (default: input with .ccb extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a summary of a .ccbi file without converting
    Info {
        /// Input .ccbi file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output } => {
            let output = output.unwrap_or_else(|| input.with_extension("ccb"));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            convert::convert_file(&input, &output)?;
            tracing::info!("Done!");
        }

        Commands::Info { input } => {
            convert::print_info(&input)?;
        }
    }

    Ok(())
}
