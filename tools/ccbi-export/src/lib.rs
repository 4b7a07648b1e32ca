//! ccbi-export library
//!
//! Provides CCBI -> CCB conversion functions for use by the CLI binary and
//! by tests. The decoding itself lives in the `ccbi` crate; this crate owns
//! the file handling and the CCB plist emission.

pub mod convert;
pub mod plist;

pub use convert::{convert_file, print_info};
pub use plist::{render_document, write_document, Plist};
