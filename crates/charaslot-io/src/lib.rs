//! Charaslot IO - persisted forms of the compiled artifacts
//!
//! - **xml**: text rendering of element trees and reading of title tables
//! - **encoding**: UTF-16LE / UTF-8 byte encodings
//! - **layout**: RON-configurable artifact paths
//! - **writer**: reads the previous title table and writes both artifacts
//!   as a pair
//!
//! # Example
//!
//! ```rust,ignore
//! use charaslot_core::{CompileRequest, Compiler, UpdateMode};
//! use charaslot_io::{ArtifactWriter, OutputLayout};
//!
//! let writer = ArtifactWriter::new("mod_root", OutputLayout::default());
//! let existing = writer.read_titles()?;
//! let request = CompileRequest::new("mario", 1, "Plumber", UpdateMode::Add);
//! let artifacts = Compiler::new(&directory, &baseline).compile(&request, existing.as_ref())?;
//! writer.write(&artifacts)?;
//! ```

pub mod encoding;
mod error;
mod layout;
mod writer;
pub mod xml;

pub use encoding::TextEncoding;
pub use error::{Error, Result};
pub use layout::OutputLayout;
pub use writer::{read_title_table, ArtifactWriter, RenderedArtifacts};
