//! Charaslot Core - character slot title compiler
//!
//! Compiles "character → slot → title" assignments into two coupled tables:
//! - a label-keyed title table (`ui_chr1_*` / `ui_chr2_*` entries)
//! - an id-indexed roster parameter table, run-length encoded into dummy
//!   runs and struct entries in ascending id order
//!
//! Both tables are always regenerated together by [`Compiler`]; the roster is
//! derived from the complete title table on every compile, never patched.
//!
//! This crate performs no I/O. Reading and writing the persisted forms lives
//! in `charaslot-io`; loading the static dataset lives in `charaslot-script`.

mod baseline;
mod compiler;
mod directory;
mod error;
mod identity;
pub mod label;
mod roster;
pub mod synth;
mod title;

pub use baseline::{BaselineTable, BaselineValue};
pub use compiler::{
    CharacterRef, CompileRequest, CompiledArtifacts, Compiler, SynthesizedArtifacts, UpdateMode,
};
pub use directory::{EntityDirectory, EntityRecord};
pub use error::{Error, Result};
pub use identity::{EntityId, SlotCode, MAX_SLOT};
pub use label::RosterLabel;
pub use roster::{ByteEntry, DummyRun, RosterAssignment, Segment, StructEntry};
pub use synth::{Element, Node};
pub use title::{TitleEntry, TitleTable};
