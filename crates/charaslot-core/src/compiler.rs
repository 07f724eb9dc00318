//! Update coordinator
//!
//! Both artifacts always come out of one call: the title table is finalized
//! first, then the roster is recomputed from the whole resulting table.
//!
//! **Replace discards every existing title**, not only the one being
//! assigned. The resulting table holds exactly the two entries of the
//! current request.

use crate::baseline::BaselineTable;
use crate::directory::{EntityDirectory, EntityRecord};
use crate::error::{Error, Result};
use crate::identity::{EntityId, SlotCode};
use crate::label;
use crate::roster::{RosterAssignment, Segment};
use crate::synth::{self, Element};
use crate::title::TitleTable;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a request treats the previously persisted title table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Union with the existing table; existing labels keep their titles
    Add,
    /// Start a fresh table holding only this request's entries
    Replace,
}

/// Which character a request targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterRef {
    /// Key or search string; the first directory match is used
    Query(String),
    /// An id already picked from the directory
    Id(EntityId),
}

impl From<&str> for CharacterRef {
    fn from(query: &str) -> Self {
        CharacterRef::Query(query.to_string())
    }
}

impl From<EntityId> for CharacterRef {
    fn from(id: EntityId) -> Self {
        CharacterRef::Id(id)
    }
}

/// A single slot/title assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub character: CharacterRef,
    /// 1-based slot number
    pub slot: u8,
    pub title: String,
    pub mode: UpdateMode,
}

impl CompileRequest {
    /// Create a new request
    pub fn new(
        character: impl Into<CharacterRef>,
        slot: u8,
        title: impl Into<String>,
        mode: UpdateMode,
    ) -> Self {
        Self {
            character: character.into(),
            slot,
            title: title.into(),
            mode,
        }
    }
}

/// The two artifacts of one compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifacts {
    pub titles: TitleTable,
    pub roster: Vec<Segment>,
}

/// Element trees ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedArtifacts {
    pub titles: Element,
    pub roster: Element,
}

impl CompiledArtifacts {
    /// Build the output trees of both artifacts
    pub fn synthesize(&self) -> SynthesizedArtifacts {
        SynthesizedArtifacts {
            titles: synth::title_tree(&self.titles),
            roster: synth::roster_tree(&self.roster),
        }
    }
}

/// Compiles requests against a fixed directory and baseline
pub struct Compiler<'a> {
    directory: &'a EntityDirectory,
    baseline: &'a BaselineTable,
}

impl<'a> Compiler<'a> {
    /// Create a compiler over read-only inputs
    pub fn new(directory: &'a EntityDirectory, baseline: &'a BaselineTable) -> Self {
        Self {
            directory,
            baseline,
        }
    }

    /// Resolve a character reference to its directory record
    pub fn resolve(&self, character: &CharacterRef) -> Result<&'a EntityRecord> {
        match character {
            CharacterRef::Query(query) => self.directory.first_match(query),
            CharacterRef::Id(id) => self
                .directory
                .get(*id)
                .ok_or_else(|| Error::EntityNotFound(id.to_string())),
        }
    }

    /// Apply a request and regenerate both artifacts.
    ///
    /// `existing` is only consulted in [`UpdateMode::Add`]; a missing table
    /// counts as empty.
    pub fn compile(
        &self,
        request: &CompileRequest,
        existing: Option<&TitleTable>,
    ) -> Result<CompiledArtifacts> {
        let entity = self.resolve(&request.character)?;
        let slot = SlotCode::from_slot(request.slot)?;
        let entries = label::encode(&slot, &entity.key, &request.title);

        let titles = match request.mode {
            UpdateMode::Add => {
                let mut titles = existing.cloned().unwrap_or_default();
                let added = titles.merge_missing(entries);
                debug!(key = %entity.key, %slot, added, total = titles.len(), "merged titles");
                titles
            }
            UpdateMode::Replace => {
                if let Some(discarded) = existing.filter(|t| !t.is_empty()) {
                    debug!(discarded = discarded.len(), "replacing title table");
                }
                TitleTable::from_entries(entries)
            }
        };

        self.rebuild(titles)
    }

    /// Regenerate the roster for a finalized title table
    pub fn rebuild(&self, titles: TitleTable) -> Result<CompiledArtifacts> {
        let roster = RosterAssignment::derive(&titles, self.directory, self.baseline)?.segments()?;
        debug!(segments = roster.len(), "built roster segments");
        Ok(CompiledArtifacts { titles, roster })
    }
}
