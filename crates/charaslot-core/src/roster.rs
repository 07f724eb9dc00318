//! Roster assignment and segment builder
//!
//! The parameter table is a run-length encoded list in ascending id order:
//! consecutive unassigned ids collapse into one [`DummyRun`], every assigned
//! id becomes its own [`StructEntry`].

use crate::baseline::{BaselineTable, BaselineValue};
use crate::directory::EntityDirectory;
use crate::error::{Error, Result};
use crate::identity::{EntityId, SlotCode};
use crate::label;
use crate::title::TitleTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One slot inside a struct entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteEntry {
    /// Slot code exactly as declared (`"03"`)
    pub slot: SlotCode,
    /// Integer form of the slot code (`3`)
    pub value: u32,
}

impl ByteEntry {
    /// Build a byte entry, parsing the slot code
    pub fn from_slot(slot: &SlotCode) -> Result<Self> {
        Ok(Self {
            value: slot.value()?,
            slot: slot.clone(),
        })
    }
}

/// Coalesced run of consecutive unassigned ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DummyRun {
    pub ids: Vec<EntityId>,
}

/// An assigned id with its slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructEntry {
    pub id: EntityId,
    pub bytes: Vec<ByteEntry>,
}

/// A unit of the roster parameter tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    DummyRun(DummyRun),
    Struct(StructEntry),
}

impl Segment {
    /// Ids covered by this segment, in order
    pub fn ids(&self) -> Vec<EntityId> {
        match self {
            Segment::DummyRun(run) => run.ids.clone(),
            Segment::Struct(entry) => vec![entry.id],
        }
    }
}

/// Baseline merged with the slots decoded from a title table.
///
/// Rebuilt from scratch on every compile.
#[derive(Debug, Clone, Default)]
pub struct RosterAssignment {
    table: HashMap<EntityId, BaselineValue>,
}

impl RosterAssignment {
    /// Start from a copy of the baseline
    pub fn from_baseline(baseline: &BaselineTable) -> Self {
        Self {
            table: baseline.iter().map(|(id, v)| (*id, v.clone())).collect(),
        }
    }

    /// Derive the assignment for a whole title table.
    ///
    /// Display-case labels are applied in document order; every other label
    /// is skipped. A label whose key resolves to nothing aborts the derive.
    pub fn derive(
        titles: &TitleTable,
        directory: &EntityDirectory,
        baseline: &BaselineTable,
    ) -> Result<Self> {
        let mut roster = Self::from_baseline(baseline);
        let mut applied = 0usize;

        for entry in titles.entries() {
            let Some(decoded) = label::decode(&entry.label) else {
                continue;
            };
            let entity = directory.first_match(&decoded.key)?;
            roster.assign(entity.id, decoded.slot)?;
            applied += 1;
        }

        debug!(
            entries = titles.len(),
            applied,
            ids = roster.table.len(),
            "derived roster assignment"
        );
        Ok(roster)
    }

    /// Append a slot to an entity, turning a dummy into a slot list first
    pub fn assign(&mut self, id: EntityId, slot: SlotCode) -> Result<()> {
        let value = self
            .table
            .get_mut(&id)
            .ok_or(Error::UnknownBaselineId(id.raw()))?;

        match value {
            BaselineValue::Dummy => *value = BaselineValue::Slots(vec![slot]),
            BaselineValue::Slots(slots) => slots.push(slot),
        }
        Ok(())
    }

    /// Get the current value for an id
    pub fn get(&self, id: EntityId) -> Option<&BaselineValue> {
        self.table.get(&id)
    }

    /// Group the table into segments in strictly ascending id order
    pub fn segments(&self) -> Result<Vec<Segment>> {
        let mut ids: Vec<EntityId> = self.table.keys().copied().collect();
        ids.sort_unstable();

        let mut segments: Vec<Segment> = Vec::new();
        for id in ids {
            match &self.table[&id] {
                BaselineValue::Dummy => match segments.last_mut() {
                    Some(Segment::DummyRun(run)) => run.ids.push(id),
                    _ => segments.push(Segment::DummyRun(DummyRun { ids: vec![id] })),
                },
                BaselineValue::Slots(slots) => {
                    let bytes = slots
                        .iter()
                        .map(ByteEntry::from_slot)
                        .collect::<Result<Vec<_>>>()?;
                    segments.push(Segment::Struct(StructEntry { id, bytes }));
                }
            }
        }

        Ok(segments)
    }
}
