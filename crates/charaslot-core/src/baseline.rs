//! Baseline table: default state of every known parameter index

use crate::identity::{EntityId, SlotCode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-entity roster value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaselineValue {
    /// No slot assigned; rendered as a placeholder
    Dummy,
    /// Ordered slot codes, duplicates allowed
    Slots(Vec<SlotCode>),
}

impl BaselineValue {
    /// Check if this is the dummy marker
    pub fn is_dummy(&self) -> bool {
        matches!(self, BaselineValue::Dummy)
    }
}

/// Every known entity id mapped to its default roster value.
///
/// Keeps declaration order for inspection; consumers that need id order
/// must sort explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineTable {
    entries: IndexMap<EntityId, BaselineValue>,
}

impl BaselineTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// A table in which every id starts out unassigned
    pub fn all_dummy(ids: impl IntoIterator<Item = impl Into<EntityId>>) -> Self {
        ids.into_iter()
            .map(|id| (id.into(), BaselineValue::Dummy))
            .collect()
    }

    /// Set the baseline value for an id
    pub fn insert(&mut self, id: impl Into<EntityId>, value: BaselineValue) -> Option<BaselineValue> {
        self.entries.insert(id.into(), value)
    }

    /// Get the baseline value for an id
    pub fn get(&self, id: EntityId) -> Option<&BaselineValue> {
        self.entries.get(&id)
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &BaselineValue)> {
        self.entries.iter()
    }

    /// Number of ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(EntityId, BaselineValue)> for BaselineTable {
    fn from_iter<I: IntoIterator<Item = (EntityId, BaselineValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_dummy() {
        let table = BaselineTable::all_dummy([2u32, 0, 1]);
        assert_eq!(table.len(), 3);
        assert!(table.get(EntityId::new(1)).unwrap().is_dummy());
        assert!(table.get(EntityId::new(3)).is_none());
    }

    #[test]
    fn test_baseline_ron() {
        let content = r#"
        (
            entries: {
                0: Dummy,
                5: Slots(["00", "01"]),
            },
        )
        "#;

        let table: BaselineTable = ron::from_str(content).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(EntityId::new(5)),
            Some(&BaselineValue::Slots(vec![SlotCode::new("00"), SlotCode::new("01")]))
        );
    }
}
