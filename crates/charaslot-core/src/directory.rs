//! Entity directory: the static table of known characters

use crate::error::{Error, Result};
use crate::identity::EntityId;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// A directory-listed character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Parameter table index
    pub id: EntityId,
    /// Machine token used inside labels (e.g. "mario")
    pub key: String,
    /// Display and search name (e.g. "Mario")
    pub name: String,
}

impl EntityRecord {
    /// Create a new entity record
    pub fn new(id: u32, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Read-only, ordered collection of entity records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDirectory {
    records: Vec<EntityRecord>,
}

impl EntityDirectory {
    /// Create a directory from records in declaration order
    pub fn new(records: Vec<EntityRecord>) -> Self {
        Self { records }
    }

    /// All records in declaration order
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the directory is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by id
    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find every record matching `query`, in declaration order.
    ///
    /// A record matches when the lowercased query equals its key, or when the
    /// query, compiled as a case-insensitive pattern, matches its name.
    pub fn lookup(&self, query: &str) -> Result<Vec<&EntityRecord>> {
        let query = query.to_lowercase();
        let pattern = RegexBuilder::new(&query)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidQuery(e.to_string()))?;

        Ok(self
            .records
            .iter()
            .filter(|r| r.key == query || pattern.is_match(&r.name))
            .collect())
    }

    /// Resolve `query` to its first match in declaration order
    pub fn first_match(&self, query: &str) -> Result<&EntityRecord> {
        self.lookup(query)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::EntityNotFound(query.to_string()))
    }
}

impl FromIterator<EntityRecord> for EntityDirectory {
    fn from_iter<I: IntoIterator<Item = EntityRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
