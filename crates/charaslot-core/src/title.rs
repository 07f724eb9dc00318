//! Title table: label-keyed display strings

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A single label/title pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub label: String,
    pub title: String,
}

impl TitleEntry {
    /// Create a new title entry
    pub fn new(label: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            title: title.into(),
        }
    }
}

/// Ordered title entries, unique by label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTable {
    entries: Vec<TitleEntry>,
}

impl TitleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries; later duplicates of a label are dropped
    pub fn from_entries(entries: impl IntoIterator<Item = TitleEntry>) -> Self {
        let mut table = Self::new();
        table.merge_missing(entries);
        table
    }

    /// Entries in document order
    pub fn entries(&self) -> &[TitleEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the title stored under `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.title.as_str())
    }

    /// Union keyed by label: entries whose label is already present are
    /// discarded and the stored title stays as it was.
    ///
    /// Returns the number of entries actually appended.
    pub fn merge_missing(&mut self, incoming: impl IntoIterator<Item = TitleEntry>) -> usize {
        let mut seen: IndexSet<String> = self.entries.iter().map(|e| e.label.clone()).collect();
        let mut added = 0;

        for entry in incoming {
            if seen.contains(&entry.label) {
                match self.get(&entry.label) {
                    Some(existing) if existing != entry.title => warn!(
                        label = %entry.label,
                        kept = existing,
                        ignored = %entry.title,
                        "label already present, keeping existing title"
                    ),
                    _ => debug!(label = %entry.label, "label already present"),
                }
                continue;
            }
            seen.insert(entry.label.clone());
            self.entries.push(entry);
            added += 1;
        }

        added
    }
}

impl FromIterator<TitleEntry> for TitleTable {
    fn from_iter<I: IntoIterator<Item = TitleEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_appends_missing_labels() {
        let mut table = TitleTable::from_entries([TitleEntry::new("a", "A")]);
        let added = table.merge_missing([TitleEntry::new("b", "B"), TitleEntry::new("c", "C")]);

        assert_eq!(added, 2);
        let labels: Vec<&str> = table.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_keeps_existing_title() {
        let mut table = TitleTable::from_entries([TitleEntry::new("ui_chr1_01_mario", "Old")]);
        let added = table.merge_missing([TitleEntry::new("ui_chr1_01_mario", "New")]);

        assert_eq!(added, 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ui_chr1_01_mario"), Some("Old"));
    }

    #[test]
    fn test_from_entries_first_label_wins() {
        let table = TitleTable::from_entries([
            TitleEntry::new("x", "first"),
            TitleEntry::new("y", "other"),
            TitleEntry::new("x", "second"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("x"), Some("first"));
    }
}
