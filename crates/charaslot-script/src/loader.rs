//! RON dataset loader

use crate::error::{Error, Result};
use crate::schema::{BaselineDefs, CharacterDefs};
use charaslot_core::{BaselineTable, EntityDirectory, EntityRecord};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const BUNDLED_CHARACTERS: &str = include_str!("../data/characters.ron");
const BUNDLED_BASELINE: &str = include_str!("../data/baseline.ron");

/// Loaded static dataset
#[derive(Debug, Default)]
pub struct RosterData {
    /// Character directory in declaration order
    pub directory: EntityDirectory,
    /// Default roster state per id
    pub baseline: BaselineTable,
}

/// Loader for RON dataset files
pub struct Loader {
    characters: Vec<EntityRecord>,
    baseline: Option<BaselineTable>,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            baseline: None,
        }
    }

    /// Loader pre-filled with the dataset shipped inside this crate
    pub fn bundled() -> Result<Self> {
        let mut loader = Self::new();
        loader.load_characters_str(BUNDLED_CHARACTERS)?;
        loader.load_baseline_str(BUNDLED_BASELINE)?;
        Ok(loader)
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        if filename.contains("character") || content.contains("characters:") {
            self.load_characters_str(&content)
        } else if filename.contains("baseline") || content.contains("entries:") {
            self.load_baseline_str(&content)
        } else {
            Err(Error::InvalidSchema(format!(
                "{}: neither a character nor a baseline file",
                path.display()
            )))
        }
    }

    /// Load character records from a RON string
    pub fn load_characters_str(&mut self, content: &str) -> Result<()> {
        let file: CharacterDefs = ron::from_str(content)?;

        let mut ids: HashSet<u32> = self.characters.iter().map(|c| c.id.raw()).collect();
        let mut keys: HashSet<String> = self.characters.iter().map(|c| c.key.clone()).collect();

        for character in file.characters {
            if !ids.insert(character.id.raw()) {
                return Err(Error::DuplicateDefinition(format!("character id {}", character.id)));
            }
            if !keys.insert(character.key.clone()) {
                return Err(Error::DuplicateDefinition(format!(
                    "character key {}",
                    character.key
                )));
            }
            self.characters.push(character);
        }
        Ok(())
    }

    /// Load baseline entries from a RON string
    pub fn load_baseline_str(&mut self, content: &str) -> Result<()> {
        let file: BaselineDefs = ron::from_str(content)?;

        let baseline = self.baseline.get_or_insert_with(BaselineTable::new);
        for (id, value) in file.entries {
            if baseline.insert(id, value).is_some() {
                return Err(Error::DuplicateDefinition(format!("baseline id {}", id)));
            }
        }
        Ok(())
    }

    /// Load all RON files from a directory
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut files: Vec<_> = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        files.sort();

        for file_path in files {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                debug!(path = %file_path.display(), "loading dataset file");
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the dataset.
    ///
    /// Without a baseline file every character starts out unassigned.
    pub fn finish(self) -> Result<RosterData> {
        if self.characters.is_empty() {
            return Err(Error::InvalidSchema("no characters loaded".to_string()));
        }

        let directory = EntityDirectory::new(self.characters);
        let baseline = match self.baseline {
            Some(baseline) => baseline,
            None => BaselineTable::all_dummy(directory.records().iter().map(|r| r.id)),
        };

        let unplaced = directory
            .records()
            .iter()
            .filter(|r| baseline.get(r.id).is_none())
            .count();
        if unplaced > 0 {
            warn!(unplaced, "characters missing from the baseline cannot be assigned");
        }

        Ok(RosterData {
            directory,
            baseline,
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charaslot_core::{BaselineValue, EntityId};

    #[test]
    fn test_bundled_dataset() {
        let data = Loader::bundled().unwrap().finish().unwrap();

        assert!(!data.directory.is_empty());
        assert_eq!(data.directory.len(), data.baseline.len());
        assert_eq!(data.directory.first_match("mario").unwrap().id, EntityId::new(0));
        assert!(data
            .directory
            .records()
            .iter()
            .all(|r| data.baseline.get(r.id).is_some()));
    }

    #[test]
    fn test_duplicate_character_key() {
        let content = r#"
        (
            characters: [
                (id: 0, key: "mario", name: "Mario"),
                (id: 1, key: "mario", name: "Other Mario"),
            ],
        )
        "#;

        let mut loader = Loader::new();
        let err = loader.load_characters_str(content).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_duplicate_baseline_id() {
        let content = r#"(entries: {1: Dummy, 1: Slots(["01"])})"#;

        let mut loader = Loader::new();
        let err = loader.load_baseline_str(content).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_missing_baseline_defaults_to_dummy() {
        let content = r#"(characters: [(id: 4, key: "yoshi", name: "Yoshi")])"#;

        let mut loader = Loader::new();
        loader.load_characters_str(content).unwrap();
        let data = loader.finish().unwrap();

        assert_eq!(data.baseline.get(EntityId::new(4)), Some(&BaselineValue::Dummy));
    }

    #[test]
    fn test_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("characters.ron"),
            r#"(characters: [(id: 0, key: "fox", name: "Fox")])"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("baseline.ron"),
            r#"(entries: {0: Slots(["02"]), 1: Dummy})"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut loader = Loader::new();
        loader.load_directory(dir.path()).unwrap();
        let data = loader.finish().unwrap();

        assert_eq!(data.directory.len(), 1);
        assert_eq!(data.baseline.len(), 2);
    }

    #[test]
    fn test_empty_loader_is_rejected() {
        assert!(matches!(
            Loader::new().finish(),
            Err(Error::InvalidSchema(_))
        ));
    }
}
