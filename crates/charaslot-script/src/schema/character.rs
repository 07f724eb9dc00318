//! Character directory file schema

use charaslot_core::EntityRecord;
use serde::{Deserialize, Serialize};

/// Contents of a `characters.ron` file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CharacterDefs {
    pub characters: Vec<EntityRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_defs_ron() {
        let ron_str = r#"
        (
            characters: [
                (id: 0, key: "mario", name: "Mario"),
                (id: 19, key: "mariod", name: "Dr. Mario"),
            ],
        )
        "#;

        let defs: CharacterDefs = ron::from_str(ron_str).unwrap();
        assert_eq!(defs.characters.len(), 2);
        assert_eq!(defs.characters[1].key, "mariod");
        assert_eq!(defs.characters[1].id.raw(), 19);
    }
}
