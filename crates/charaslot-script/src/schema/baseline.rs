//! Baseline table file schema

use charaslot_core::{BaselineValue, EntityId};
use serde::{Deserialize, Serialize};

/// Contents of a `baseline.ron` file
///
/// Entries are kept as a list of pairs so that repeated ids can be reported
/// instead of silently overwritten.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BaselineDefs {
    #[serde(with = "pairs")]
    pub entries: Vec<(EntityId, BaselineValue)>,
}

mod pairs {
    use charaslot_core::{BaselineValue, EntityId};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        entries: &[(EntityId, BaselineValue)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (id, value) in entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(EntityId, BaselineValue)>, D::Error> {
        struct PairVisitor;

        impl<'de> Visitor<'de> for PairVisitor {
            type Value = Vec<(EntityId, BaselineValue)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of entity ids to baseline values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(pair) = map.next_entry()? {
                    entries.push(pair);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(PairVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charaslot_core::SlotCode;

    #[test]
    fn test_baseline_defs_ron() {
        let ron_str = r#"
        (
            entries: {
                2: Dummy,
                0: Slots(["00"]),
                2: Dummy,
            },
        )
        "#;

        let defs: BaselineDefs = ron::from_str(ron_str).unwrap();
        assert_eq!(defs.entries.len(), 3);
        assert_eq!(defs.entries[0], (EntityId::new(2), BaselineValue::Dummy));
        assert_eq!(
            defs.entries[1].1,
            BaselineValue::Slots(vec![SlotCode::new("00")])
        );
    }
}
