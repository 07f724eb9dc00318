//! Identity types for entities and slots

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest caller-facing slot number
pub const MAX_SLOT: u8 = 8;

/// Numeric id of a directory entity, as used by the parameter table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Two-digit slot code as it appears inside labels and byte hashes
///
/// The string form is kept verbatim (`"03"` stays `"03"`); the numeric form
/// is only produced on demand through [`SlotCode::value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCode(String);

impl SlotCode {
    /// Wrap an already-encoded slot code without validating it
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Encode a 1-based slot number as a zero-padded code
    ///
    /// ```
    /// use charaslot_core::SlotCode;
    ///
    /// assert_eq!(SlotCode::from_slot(3).unwrap().as_str(), "03");
    /// assert!(SlotCode::from_slot(9).is_err());
    /// ```
    pub fn from_slot(slot: u8) -> Result<Self> {
        if !(1..=MAX_SLOT).contains(&slot) {
            return Err(Error::SlotOutOfRange(slot));
        }
        Ok(Self(format!("{:02}", slot)))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the code as an integer (`"03"` is `3`)
    pub fn value(&self) -> Result<u32> {
        self.0
            .parse()
            .map_err(|_| Error::InvalidSlotCode(self.0.clone()))
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SlotCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id() {
        let id = EntityId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_slot_code_encoding() {
        assert_eq!(SlotCode::from_slot(1).unwrap().as_str(), "01");
        assert_eq!(SlotCode::from_slot(8).unwrap().as_str(), "08");
        assert_eq!(SlotCode::from_slot(0), Err(Error::SlotOutOfRange(0)));
        assert_eq!(SlotCode::from_slot(9), Err(Error::SlotOutOfRange(9)));
    }

    #[test]
    fn test_slot_code_value() {
        assert_eq!(SlotCode::new("03").value(), Ok(3));
        assert_eq!(SlotCode::from_slot(3).unwrap().value(), Ok(3));
        assert_eq!(
            SlotCode::new("x1").value(),
            Err(Error::InvalidSlotCode("x1".to_string()))
        );
        assert_eq!(SlotCode::new("256").value(), Ok(256));
    }
}
