//! Error types for charaslot-core

use thiserror::Error;

/// Compile error type
///
/// Every variant aborts the compile that raised it; no artifact is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Invalid slot code: {0:?}")]
    InvalidSlotCode(String),

    #[error("Slot out of range: {0} (expected 1..=8)")]
    SlotOutOfRange(u8),

    #[error("Invalid search pattern: {0}")]
    InvalidQuery(String),

    #[error("Entity id {0} is not part of the baseline table")]
    UnknownBaselineId(u32),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
