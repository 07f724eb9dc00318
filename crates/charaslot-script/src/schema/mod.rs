//! Schema definitions for RON dataset files

pub mod baseline;
pub mod character;

pub use baseline::BaselineDefs;
pub use character::CharacterDefs;
