//! Charaslot Script - RON loader for the static dataset
//!
//! Loads the read-only inputs of the compiler from RON files:
//! - the character directory (`characters.ron`)
//! - the baseline roster table (`baseline.ron`)
//!
//! A default dataset is compiled into the crate and available through
//! [`Loader::bundled`].

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{Loader, RosterData};
pub use schema::{BaselineDefs, CharacterDefs};
