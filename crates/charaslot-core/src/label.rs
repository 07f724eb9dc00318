//! Label codec
//!
//! Each assignment is stored as two title entries sharing slot and key:
//! - `ui_chr1_<slot>_<key>` holds the title as given
//! - `ui_chr2_<slot>_<key>` holds the upper-cased title
//!
//! Only the first form takes part in roster derivation.

use crate::identity::SlotCode;
use crate::title::TitleEntry;
use regex::Regex;
use std::sync::LazyLock;

/// Label prefix of the display-case entry
pub const TITLE_PREFIX: &str = "ui_chr1_";

/// Label prefix of the upper-case entry
pub const UPPER_TITLE_PREFIX: &str = "ui_chr2_";

static ROSTER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ui_chr1_([0-9]{2})_([A-Za-z0-9_]+)").expect("roster label pattern is valid")
});

/// Slot and entity key recovered from a roster-relevant label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLabel {
    pub slot: SlotCode,
    pub key: String,
}

/// Produce the display-case and upper-case entries for one assignment
pub fn encode(slot: &SlotCode, key: &str, title: &str) -> [TitleEntry; 2] {
    [
        TitleEntry::new(format!("{TITLE_PREFIX}{slot}_{key}"), title),
        TitleEntry::new(format!("{UPPER_TITLE_PREFIX}{slot}_{key}"), title.to_uppercase()),
    ]
}

/// Parse a label back into slot and key.
///
/// The label is searched, not matched whole: the first
/// `ui_chr1_<2 digits>_<key>` inside it wins and the key stops at the first
/// character outside `[A-Za-z0-9_]`. Digits and key characters are ASCII
/// only. Returns `None` for labels that carry no roster information, such as
/// the upper-case duplicates.
pub fn decode(label: &str) -> Option<RosterLabel> {
    let caps = ROSTER_LABEL.captures(label)?;
    Some(RosterLabel {
        slot: SlotCode::new(&caps[1]),
        key: caps[2].to_string(),
    })
}
