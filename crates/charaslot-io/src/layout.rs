//! Output layout configuration

use crate::encoding::TextEncoding;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where and how the two artifacts are persisted, relative to a root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputLayout {
    /// Title table path
    #[serde(default = "default_title_path")]
    pub title_path: PathBuf,
    /// Roster parameter table path
    #[serde(default = "default_param_path")]
    pub param_path: PathBuf,
    /// Encoding of the title table
    #[serde(default = "default_title_encoding")]
    pub title_encoding: TextEncoding,
    /// Encoding of the parameter table
    #[serde(default)]
    pub param_encoding: TextEncoding,
}

fn default_title_path() -> PathBuf {
    PathBuf::from("ui/message/msg_name.xmsbt")
}

fn default_param_path() -> PathBuf {
    PathBuf::from("ui/param/database/ui_chara_db.prcx")
}

fn default_title_encoding() -> TextEncoding {
    TextEncoding::Utf16Le
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            title_path: default_title_path(),
            param_path: default_param_path(),
            title_encoding: default_title_encoding(),
            param_encoding: TextEncoding::default(),
        }
    }
}

impl OutputLayout {
    /// Load a layout from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        ron::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = OutputLayout::default();
        assert_eq!(layout.title_path, Path::new("ui/message/msg_name.xmsbt"));
        assert_eq!(layout.title_encoding, TextEncoding::Utf16Le);
        assert_eq!(layout.param_encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_partial_layout_ron() {
        let layout: OutputLayout = ron::from_str(r#"(title_path: "msg/names.xmsbt")"#).unwrap();
        assert_eq!(layout.title_path, Path::new("msg/names.xmsbt"));
        assert_eq!(layout.param_path, default_param_path());
        assert_eq!(layout.title_encoding, TextEncoding::Utf16Le);
    }

    #[test]
    fn test_load_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.ron");
        fs::write(&path, "(title_path: 5)").unwrap();
        assert!(matches!(OutputLayout::load(&path), Err(Error::Config(_))));
    }
}
