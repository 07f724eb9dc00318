//! Paired artifact persistence

use crate::encoding::{self, TextEncoding};
use crate::layout::OutputLayout;
use crate::xml;
use crate::Result;
use charaslot_core::{CompiledArtifacts, Element, TitleTable};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Both artifacts encoded and ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub title: Vec<u8>,
    pub param: Vec<u8>,
}

/// Reads and writes the artifact pair under a destination root
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    root: PathBuf,
    layout: OutputLayout,
}

impl ArtifactWriter {
    /// Create a writer for `root` with the given layout
    pub fn new(root: impl Into<PathBuf>, layout: OutputLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Absolute title table path
    pub fn title_path(&self) -> PathBuf {
        self.root.join(&self.layout.title_path)
    }

    /// Absolute parameter table path
    pub fn param_path(&self) -> PathBuf {
        self.root.join(&self.layout.param_path)
    }

    /// Check whether a title table has been persisted before
    pub fn title_table_exists(&self) -> bool {
        self.title_path().is_file()
    }

    /// Read the persisted title table, if any
    pub fn read_titles(&self) -> Result<Option<TitleTable>> {
        let path = self.title_path();
        if !path.is_file() {
            return Ok(None);
        }
        read_title_table(&path).map(Some)
    }

    /// Render both artifacts into their persisted bytes
    pub fn render(&self, artifacts: &CompiledArtifacts) -> RenderedArtifacts {
        let trees = artifacts.synthesize();
        RenderedArtifacts {
            title: encode(&trees.titles, self.layout.title_encoding),
            param: encode(&trees.roster, self.layout.param_encoding),
        }
    }

    /// Write both artifacts.
    ///
    /// Both files are staged next to their targets and only renamed into
    /// place once both have been written. If a rename fails, targets already
    /// replaced are restored from their backups.
    pub fn write(&self, artifacts: &CompiledArtifacts) -> Result<()> {
        let rendered = self.render(artifacts);
        let targets = [
            (self.title_path(), rendered.title),
            (self.param_path(), rendered.param),
        ];

        let mut staged = Vec::with_capacity(targets.len());
        for (path, bytes) in &targets {
            match stage(path, bytes) {
                Ok(tmp) => staged.push((tmp, path.clone())),
                Err(e) => {
                    for (tmp, _) in &staged {
                        let _ = fs::remove_file(tmp);
                    }
                    return Err(e);
                }
            }
        }

        commit(&staged)?;
        for (path, bytes) in &targets {
            debug!(path = %path.display(), bytes = bytes.len(), "wrote artifact");
        }

        info!(
            titles = artifacts.titles.len(),
            segments = artifacts.roster.len(),
            root = %self.root.display(),
            "artifacts written"
        );
        Ok(())
    }
}

fn encode(root: &Element, encoding: TextEncoding) -> Vec<u8> {
    encoding.encode(&xml::render_document(root, encoding))
}

fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, bytes)?;
    Ok(tmp)
}

/// Move staged files over their targets as one unit
fn commit(moves: &[(PathBuf, PathBuf)]) -> Result<()> {
    let mut committed: Vec<(&Path, Option<PathBuf>)> = Vec::with_capacity(moves.len());

    for (i, (tmp, path)) in moves.iter().enumerate() {
        match replace(tmp, path) {
            Ok(backup) => committed.push((path.as_path(), backup)),
            Err(e) => {
                for (tmp, _) in &moves[i..] {
                    let _ = fs::remove_file(tmp);
                }
                for (path, backup) in committed.iter().rev() {
                    restore(path, backup.as_deref());
                }
                return Err(e.into());
            }
        }
    }

    for backup in committed.into_iter().filter_map(|(_, b)| b) {
        let _ = fs::remove_file(backup);
    }
    Ok(())
}

/// Rename `tmp` onto `path`, keeping a copy of the previous file
fn replace(tmp: &Path, path: &Path) -> io::Result<Option<PathBuf>> {
    let backup = if path.is_file() {
        let backup = sibling(path, ".bak");
        fs::copy(path, &backup)?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = fs::rename(tmp, path) {
        if let Some(backup) = &backup {
            let _ = fs::remove_file(backup);
        }
        return Err(e);
    }
    Ok(backup)
}

fn restore(path: &Path, backup: Option<&Path>) {
    let result = match backup {
        Some(backup) => fs::rename(backup, path),
        None => fs::remove_file(path),
    };
    if let Err(e) = result {
        warn!(path = %path.display(), error = %e, "failed to restore artifact");
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Read and parse a persisted title table
pub fn read_title_table(path: impl AsRef<Path>) -> Result<TitleTable> {
    let bytes = fs::read(path.as_ref())?;
    let text = encoding::decode(&bytes)?;
    xml::parse_title_table(&text)
}
