//! On-disk hook configuration

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::Result;
use crate::model::RepoEntry;

/// A pre-commit configuration loaded from disk.
#[derive(Debug, Clone)]
pub struct HookConfigFile {
    path: PathBuf,
    document: Document,
}

impl HookConfigFile {
    /// Read and parse the file. Nothing is written by loading.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = hooklock_fs::io::read_text(&path)?;
        let document = Document::parse(text)?;
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply `edits` and rewrite the whole file once.
    ///
    /// Returns the number of changed lines. An empty edit set returns 0
    /// without touching the file.
    pub fn update_revisions(&mut self, edits: &HashMap<RepoEntry, RepoEntry>) -> Result<usize> {
        if edits.is_empty() {
            tracing::debug!(path = %self.path.display(), "No edits, leaving file untouched");
            return Ok(0);
        }

        let patch = self.document.patch(edits)?;
        let changed = patch.changed_lines();
        hooklock_fs::io::write_text(&self.path, patch.text())?;
        tracing::info!(path = %self.path.display(), changed, "Updated pre-commit config");

        self.document = Document::parse(patch.into_text())?;
        Ok(changed)
    }
}
