//! Well-known file names in a Python project.

use std::path::{Path, PathBuf};

/// Files hooklock looks for in a project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFile {
    /// `pyproject.toml`, home of the `[tool.sync-pre-commit-lock]` table
    PyProject,
    /// `.pre-commit-config.yaml`
    PreCommitConfig,
    /// `uv.lock`
    UvLock,
    /// `pdm.lock`
    PdmLock,
    /// `poetry.lock`
    PoetryLock,
}

impl ProjectFile {
    /// Lockfiles in discovery order.
    pub const LOCKFILES: [ProjectFile; 3] = [Self::UvLock, Self::PdmLock, Self::PoetryLock];

    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PyProject => "pyproject.toml",
            Self::PreCommitConfig => ".pre-commit-config.yaml",
            Self::UvLock => "uv.lock",
            Self::PdmLock => "pdm.lock",
            Self::PoetryLock => "poetry.lock",
        }
    }

    /// Resolve this file against a project root.
    pub fn in_dir(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(self.as_str())
    }

    /// First lockfile present in `root`, if any.
    pub fn find_lockfile(root: impl AsRef<Path>) -> Option<PathBuf> {
        Self::LOCKFILES
            .iter()
            .map(|file| file.in_dir(root.as_ref()))
            .find(|path| path.is_file())
    }
}

impl AsRef<Path> for ProjectFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ProjectFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
