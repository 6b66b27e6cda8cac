//! Error types for hooklock-core

use std::path::PathBuf;

/// Result type for hooklock-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing hooks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No supported lockfile in the project root
    #[error("No lockfile found in {root} (looked for {searched})")]
    LockfileNotFound { root: PathBuf, searched: String },

    /// Filesystem or configuration error from hooklock-fs
    #[error(transparent)]
    Fs(#[from] hooklock_fs::Error),

    /// Parse or patch error from hooklock-content
    #[error(transparent)]
    Content(#[from] hooklock_content::Error),

    /// Inconsistent dependency mapping from hooklock-registry
    #[error(transparent)]
    Registry(#[from] hooklock_registry::Error),
}

