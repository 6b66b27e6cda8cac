//! Error types for hooklock-content

/// Result type for hooklock-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or patching a hook configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The text is not valid YAML.
    #[error("Invalid YAML at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The YAML is valid but does not have the hook configuration shape.
    #[error("Invalid pre-commit config at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A non-empty edit set left every line untouched.
    #[error("{edits} repository update(s) produced no change to the file")]
    NoChanges { edits: usize },

    #[error(transparent)]
    Fs(#[from] hooklock_fs::Error),
}

impl Error {
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// True when the configuration file itself does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Fs(e) if e.is_not_found())
    }
}
