//! Error types for hooklock-registry

/// Result type for hooklock-registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building registry lookups
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Repository {url} is mapped to both `{first}` and `{second}`")]
    ConflictingMapping {
        url: String,
        first: String,
        second: String,
    },
}
