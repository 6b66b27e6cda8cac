//! TOML configuration loading

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result, io};

/// Load and deserialize a TOML file.
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = io::read_text(path)?;
    toml::from_str(&content).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        format: "TOML".into(),
        message: e.to_string(),
    })
}

/// Load a TOML file, falling back to `T::default()` when it does not exist.
///
/// Parse errors are still reported.
pub fn load_toml_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match load_toml(path) {
        Err(Error::NotFound { path }) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(T::default())
        }
        other => other,
    }
}
