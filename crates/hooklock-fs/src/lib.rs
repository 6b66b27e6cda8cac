//! Filesystem access for hooklock
//!
//! Reads the hook configuration and lockfiles as text, loads TOML
//! configuration, and persists rewritten files with a single whole-file write.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;

pub use config::{load_toml, load_toml_or_default};
pub use constants::ProjectFile;
pub use error::{Error, Result};
