//! Pre-commit hook configuration parsing and format-preserving patching
//!
//! The configuration is parsed once into a line-annotated view of its repos,
//! hooks and additional dependencies. Updates are applied as substring
//! replacements on the original lines, so comments, indentation, flow-style
//! blocks and document separators survive untouched.

pub mod document;
pub mod error;
pub mod file;
pub mod model;
pub mod patch;
pub mod span;
mod yaml;

pub use document::{Document, HookBlock, Located, RepoBlock, document_start_offset};
pub use error::{Error, Result};
pub use file::HookConfigFile;
pub use model::{HookEntry, RepoEntry};
pub use patch::Patch;
pub use span::{LineBuffer, LineMatch, raw_line_index};
