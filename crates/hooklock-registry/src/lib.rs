//! Known pre-commit repositories for hooklock
//!
//! Maps Python package names to the pre-commit repository that ships their
//! hook, and canonicalizes git URLs so declared repositories can be matched
//! against that table.

mod builtins;
pub mod error;
mod store;
mod types;
pub mod url;

pub use builtins::{BUILTIN_COUNT, builtin_aliases, builtin_entries};
pub use error::{Error, Result};
pub use store::{DependencyRegistry, ReverseIndex};
pub use types::{REV_PLACEHOLDER, RepoMapping};
pub use url::{normalize_git_url, url_diff};
