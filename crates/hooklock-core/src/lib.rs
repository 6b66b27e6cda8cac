//! Lockfile-driven synchronization of pre-commit hook versions
//!
//! Reads resolved package versions from a lockfile, maps them to the
//! pre-commit repositories that ship their hooks, and corrects the `rev:`
//! and `additional_dependencies` pins of a hook configuration in place.
//!
//! ```text
//!                 hooklock-cli
//!                      |
//!                 hooklock-core
//!                      |
//!     +----------------+-----------------+
//!     |                |                 |
//! hooklock-fs  hooklock-registry  hooklock-content
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod locked;
pub mod requirement;
pub mod sync;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use hooks::{InstallHooks, InstallOutcome};
pub use locked::{LockedPackage, LockedPackages, canonicalize_name, is_local_version};
pub use requirement::Requirement;
pub use sync::{
    Analysis, DependencyChange, HookChange, PackageRev, RepoChange, SyncEngine, SyncHooks,
    SyncOutcome,
};
