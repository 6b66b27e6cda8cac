//! Lockfile to hook configuration synchronization

mod action;
mod engine;
mod outcome;

pub use action::SyncHooks;
pub use engine::{Analysis, SyncEngine};
pub use outcome::{DependencyChange, HookChange, PackageRev, RepoChange, SyncOutcome};
