//! What a sync run did, for display or JSON output

use std::path::PathBuf;

use hooklock_content::RepoEntry;
use serde::Serialize;

/// Final state of a [`crate::SyncHooks`] run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// `disable-sync-from-lock` is set.
    Disabled,
    /// There is no hook configuration file.
    MissingConfig { path: PathBuf },
    /// No declared repository is in the dependency mapping.
    NoMatchingHooks { path: PathBuf },
    /// Every mapped repository already matches the lock.
    UpToDate {
        path: PathBuf,
        packages: Vec<PackageRev>,
    },
    /// Repositories that differ from the lock, in file order.
    Updated {
        path: PathBuf,
        changes: Vec<RepoChange>,
        /// False in dry-run mode
        written: bool,
    },
}

impl SyncOutcome {
    pub fn changes(&self) -> &[RepoChange] {
        match self {
            Self::Updated { changes, .. } => changes,
            _ => &[],
        }
    }
}

/// A mapped package and the revision its repository declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRev {
    pub package: String,
    pub rev: String,
}

/// One corrected repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoChange {
    pub package: String,
    pub old_repo: String,
    pub new_repo: String,
    pub old_rev: String,
    pub new_rev: String,
    /// Hooks with at least one re-pinned dependency
    pub hooks: Vec<HookChange>,
}

impl RepoChange {
    pub fn new(package: impl Into<String>, old: &RepoEntry, new: &RepoEntry) -> Self {
        let hooks = old
            .hooks
            .iter()
            .zip(&new.hooks)
            .filter_map(|(old_hook, new_hook)| {
                let dependencies: Vec<_> = old_hook
                    .additional_dependencies
                    .iter()
                    .zip(&new_hook.additional_dependencies)
                    .filter(|(old_dep, new_dep)| old_dep != new_dep)
                    .map(|(old_dep, new_dep)| DependencyChange {
                        old: old_dep.clone(),
                        new: new_dep.clone(),
                    })
                    .collect();
                (!dependencies.is_empty()).then(|| HookChange {
                    id: old_hook.id.clone(),
                    dependencies,
                })
            })
            .collect();

        Self {
            package: package.into(),
            old_repo: old.repo.clone(),
            new_repo: new.repo.clone(),
            old_rev: old.rev.clone(),
            new_rev: new.rev.clone(),
            hooks,
        }
    }

    pub fn repo_changed(&self) -> bool {
        self.old_repo != self.new_repo
    }

    pub fn rev_changed(&self) -> bool {
        self.old_rev != self.new_rev
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookChange {
    pub id: String,
    pub dependencies: Vec<DependencyChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyChange {
    pub old: String,
    pub new: String,
}
