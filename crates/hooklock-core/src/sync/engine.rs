//! Decide which declared repositories disagree with the lock

use std::collections::{HashMap, HashSet};

use hooklock_content::{HookEntry, RepoEntry};
use hooklock_registry::{DependencyRegistry, RepoMapping, ReverseIndex, normalize_git_url};

use crate::error::Result;
use crate::locked::{LockedPackages, canonicalize_name, is_local_version};
use crate::requirement::Requirement;

/// Result of [`SyncEngine::analyze`], keyed by the declared (normalized)
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Declared entry to corrected entry
    pub to_fix: HashMap<RepoEntry, RepoEntry>,
    /// Mapped entries that already match the lock
    pub in_sync: HashMap<RepoEntry, RepoEntry>,
}

impl Analysis {
    /// No declared repository is known to the registry.
    pub fn is_empty(&self) -> bool {
        self.to_fix.is_empty() && self.in_sync.is_empty()
    }
}

/// Compares declared repositories with locked packages.
#[derive(Debug, Clone)]
pub struct SyncEngine<'a> {
    registry: DependencyRegistry,
    reverse: ReverseIndex,
    locked: &'a LockedPackages,
    ignore: HashSet<String>,
}

impl<'a> SyncEngine<'a> {
    /// Fails only when the registry maps one URL to two packages.
    pub fn new<I, S>(
        registry: DependencyRegistry,
        locked: &'a LockedPackages,
        ignore: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reverse = registry.reverse_index()?;
        Ok(Self {
            registry,
            reverse,
            locked,
            ignore: ignore
                .into_iter()
                .map(|name| canonicalize_name(name.as_ref()))
                .collect(),
        })
    }

    /// Whether `package` is in the ignore list, compared by canonical name.
    pub fn is_ignored(&self, package: &str) -> bool {
        self.ignore.contains(&canonicalize_name(package))
    }

    /// Package a declared (normalized) repository maps to.
    pub fn package_for(&self, entry: &RepoEntry) -> Option<&str> {
        self.reverse.get(&entry.repo)
    }

    pub fn analyze(&self, declared: &[RepoEntry]) -> Analysis {
        let mut analysis = Analysis::default();
        for old in declared {
            let Some(package) = self.package_for(old) else {
                tracing::debug!(repo = %old.repo, "Repository not in the dependency mapping");
                continue;
            };
            let Some(mapping) = self.registry.get(package) else {
                continue;
            };

            let new = RepoEntry {
                repo: self.new_repo(old, mapping),
                rev: self.new_rev(old, package, mapping),
                hooks: old.hooks.iter().map(|hook| self.new_hook(hook)).collect(),
            };
            if new != *old {
                analysis.to_fix.insert(old.clone(), new);
            } else {
                analysis.in_sync.insert(old.clone(), old.clone());
            }
        }
        tracing::debug!(
            to_fix = analysis.to_fix.len(),
            in_sync = analysis.in_sync.len(),
            "Analyzed declared repositories"
        );
        analysis
    }

    fn new_repo(&self, old: &RepoEntry, mapping: &RepoMapping) -> String {
        if normalize_git_url(&mapping.repo) == old.repo {
            old.repo.clone()
        } else {
            tracing::debug!(from = %old.repo, to = %mapping.repo, "Repository moved");
            mapping.repo.clone()
        }
    }

    fn new_rev(&self, old: &RepoEntry, package: &str, mapping: &RepoMapping) -> String {
        let Some(locked) = self.locked.get(package) else {
            tracing::debug!(repo = %old.repo, package, "Mapped package not found in the lockfile");
            return old.rev.clone();
        };
        if locked.is_local_version() {
            tracing::debug!(
                package,
                version = %locked.version,
                "Locked version is a local version, not comparable"
            );
            return old.rev.clone();
        }
        if self.is_ignored(package) {
            tracing::debug!(package, "Ignored by configuration");
            return old.rev.clone();
        }

        let target = mapping.render_rev(&locked.version);
        if target != old.rev {
            tracing::debug!(
                repo = %old.repo,
                package,
                declared = %old.rev,
                locked = %locked.version,
                "Revision differs from the lockfile"
            );
        }
        target
    }

    fn new_hook(&self, hook: &HookEntry) -> HookEntry {
        HookEntry {
            id: hook.id.clone(),
            additional_dependencies: hook
                .additional_dependencies
                .iter()
                .map(|dep| self.new_dependency(dep))
                .collect(),
        }
    }

    fn new_dependency(&self, dependency: &str) -> String {
        if is_local_version(dependency) {
            tracing::debug!(dependency, "Additional dependency is a local version");
            return dependency.to_string();
        }
        let Some(requirement) = Requirement::parse(dependency) else {
            tracing::debug!(dependency, "Additional dependency is not a pinnable requirement");
            return dependency.to_string();
        };
        let Some(locked) = self.locked.get(&requirement.name) else {
            tracing::debug!(dependency, "Additional dependency not found in the lockfile");
            return dependency.to_string();
        };
        if locked.is_local_version() {
            tracing::debug!(
                dependency,
                version = %locked.version,
                "Locked version is a local version"
            );
            return dependency.to_string();
        }
        if requirement.pinned_version() == Some(locked.version.as_str()) {
            return dependency.to_string();
        }
        requirement.pinned(&locked.version).to_string()
    }
}
