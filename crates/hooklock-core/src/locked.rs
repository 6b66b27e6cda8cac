//! Resolved package versions
//!
//! Every package manager ends up as the same value type; adapters at the
//! bottom of this module turn their lockfiles into it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hooklock_fs::ProjectFile;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// PEP 503 normalized form of a package name.
///
/// Lowercase, with every run of `-`, `_` and `.` collapsed to a single `-`.
pub fn canonicalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    out
}

/// Versions with a `+local` segment are builds nobody can pin against.
pub fn is_local_version(version: &str) -> bool {
    version.contains('+')
}

/// A package pinned by the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPackage {
    /// Name as spelled in the lock
    pub name: String,
    pub version: String,
}

impl LockedPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn is_local_version(&self) -> bool {
        is_local_version(&self.version)
    }
}

/// Locked packages keyed by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LockedPackages {
    packages: BTreeMap<String, LockedPackage>,
}

impl LockedPackages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, version)` pairs. A later duplicate replaces an
    /// earlier one.
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut packages = Self::new();
        for (name, version) in pairs {
            packages.insert(LockedPackage::new(name, version));
        }
        packages
    }

    pub fn insert(&mut self, package: LockedPackage) -> Option<LockedPackage> {
        self.packages.insert(canonicalize_name(&package.name), package)
    }

    /// Look up by any spelling of the name.
    pub fn get(&self, name: &str) -> Option<&LockedPackage> {
        self.packages.get(&canonicalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LockedPackage> {
        self.packages.values()
    }

    /// Read a `uv.lock`, `pdm.lock` or `poetry.lock` file.
    ///
    /// All three list their packages as `[[package]]` tables. Entries
    /// without both a name and a version (virtual or workspace members)
    /// are skipped.
    pub fn from_lockfile(path: &Path) -> Result<Self> {
        let lock: Lockfile = hooklock_fs::load_toml(path)?;
        let mut packages = Self::new();
        let mut skipped = 0usize;
        for entry in lock.package {
            match (entry.name, entry.version) {
                (Some(name), Some(version)) => {
                    packages.insert(LockedPackage::new(name, version));
                }
                _ => skipped += 1,
            }
        }
        tracing::debug!(
            path = %path.display(),
            packages = packages.len(),
            skipped,
            "Loaded lockfile"
        );
        Ok(packages)
    }

    /// Find and read the lockfile of a project.
    ///
    /// `uv.lock` is preferred, then `pdm.lock`, then `poetry.lock`.
    pub fn discover(root: &Path) -> Result<(PathBuf, Self)> {
        let path = ProjectFile::find_lockfile(root).ok_or_else(|| Error::LockfileNotFound {
            root: root.to_path_buf(),
            searched: ProjectFile::LOCKFILES
                .iter()
                .map(ProjectFile::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })?;
        let packages = Self::from_lockfile(&path)?;
        Ok((path, packages))
    }
}

impl<'a> IntoIterator for &'a LockedPackages {
    type Item = &'a LockedPackage;
    type IntoIter = std::collections::btree_map::Values<'a, String, LockedPackage>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.values()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Lockfile {
    #[serde(default)]
    package: Vec<LockfileEntry>,
}

#[derive(Debug, Deserialize)]
struct LockfileEntry {
    name: Option<String>,
    version: Option<String>,
}
