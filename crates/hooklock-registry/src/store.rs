//! Dependency registry storage and reverse lookup

use std::collections::{BTreeMap, HashMap};

use crate::builtins::{builtin_aliases, builtin_entries};
use crate::error::{Error, Result};
use crate::types::RepoMapping;
use crate::url::normalize_git_url;

/// Immutable table of package name to repository mapping, plus aliases
/// for repositories that moved.
///
/// Merging user overrides produces a new registry; the built-in one is
/// never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyRegistry {
    entries: BTreeMap<String, RepoMapping>,
    aliases: BTreeMap<String, Vec<String>>,
}

impl DependencyRegistry {
    /// Create a registry from explicit tables.
    pub fn new(
        entries: BTreeMap<String, RepoMapping>,
        aliases: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self { entries, aliases }
    }

    /// Create a registry pre-populated with the built-in mappings.
    pub fn builtin() -> Self {
        Self::new(builtin_entries(), builtin_aliases())
    }

    /// Return a new registry where `overrides` replace same-named entries
    /// entirely and add new ones.
    pub fn with_overrides<'a, I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a RepoMapping)>,
    {
        let mut entries = self.entries.clone();
        for (name, mapping) in overrides {
            if entries.insert(name.clone(), mapping.clone()).is_some() {
                tracing::debug!(package = %name, "dependency mapping overridden by configuration");
            }
        }
        Self {
            entries,
            aliases: self.aliases.clone(),
        }
    }

    /// Get the mapping for a package.
    pub fn get(&self, name: &str) -> Option<&RepoMapping> {
        self.entries.get(name)
    }

    /// Check if a package is mapped.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of mapped packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all mappings, sorted by package name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RepoMapping)> {
        self.entries.iter()
    }

    /// Build the URL to package name index.
    ///
    /// Keys are normalized URLs. Aliases are added for every canonical URL
    /// that is present, so a legacy URL resolves to the same package.
    /// A URL reachable from two different packages is a data error.
    pub fn reverse_index(&self) -> Result<ReverseIndex> {
        let mut by_url: HashMap<String, String> = HashMap::with_capacity(self.entries.len());

        for (name, mapping) in &self.entries {
            insert_unique(&mut by_url, normalize_git_url(&mapping.repo), name)?;
        }

        for (canonical, legacy_urls) in &self.aliases {
            let Some(name) = by_url.get(&normalize_git_url(canonical)).cloned() else {
                continue;
            };
            for legacy in legacy_urls {
                insert_unique(&mut by_url, normalize_git_url(legacy), &name)?;
            }
        }

        Ok(ReverseIndex { by_url })
    }
}

fn insert_unique(by_url: &mut HashMap<String, String>, url: String, name: &str) -> Result<()> {
    match by_url.get(&url) {
        Some(existing) if existing != name => Err(Error::ConflictingMapping {
            url,
            first: existing.clone(),
            second: name.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            by_url.insert(url, name.to_string());
            Ok(())
        }
    }
}

/// Normalized repository URL to package name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    by_url: HashMap<String, String>,
}

impl ReverseIndex {
    /// Package name for a normalized repository URL.
    pub fn get(&self, url: &str) -> Option<&str> {
        self.by_url.get(url).map(String::as_str)
    }

    /// Check if a normalized URL is known.
    pub fn contains(&self, url: &str) -> bool {
        self.by_url.contains_key(url)
    }

    /// Number of known URLs, aliases included.
    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}
