//! Value types for declared repositories and hooks

use serde::{Deserialize, Serialize};

/// A hook inside a repository block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HookEntry {
    /// Hook id
    pub id: String,
    /// Requirement strings from `additional_dependencies`, in file order
    #[serde(default)]
    pub additional_dependencies: Vec<String>,
}

impl HookEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            additional_dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// A repository block that pins a revision.
///
/// Equality is structural over url, revision and hooks (hook order
/// matters). Matching an edit against the file uses the normalized url of
/// the declared entry as well, so the same logical repository is found
/// whatever its current revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Repository URL
    pub repo: String,
    /// Pinned revision (`rev:`)
    pub rev: String,
    /// Hooks in file order
    #[serde(default)]
    pub hooks: Vec<HookEntry>,
}

impl RepoEntry {
    pub fn new(repo: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            rev: rev.into(),
            hooks: Vec::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: Vec<HookEntry>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Same entry with its url passed through the normalizer.
    pub fn normalized(&self) -> Self {
        Self {
            repo: hooklock_registry::normalize_git_url(&self.repo),
            ..self.clone()
        }
    }
}
