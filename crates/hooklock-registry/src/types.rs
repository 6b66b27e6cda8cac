//! Registry entry type

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the locked version in a revision template.
pub const REV_PLACEHOLDER: &str = "${rev}";

/// Where a package's pre-commit hook lives and how its tags are spelled.
///
/// Field names match the `dependency-mapping` table of the user
/// configuration, so user overrides deserialize straight into this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoMapping {
    /// Canonical repository URL
    pub repo: String,
    /// Revision template, e.g. `v${rev}`
    pub rev: String,
}

impl RepoMapping {
    pub fn new(repo: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            rev: rev.into(),
        }
    }

    /// Expected `rev:` value for a locked version.
    ///
    /// The version is inserted verbatim, no semver coercion.
    pub fn render_rev(&self, version: &str) -> String {
        self.rev.replace(REV_PLACEHOLDER, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rev_plain() {
        let mapping = RepoMapping::new("https://github.com/psf/black-pre-commit-mirror", "${rev}");
        assert_eq!(mapping.render_rev("23.3.0"), "23.3.0");
    }

    #[test]
    fn test_render_rev_prefixed() {
        let mapping = RepoMapping::new("https://github.com/pre-commit/mirrors-mypy", "v${rev}");
        assert_eq!(mapping.render_rev("1.5.0"), "v1.5.0");
    }

    #[test]
    fn test_render_rev_keeps_version_verbatim() {
        let mapping = RepoMapping::new("https://example.com/x", "v${rev}");
        assert_eq!(mapping.render_rev("1.0.0rc1"), "v1.0.0rc1");
    }
}
