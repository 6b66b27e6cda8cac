//! User configuration from `pyproject.toml`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use hooklock_fs::ProjectFile;
use hooklock_registry::{DependencyRegistry, RepoMapping};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings read from `[tool.sync-pre-commit-lock]`.
///
/// Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SyncConfig {
    /// Run `pre-commit install` when the git hook is missing
    pub automatically_install_hooks: bool,
    /// Turn the sync into a no-op
    pub disable_sync_from_lock: bool,
    /// Packages whose own repository revision is never changed
    pub ignore: Vec<String>,
    /// Hook configuration path, relative to the project root
    pub pre_commit_config_file: PathBuf,
    /// Extra or replacement package to repository mappings
    pub dependency_mapping: BTreeMap<String, RepoMapping>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            automatically_install_hooks: true,
            disable_sync_from_lock: false,
            ignore: Vec::new(),
            pre_commit_config_file: PathBuf::from(ProjectFile::PreCommitConfig.as_str()),
            dependency_mapping: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Tools,
}

#[derive(Debug, Default, Deserialize)]
struct Tools {
    #[serde(default, rename = "sync-pre-commit-lock")]
    sync_pre_commit_lock: SyncConfig,
}

impl SyncConfig {
    /// Load from a `pyproject.toml`. A missing file gives the defaults.
    pub fn load(pyproject: &Path) -> Result<Self> {
        let project: PyProject = hooklock_fs::load_toml_or_default(pyproject)?;
        Ok(project.tool.sync_pre_commit_lock)
    }

    /// Load from `<root>/pyproject.toml`.
    pub fn load_from_dir(root: &Path) -> Result<Self> {
        Self::load(&ProjectFile::PyProject.in_dir(root))
    }

    /// The built-in registry with this configuration's mappings applied.
    pub fn registry(&self) -> DependencyRegistry {
        DependencyRegistry::builtin().with_overrides(&self.dependency_mapping)
    }

    /// Hook configuration path resolved against `root`.
    pub fn pre_commit_config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.pre_commit_config_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn load(text: &str) -> Result<SyncConfig> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, text).unwrap();
        SyncConfig::load(&path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SyncConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config, SyncConfig::default());
        assert!(config.automatically_install_hooks);
        assert_eq!(config.pre_commit_config_file, PathBuf::from(".pre-commit-config.yaml"));
    }

    #[test]
    fn test_missing_table_gives_defaults() {
        let config = load("[project]\nname = \"demo\"\n").unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_all_keys() {
        let config = load(
            r#"
[tool.sync-pre-commit-lock]
automatically-install-hooks = false
disable-sync-from-lock = true
ignore = ["Black"]
pre-commit-config-file = "ci/hooks.yaml"
unknown-key = 1

[tool.sync-pre-commit-lock.dependency-mapping]
my-linter = { repo = "https://github.com/me/my-linter", rev = "v${rev}" }
"#,
        )
        .unwrap();

        assert!(!config.automatically_install_hooks);
        assert!(config.disable_sync_from_lock);
        assert_eq!(config.ignore, vec!["Black".to_string()]);
        assert_eq!(
            config.pre_commit_config_path(Path::new("/repo")),
            PathBuf::from("/repo/ci/hooks.yaml")
        );
        let registry = config.registry();
        assert_eq!(
            registry.get("my-linter"),
            Some(&RepoMapping::new("https://github.com/me/my-linter", "v${rev}"))
        );
        assert!(registry.contains("black"));
    }

    #[test]
    fn test_override_replaces_whole_entry() {
        let config = load(
            r#"
[tool.sync-pre-commit-lock.dependency-mapping.black]
repo = "https://github.com/psf/black"
rev = "v${rev}"
"#,
        )
        .unwrap();
        assert_eq!(config.registry().get("black").unwrap().rev, "v${rev}");
        assert_eq!(DependencyRegistry::builtin().get("black").unwrap().rev, "${rev}");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(load("[tool.sync-pre-commit-lock\n").is_err());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        assert!(load("[tool.sync-pre-commit-lock]\nignore = \"black\"\n").is_err());
    }
}
