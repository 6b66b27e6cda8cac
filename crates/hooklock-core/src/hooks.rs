//! Installing the pre-commit git hook
//!
//! Nothing here is fatal: a missing tool, a directory outside git or a
//! failing install only change the returned [`InstallOutcome`].

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{ErrorCode, Repository};
use serde::Serialize;

/// Result of [`InstallHooks::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    /// The `pre-commit` executable did not answer `--version`.
    ToolMissing,
    /// The project is not inside a git repository.
    NotAGitRepository,
    /// `<gitdir>/hooks/pre-commit` already exists.
    AlreadyInstalled { hook: PathBuf },
    /// The hook is missing but this is a dry run.
    DryRun,
    Installed { hook: PathBuf },
    Failed { message: String },
}

/// Runs `pre-commit install` when the git hook is missing.
#[derive(Debug, Clone)]
pub struct InstallHooks {
    project_root: PathBuf,
    program: String,
    dry_run: bool,
}

impl InstallHooks {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            program: "pre-commit".to_string(),
            dry_run: false,
        }
    }

    /// Use another executable in place of `pre-commit`.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn execute(&self) -> InstallOutcome {
        if !self.tool_available() {
            tracing::debug!(
                program = %self.program,
                "pre-commit is not installed, skipping hook install"
            );
            return InstallOutcome::ToolMissing;
        }

        let repo = match Repository::discover(&self.project_root) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                tracing::debug!(
                    root = %self.project_root.display(),
                    "Not in a git repository, skipping hook install"
                );
                return InstallOutcome::NotAGitRepository;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not open git repository");
                return InstallOutcome::Failed {
                    message: e.message().to_string(),
                };
            }
        };

        let hook = hook_path(&repo);
        if hook.exists() {
            tracing::debug!(hook = %hook.display(), "pre-commit hook already installed");
            return InstallOutcome::AlreadyInstalled { hook };
        }
        if self.dry_run {
            tracing::debug!("Dry run, skipping hook install");
            return InstallOutcome::DryRun;
        }

        let workdir = repo.workdir().unwrap_or(self.project_root.as_path()).to_path_buf();
        self.install(&workdir, hook)
    }

    fn tool_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .is_ok_and(|output| output.status.success())
    }

    fn install(&self, workdir: &Path, hook: PathBuf) -> InstallOutcome {
        tracing::info!(workdir = %workdir.display(), "Installing pre-commit hooks");
        match Command::new(&self.program).arg("install").current_dir(workdir).output() {
            Ok(output) if output.status.success() => {
                tracing::info!(hook = %hook.display(), "pre-commit hooks installed");
                InstallOutcome::Installed { hook }
            }
            Ok(output) => {
                let message = String::from_utf8_lossy(&output.stderr).trim().to_string();
                tracing::warn!(
                    status = ?output.status.code(),
                    %message,
                    "Failed to install pre-commit hooks"
                );
                InstallOutcome::Failed { message }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to run pre-commit install");
                InstallOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// Hooks live in the common git dir, shared by every worktree.
fn hook_path(repo: &Repository) -> PathBuf {
    repo.commondir().join("hooks").join("pre-commit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tool() {
        let dir = TempDir::new().unwrap();
        let outcome = InstallHooks::new(dir.path())
            .program("hooklock-test-no-such-program")
            .execute();
        assert_eq!(outcome, InstallOutcome::ToolMissing);
    }

    #[cfg(unix)]
    #[test]
    fn test_outside_git() {
        let dir = TempDir::new().unwrap();
        let outcome = InstallHooks::new(dir.path()).program("true").execute();
        assert_eq!(outcome, InstallOutcome::NotAGitRepository);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_hook_is_kept() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let hooks = repo.path().join("hooks");
        fs::create_dir_all(&hooks).unwrap();
        fs::write(hooks.join("pre-commit"), "#!/bin/sh\n").unwrap();

        let outcome = InstallHooks::new(dir.path()).program("true").execute();
        assert!(matches!(outcome, InstallOutcome::AlreadyInstalled { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_dry_run_does_not_install() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        let outcome = InstallHooks::new(dir.path()).program("true").dry_run(true).execute();
        assert_eq!(outcome, InstallOutcome::DryRun);
    }

    #[cfg(unix)]
    #[test]
    fn test_install_runs_program() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        let outcome = InstallHooks::new(dir.path()).program("true").execute();
        assert!(matches!(outcome, InstallOutcome::Installed { .. }));
    }
}
