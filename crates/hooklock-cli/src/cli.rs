//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Sync .pre-commit-config.yaml hook versions with the project lockfile
#[derive(Parser, Debug)]
#[command(name = "sync-pre-commit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show the difference only and don't perform any action
    #[arg(long)]
    pub dry_run: bool,

    /// Show detailed output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Hide all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Lockfile to read instead of discovering uv.lock, pdm.lock or poetry.lock
    #[arg(long, value_name = "PATH")]
    pub lockfile: Option<PathBuf>,

    /// pyproject.toml holding [tool.sync-pre-commit-lock]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never run `pre-commit install`
    #[arg(long)]
    pub no_install: bool,
}

impl Cli {
    /// Log filter forced by flags, if any.
    pub fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "sync-pre-commit",
            "--dry-run",
            "-v",
            "--project",
            "demo",
            "--lockfile",
            "demo/uv.lock",
            "--no-install",
        ]);
        assert!(cli.dry_run);
        assert!(cli.no_install);
        assert_eq!(cli.log_level(), Some("debug"));
        assert_eq!(cli.project, Some(PathBuf::from("demo")));
        assert_eq!(cli.lockfile, Some(PathBuf::from("demo/uv.lock")));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["sync-pre-commit", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_default_log_level() {
        let cli = Cli::parse_from(["sync-pre-commit"]);
        assert_eq!(cli.log_level(), None);
        assert!(!cli.json);
    }
}
