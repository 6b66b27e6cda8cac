//! Console rendering of sync and install outcomes

use colored::Colorize;
use hooklock_core::{HookChange, InstallOutcome, RepoChange, Requirement, SyncOutcome};
use hooklock_registry::url::{DiffMarkers, url_diff_with};

/// Lines to print for a sync outcome.
pub fn sync_lines(outcome: &SyncOutcome) -> Vec<String> {
    match outcome {
        SyncOutcome::Disabled => vec![],
        SyncOutcome::MissingConfig { path } => vec![format!(
            "No pre-commit config file detected at {}, skipping sync.",
            path.display()
        )
        .cyan()
        .to_string()],
        SyncOutcome::NoMatchingHooks { .. } => {
            vec!["No pre-commit hook detected that matches a locked package.".cyan().to_string()]
        }
        SyncOutcome::UpToDate { packages, .. } => {
            let packages = packages
                .iter()
                .map(|p| format!("{} ({})", p.package, p.rev))
                .collect::<Vec<_>>()
                .join(", ");
            let line = format!(
                "All pre-commit hooks are already up to date with the lockfile: {packages}"
            );
            vec![line.cyan().to_string()]
        }
        SyncOutcome::Updated {
            path,
            changes,
            written,
        } => {
            let header = "Detected pre-commit hooks that can be updated to match the lockfile:";
            let mut lines = vec![header.cyan().to_string()];
            for change in changes {
                lines.extend(repo_rows(change));
            }
            let file = path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            lines.push(if *written {
                format!("Pre-commit hooks have been updated in {file}!")
                    .green()
                    .bold()
                    .to_string()
            } else {
                "Dry run, skipping pre-commit hook update.".cyan().to_string()
            });
            lines
        }
    }
}

/// Line to print for an install outcome, if it deserves one.
pub fn install_line(outcome: &InstallOutcome) -> Option<String> {
    match outcome {
        InstallOutcome::Installed { .. } => {
            Some("pre-commit hooks successfully installed!".green().to_string())
        }
        _ => None,
    }
}

fn repo_rows(change: &RepoChange) -> Vec<String> {
    let mut row = format!("{} {}", "✔".green(), url(change));
    if change.rev_changed() {
        row.push_str(&format!(
            "  {} {} {}",
            change.old_rev.red().bold(),
            "->".cyan(),
            change.new_rev.green().bold()
        ));
    }

    let mut rows = vec![row];
    let count = change.hooks.len();
    for (idx, hook) in change.hooks.iter().enumerate() {
        rows.extend(hook_rows(hook, idx + 1 == count));
    }
    rows
}

fn url(change: &RepoChange) -> String {
    let open = "{".cyan().to_string();
    let separator = " -> ".cyan().to_string();
    let close = "}".cyan().to_string();
    let markers = DiffMarkers {
        open: &open,
        separator: &separator,
        close: &close,
    };
    let url = url_diff_with(&change.old_repo, &change.new_repo, markers);
    url.replacen(&change.package, &change.package.cyan().bold().to_string(), 1)
}

fn hook_rows(hook: &HookChange, last: bool) -> Vec<String> {
    let mut rows = vec![format!("  {} {}", branch(last), hook.id.cyan().bold())];
    let indent = if last { " " } else { "│" };
    let count = hook.dependencies.len();
    for (idx, dep) in hook.dependencies.iter().enumerate() {
        let (name, old) = name_and_version(&dep.old);
        let (_, new) = name_and_version(&dep.new);
        rows.push(format!(
            "  {indent} {} {}  {} {} {}",
            branch(idx + 1 == count),
            name.cyan().bold(),
            old.red().bold(),
            "->".cyan(),
            new.green().bold()
        ));
    }
    rows
}

fn branch(last: bool) -> &'static str {
    if last { "└" } else { "├" }
}

/// Name and displayed version of a requirement string: the bare version
/// for an `==` pin, the specifier otherwise, `*` when unconstrained.
fn name_and_version(dependency: &str) -> (String, String) {
    match Requirement::parse(dependency) {
        Some(req) => {
            let version = req
                .pinned_version()
                .map(str::to_string)
                .or(req.specifier.clone())
                .unwrap_or_else(|| "*".to_string());
            (req.name, version)
        }
        None => (dependency.to_string(), "*".to_string()),
    }
}
