//! End-to-end sync runs against files on disk

use std::fs;
use std::path::{Path, PathBuf};

use hooklock_core::{LockedPackages, SyncConfig, SyncHooks, SyncOutcome};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const CONFIG: &str = r#"# Formatting and typing
---
repos:
  - repo: https://github.com/psf/black-pre-commit-mirror
    rev: 22.0.0
    hooks:
      - id: black
  - repo: https://github.com/pre-commit/mirrors-mypy
    rev: v1.0.0 # typing
    hooks:
      - id: mypy
        additional_dependencies: ["types-requests", "attrs>=21"]
  - repo: https://github.com/someone/not-mapped
    rev: 0.1.0
    hooks:
      - id: custom
        additional_dependencies: [types-requests]
  - repo: local
    hooks:
      - id: pytest
        entry: pytest
        language: system
"#;

fn project(config: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".pre-commit-config.yaml");
    fs::write(&path, config).unwrap();
    (dir, path)
}

fn sync(path: &Path, locked: &LockedPackages, config: &SyncConfig, dry_run: bool) -> SyncOutcome {
    SyncHooks::new(path, locked, config).dry_run(dry_run).execute().unwrap()
}

fn lock() -> LockedPackages {
    LockedPackages::from_pairs([
        ("black", "23.3.0"),
        ("mypy", "1.0.0"),
        ("types-requests", "3.4.5"),
        ("attrs", "23.1.0"),
    ])
}

#[test]
fn test_sync_rewrites_only_differing_spans() {
    let (_dir, path) = project(CONFIG);
    let outcome = sync(&path, &lock(), &SyncConfig::default(), false);

    let SyncOutcome::Updated { changes, written, .. } = &outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert!(written);
    let packages: Vec<_> = changes.iter().map(|c| c.package.as_str()).collect();
    assert_eq!(packages, vec!["black", "mypy"]);

    let expected = CONFIG
        .replace("rev: 22.0.0", "rev: 23.3.0")
        .replace(
            r#"["types-requests", "attrs>=21"]"#,
            r#"["types-requests==3.4.5", "attrs==23.1.0"]"#,
        );
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_second_run_is_up_to_date() {
    let (_dir, path) = project(CONFIG);
    sync(&path, &lock(), &SyncConfig::default(), false);
    let after_first = fs::read_to_string(&path).unwrap();

    let outcome = sync(&path, &lock(), &SyncConfig::default(), false);
    let SyncOutcome::UpToDate { packages, .. } = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    let names: Vec<_> = packages.iter().map(|p| (p.package.as_str(), p.rev.as_str())).collect();
    assert_eq!(names, vec![("black", "23.3.0"), ("mypy", "v1.0.0")]);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_dry_run_reports_without_writing() {
    let (_dir, path) = project(CONFIG);
    let outcome = sync(&path, &lock(), &SyncConfig::default(), true);
    assert!(matches!(outcome, SyncOutcome::Updated { written: false, .. }));
    assert_eq!(outcome.changes().len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG);
}

#[test]
fn test_ignored_package_keeps_rev_but_pins_elsewhere() {
    let config = r#"repos:
  - repo: https://github.com/psf/black-pre-commit-mirror
    rev: 22.0.0
  - repo: https://github.com/pre-commit/mirrors-mypy
    rev: v1.0.0
    hooks:
      - id: mypy
        additional_dependencies: [black]
"#;
    let (_dir, path) = project(config);
    let settings = SyncConfig {
        ignore: vec!["black".into()],
        ..SyncConfig::default()
    };
    sync(&path, &lock(), &settings, false);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        config.replace("[black]", "[black==23.3.0]")
    );
}

#[test]
fn test_local_version_is_never_written() {
    let config = r#"repos:
  - repo: https://github.com/psf/black-pre-commit-mirror
    rev: 22.0.0
  - repo: https://github.com/pre-commit/mirrors-mypy
    rev: v1.0.0
    hooks:
      - id: mypy
        additional_dependencies: [black, "black==22.0.0"]
"#;
    let (_dir, path) = project(config);
    let locked = LockedPackages::from_pairs([("black", "1.0.0+local"), ("mypy", "1.0.0")]);
    let outcome = sync(&path, &locked, &SyncConfig::default(), false);
    assert!(matches!(outcome, SyncOutcome::UpToDate { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), config);
}

#[test]
fn test_unmapped_repositories_only() {
    let config = "repos:\n  - repo: https://github.com/someone/not-mapped\n    rev: 0.1.0\n";
    let (_dir, path) = project(config);
    let outcome = sync(&path, &lock(), &SyncConfig::default(), false);
    assert!(matches!(outcome, SyncOutcome::NoMatchingHooks { .. }));
}

#[test]
fn test_missing_config_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".pre-commit-config.yaml");
    let outcome = sync(&path, &lock(), &SyncConfig::default(), false);
    assert_eq!(outcome, SyncOutcome::MissingConfig { path: path.clone() });
    assert!(!path.exists());
}

#[test]
fn test_disabled_touches_nothing() {
    let (_dir, path) = project(CONFIG);
    let settings = SyncConfig {
        disable_sync_from_lock: true,
        ..SyncConfig::default()
    };
    assert_eq!(sync(&path, &lock(), &settings, false), SyncOutcome::Disabled);
    assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG);
}

#[test]
fn test_invalid_config_fails_closed() {
    let (_dir, path) = project("repos:\n  repo: not-a-list\n");
    let result = SyncHooks::new(&path, &lock(), &SyncConfig::default()).execute();
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "repos:\n  repo: not-a-list\n");
}

#[test]
fn test_legacy_repository_url_is_migrated() {
    let config = concat!(
        "repos:\n",
        "  - repo: https://github.com/charliermarsh/ruff-pre-commit.git\n",
        "    rev: v0.0.270\n",
    );
    let (_dir, path) = project(config);
    let locked = LockedPackages::from_pairs([("ruff", "0.1.0")]);
    let outcome = sync(&path, &locked, &SyncConfig::default(), false);

    let change = &outcome.changes()[0];
    assert!(change.repo_changed());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "repos:\n  - repo: https://github.com/astral-sh/ruff-pre-commit\n    rev: v0.1.0\n"
    );
}
