//! The sync run: read the hook configuration, compare, rewrite

use std::path::PathBuf;

use hooklock_content::HookConfigFile;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::locked::LockedPackages;

use super::engine::SyncEngine;
use super::outcome::{PackageRev, RepoChange, SyncOutcome};

/// Brings a hook configuration in line with locked packages.
pub struct SyncHooks<'a> {
    config_path: PathBuf,
    locked: &'a LockedPackages,
    config: &'a SyncConfig,
    dry_run: bool,
}

impl<'a> SyncHooks<'a> {
    pub fn new(
        config_path: impl Into<PathBuf>,
        locked: &'a LockedPackages,
        config: &'a SyncConfig,
    ) -> Self {
        Self {
            config_path: config_path.into(),
            locked,
            config,
            dry_run: false,
        }
    }

    /// Compute and report edits without writing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the sync.
    ///
    /// Parse errors and registry conflicts are returned before anything is
    /// written. A missing configuration file is not an error.
    pub fn execute(&self) -> Result<SyncOutcome> {
        if self.config.disable_sync_from_lock {
            tracing::debug!("Sync from lock is disabled");
            return Ok(SyncOutcome::Disabled);
        }

        let path = self.config_path.clone();
        let mut file = match HookConfigFile::load(&path) {
            Ok(file) => file,
            Err(e) if e.is_not_found() => {
                tracing::info!(path = %path.display(), "No pre-commit config file, skipping sync");
                return Ok(SyncOutcome::MissingConfig { path });
            }
            Err(e) => return Err(e.into()),
        };

        let engine = SyncEngine::new(self.config.registry(), self.locked, &self.config.ignore)?;
        let declared = file.document().repos_normalized();
        let analysis = engine.analyze(&declared);

        if analysis.is_empty() {
            tracing::info!("No pre-commit hook matches a locked package");
            return Ok(SyncOutcome::NoMatchingHooks { path });
        }

        if analysis.to_fix.is_empty() {
            let packages = declared
                .iter()
                .filter(|entry| analysis.in_sync.contains_key(*entry))
                .filter_map(|entry| {
                    engine.package_for(entry).map(|package| PackageRev {
                        package: package.to_string(),
                        rev: entry.rev.clone(),
                    })
                })
                .collect();
            return Ok(SyncOutcome::UpToDate { path, packages });
        }

        let changes: Vec<RepoChange> = declared
            .iter()
            .filter_map(|old| {
                let new = analysis.to_fix.get(old)?;
                let package = engine.package_for(old)?;
                Some(RepoChange::new(package, old, new))
            })
            .collect();

        if self.dry_run {
            let patch = file.document().patch(&analysis.to_fix)?;
            tracing::info!(
                changed = patch.changed_lines(),
                "Dry run, not writing pre-commit config"
            );
            return Ok(SyncOutcome::Updated {
                path,
                changes,
                written: false,
            });
        }

        file.update_revisions(&analysis.to_fix)?;
        Ok(SyncOutcome::Updated {
            path,
            changes,
            written: true,
        })
    }
}
