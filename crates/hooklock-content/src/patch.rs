//! Format-preserving revision and pin rewrites
//!
//! Edits are intra-line substring substitutions placed by the positions the
//! parser reported. When a dependency string is not where the parser said it
//! would be (flow sequences spread over several lines drift), the closest
//! line inside the owning repository block that contains it is used instead
//! and a warning is logged.

use std::collections::HashMap;
use std::ops::Range;

use hooklock_registry::normalize_git_url;
use similar::{ChangeTag, TextDiff};

use crate::document::{Document, Located, RepoBlock};
use crate::error::{Error, Result};
use crate::model::RepoEntry;
use crate::span::{LineBuffer, LineMatch, raw_line_index};

/// Text of a configuration before and after applying an edit set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    original: String,
    updated: String,
    changed_lines: usize,
}

impl Patch {
    fn unchanged(original: String) -> Self {
        Self {
            updated: original.clone(),
            original,
            changed_lines: 0,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// The patched text.
    pub fn text(&self) -> &str {
        &self.updated
    }

    pub fn into_text(self) -> String {
        self.updated
    }

    /// Number of lines whose content differs from the original.
    pub fn changed_lines(&self) -> usize {
        self.changed_lines
    }

    pub fn is_unchanged(&self) -> bool {
        self.changed_lines == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Repo,
    Rev,
    Dependency,
}

impl Target {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Repo => "repo",
            Self::Rev => "rev",
            Self::Dependency => "additional dependency",
        }
    }
}

struct Planned<'a> {
    target: Target,
    at: &'a Located,
    new: &'a str,
}

pub(crate) fn apply(document: &Document, edits: &HashMap<RepoEntry, RepoEntry>) -> Result<Patch> {
    let original = document.source().to_string();
    if edits.is_empty() {
        return Ok(Patch::unchanged(original));
    }

    let offset = document.document_start_offset();
    let blocks = document.blocks();
    let mut buffer = document.lines();
    let starts: Vec<usize> = blocks
        .iter()
        .map(|block| raw_line_index(block.repo.line, offset).unwrap_or(0))
        .collect();

    for (i, block) in blocks.iter().enumerate() {
        let Some(declared) = block.entry().map(|entry| entry.normalized()) else {
            continue;
        };
        let Some(target) = edits.get(&declared) else {
            continue;
        };

        let start = starts[i];
        let end = starts.get(i + 1).copied().unwrap_or(buffer.len()).max(start);
        for edit in plan(block, &declared, target) {
            apply_one(&mut buffer, &edit, offset, start..end, &declared.repo);
        }
    }

    let updated = buffer.text();
    let changed_lines = count_changed_lines(&original, &updated);
    if changed_lines == 0 {
        return Err(Error::NoChanges { edits: edits.len() });
    }
    Ok(Patch {
        original,
        updated,
        changed_lines,
    })
}

/// Edits for one block, last position first so earlier columns on a shared
/// line stay valid.
fn plan<'a>(block: &'a RepoBlock, declared: &RepoEntry, target: &'a RepoEntry) -> Vec<Planned<'a>> {
    let mut planned = Vec::new();

    if normalize_git_url(&target.repo) != declared.repo {
        planned.push(Planned {
            target: Target::Repo,
            at: &block.repo,
            new: &target.repo,
        });
    }
    if let Some(rev) = &block.rev
        && rev.value != target.rev
    {
        planned.push(Planned {
            target: Target::Rev,
            at: rev,
            new: &target.rev,
        });
    }
    for (hook, new_hook) in block.hooks.iter().zip(&target.hooks) {
        let deps = hook.additional_dependencies.iter();
        for (dep, new_dep) in deps.zip(&new_hook.additional_dependencies) {
            if dep.value != *new_dep {
                planned.push(Planned {
                    target: Target::Dependency,
                    at: dep,
                    new: new_dep,
                });
            }
        }
    }

    planned.sort_by(|a, b| (b.at.line, b.at.column).cmp(&(a.at.line, a.at.column)));
    planned
}

fn apply_one(
    buffer: &mut LineBuffer,
    edit: &Planned<'_>,
    offset: usize,
    span: Range<usize>,
    repo: &str,
) {
    let predicted = raw_line_index(edit.at.line, offset).unwrap_or(span.start);
    let column = Some(edit.at.column);
    match buffer.replace_near(predicted, span.clone(), &edit.at.value, edit.new, column) {
        Some(LineMatch::Predicted(_)) => {}
        Some(LineMatch::Nearest { predicted, found }) => {
            tracing::warn!(
                repo,
                value = %edit.at.value,
                predicted_line = predicted + 1,
                found_line = found + 1,
                "Edited {} on the nearest matching line instead of the reported one",
                edit.target.as_str()
            );
        }
        None => {
            tracing::warn!(
                repo,
                value = %edit.at.value,
                lines = ?(span.start + 1..span.end + 1),
                "Could not locate {}, leaving it unchanged",
                edit.target.as_str()
            );
        }
    }
}

fn count_changed_lines(old: &str, new: &str) -> usize {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .filter(|change| change.tag() == ChangeTag::Delete)
        .count()
}
