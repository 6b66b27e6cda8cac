//! Line-annotated model of a pre-commit configuration

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::{HookEntry, RepoEntry};
use crate::patch::{self, Patch};
use crate::span::LineBuffer;
use crate::yaml::{self, Node};

/// A scalar value and where it sits in the document body.
///
/// `line` is 1-based and counted from the first line after the document
/// start marker; `column` is a 0-based char column on that line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub value: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookBlock {
    pub id: Located,
    pub additional_dependencies: Vec<Located>,
}

impl HookBlock {
    pub fn entry(&self) -> HookEntry {
        HookEntry::new(self.id.value.clone()).with_dependencies(
            self.additional_dependencies
                .iter()
                .map(|dep| dep.value.clone()),
        )
    }
}

/// One item of the top-level `repos` sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoBlock {
    pub repo: Located,
    /// Absent for repositories such as `local` that pin nothing.
    pub rev: Option<Located>,
    pub hooks: Vec<HookBlock>,
}

impl RepoBlock {
    /// The declared entry, or `None` when the block has no `rev`.
    pub fn entry(&self) -> Option<RepoEntry> {
        let rev = self.rev.as_ref()?;
        Some(
            RepoEntry::new(self.repo.value.clone(), rev.value.clone())
                .with_hooks(self.hooks.iter().map(HookBlock::entry).collect()),
        )
    }
}

/// `text` without a leading UTF-8 byte order mark.
fn without_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Number of raw lines before the document body.
///
/// Blank lines and `#` comments at the top of the file are skipped. If the
/// first other line is a `---` marker, its 1-based line number is returned;
/// otherwise the body starts at the top and the offset is 0.
pub fn document_start_offset(text: &str) -> usize {
    for (idx, line) in without_bom(text).lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        return if trimmed == "---" { idx + 1 } else { 0 };
    }
    0
}

/// A parsed hook configuration that still owns its raw text.
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    offset: usize,
    blocks: Vec<RepoBlock>,
}

impl Document {
    /// Parse and shape-check a configuration.
    ///
    /// Only the first YAML document is read. Unknown keys are ignored. A
    /// leading byte order mark is skipped for parsing and kept in the source.
    pub fn parse(text: impl Into<String>) -> Result<Self> {
        let source = text.into();
        let offset = document_start_offset(&source);
        let blocks = match yaml::parse_first_document(without_bom(&source))? {
            None => Vec::new(),
            Some(root) => Shape { offset }.repo_blocks(&root)?,
        };
        tracing::debug!(repos = blocks.len(), offset, "Parsed pre-commit config");
        Ok(Self {
            source,
            offset,
            blocks,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> LineBuffer {
        LineBuffer::new(&self.source)
    }

    pub fn document_start_offset(&self) -> usize {
        self.offset
    }

    /// Every repository block, including those without a `rev`.
    pub fn blocks(&self) -> &[RepoBlock] {
        &self.blocks
    }

    /// Declared repositories that pin a revision, in file order.
    pub fn repos(&self) -> Vec<RepoEntry> {
        self.blocks.iter().filter_map(RepoBlock::entry).collect()
    }

    /// [`Self::repos`] with normalized urls, without duplicates.
    pub fn repos_normalized(&self) -> Vec<RepoEntry> {
        let mut seen = HashSet::new();
        self.repos()
            .into_iter()
            .map(|entry| entry.normalized())
            .filter(|entry| seen.insert(entry.clone()))
            .collect()
    }

    /// Apply `edits` (normalized declared entry to corrected entry) to the
    /// raw text. Nothing is written; see [`crate::HookConfigFile`].
    pub fn patch(&self, edits: &HashMap<RepoEntry, RepoEntry>) -> Result<Patch> {
        patch::apply(self, edits)
    }
}

struct Shape {
    offset: usize,
}

impl Shape {
    fn body_line(&self, line: usize) -> usize {
        line.saturating_sub(self.offset)
    }

    fn repo_blocks(&self, root: &Node) -> Result<Vec<RepoBlock>> {
        if root.is_null() {
            return Ok(Vec::new());
        }
        if !matches!(root, Node::Mapping { .. }) {
            return Err(Error::format(
                self.body_line(root.line()),
                format!("top level must be a mapping, found {}", root.kind()),
            ));
        }
        let repos = match root.get("repos") {
            None => return Ok(Vec::new()),
            Some(node) if node.is_null() => return Ok(Vec::new()),
            Some(node) => node,
        };
        let Node::Sequence { items, .. } = repos else {
            return Err(Error::format(
                self.body_line(repos.line()),
                format!("`repos` must be a sequence, found {}", repos.kind()),
            ));
        };
        items.iter().map(|item| self.repo_block(item)).collect()
    }

    fn repo_block(&self, node: &Node) -> Result<RepoBlock> {
        if !matches!(node, Node::Mapping { .. }) {
            return Err(Error::format(
                self.body_line(node.line()),
                format!("repository must be a mapping, found {}", node.kind()),
            ));
        }
        let repo = match node.get("repo") {
            Some(value) => self.scalar(value, "repo")?,
            None => {
                return Err(Error::format(
                    self.body_line(node.line()),
                    "repository is missing the `repo` key",
                ));
            }
        };
        let rev = match node.get("rev") {
            Some(value) if !value.is_null() => Some(self.scalar(value, "rev")?),
            _ => None,
        };
        let hooks = match self.sequence(node.get("hooks"), "hooks")? {
            Some(items) => items
                .iter()
                .map(|hook| self.hook_block(hook))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        Ok(RepoBlock { repo, rev, hooks })
    }

    fn hook_block(&self, node: &Node) -> Result<HookBlock> {
        if !matches!(node, Node::Mapping { .. }) {
            return Err(Error::format(
                self.body_line(node.line()),
                format!("hook must be a mapping, found {}", node.kind()),
            ));
        }
        let id = match node.get("id") {
            Some(value) => self.scalar(value, "id")?,
            None => {
                return Err(Error::format(
                    self.body_line(node.line()),
                    "hook is missing the `id` key",
                ));
            }
        };
        let additional_dependencies =
            match self.sequence(node.get("additional_dependencies"), "additional_dependencies")? {
                Some(items) => items
                    .iter()
                    .map(|dep| self.scalar(dep, "additional_dependencies item"))
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            };
        Ok(HookBlock {
            id,
            additional_dependencies,
        })
    }

    fn scalar(&self, node: &Node, what: &str) -> Result<Located> {
        match node {
            Node::Scalar(scalar) => Ok(Located {
                value: scalar.value.clone(),
                line: self.body_line(scalar.line),
                column: scalar.column,
            }),
            other => Err(Error::format(
                self.body_line(other.line()),
                format!("`{what}` must be a string, found {}", other.kind()),
            )),
        }
    }

    fn sequence<'a>(&self, node: Option<&'a Node>, what: &str) -> Result<Option<&'a [Node]>> {
        match node {
            None => Ok(None),
            Some(node) if node.is_null() => Ok(None),
            Some(Node::Sequence { items, .. }) => Ok(Some(items)),
            Some(other) => Err(Error::format(
                self.body_line(other.line()),
                format!("`{what}` must be a sequence, found {}", other.kind()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("repos: []\n", 0)]
    #[case("---\nrepos: []\n", 1)]
    #[case("# one\n# two\n---\nrepos: []\n", 3)]
    #[case("\n\n# comment\n\n  ---  \nrepos: []\n", 5)]
    #[case("# comment\nrepos: []\n---\n", 0)]
    #[case("", 0)]
    #[case("# only comments\n", 0)]
    #[case("\u{feff}# c\n---\nrepos: []\n", 2)]
    #[case("\u{feff}---\nrepos: []\n", 1)]
    fn test_document_start_offset(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(document_start_offset(text), expected);
    }

    #[test]
    fn test_lines_are_body_relative() {
        let text = "# one\n# two\n---\nrepos:\n- repo: https://example.com/a\n  rev: v1\n";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.document_start_offset(), 3);
        let block = &doc.blocks()[0];
        assert_eq!(block.repo.line, 2);
        assert_eq!(block.rev.as_ref().unwrap().line, 3);
    }

    #[test]
    fn test_leading_bom_is_skipped() {
        let text = "\u{feff}repos:\n\
                    - repo: https://github.com/psf/black-pre-commit-mirror\n  rev: 22.0.0\n";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.repos().len(), 1);
        assert_eq!(doc.repos()[0].rev, "22.0.0");
        assert_eq!(doc.source(), text);
    }

    #[test]
    fn test_leading_bom_before_comment_and_marker() {
        let text = "\u{feff}# c\n---\nrepos:\n- repo: https://example.com/a\n  rev: v1\n";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.document_start_offset(), 2);
        assert_eq!(doc.blocks()[0].rev.as_ref().unwrap().line, 3);
    }

    #[test]
    fn test_repos_skip_blocks_without_rev() {
        let text = "\
repos:
- repo: local
  hooks:
  - id: tests
    entry: pytest
- repo: https://github.com/psf/black
  rev: 23.1.0
  hooks:
  - id: black
";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(
            doc.repos(),
            vec![
                RepoEntry::new("https://github.com/psf/black", "23.1.0")
                    .with_hooks(vec![HookEntry::new("black")])
            ]
        );
    }

    #[test]
    fn test_repos_normalized_dedups() {
        let text = "\
repos:
- repo: https://github.com/psf/black.git
  rev: 23.1.0
- repo: git://github.com/psf/black
  rev: 23.1.0
";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.repos().len(), 2);
        assert_eq!(
            doc.repos_normalized(),
            vec![RepoEntry::new("https://github.com/psf/black", "23.1.0")]
        );
    }

    #[test]
    fn test_dependencies_parsed_in_order() {
        let text = "\
repos:
- repo: https://github.com/pre-commit/mirrors-mypy
  rev: v1.5.0
  hooks:
  - id: mypy
    additional_dependencies: [types-requests, \"pydantic>=2\"]
";
        let doc = Document::parse(text).unwrap();
        let deps = &doc.blocks()[0].hooks[0].additional_dependencies;
        let values: Vec<_> = deps.iter().map(|d| d.value.as_str()).collect();
        assert_eq!(values, vec!["types-requests", "pydantic>=2"]);
        assert!(deps.iter().all(|d| d.line == 6));
    }

    #[rstest]
    #[case("")]
    #[case("# nothing here\n")]
    #[case("default_stages: [commit]\n")]
    #[case("repos:\n")]
    #[case("repos: []\n")]
    fn test_empty_configs(#[case] text: &str) {
        assert!(Document::parse(text).unwrap().repos().is_empty());
    }

    #[rstest]
    #[case("- a\n- b\n")]
    #[case("just a string\n")]
    #[case("repos: {}\n")]
    #[case("repos: text\n")]
    #[case("repos:\n- just-a-string\n")]
    #[case("repos:\n- rev: v1\n")]
    #[case("repos:\n- repo: [a, b]\n")]
    #[case("repos:\n- repo: x\n  hooks: {}\n")]
    #[case("repos:\n- repo: x\n  hooks:\n  - name: no id\n")]
    #[case("repos:\n- repo: x\n  hooks:\n  - id: y\n    additional_dependencies: [[a]]\n")]
    fn test_shape_errors(#[case] text: &str) {
        let err = Document::parse(text).unwrap_err();
        assert!(matches!(err, Error::Format { .. }), "{err:?}");
    }

    #[test]
    fn test_syntax_error_is_distinct() {
        let err = Document::parse("repos: [\n").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_extra_keys_tolerated() {
        let text = "\
minimum_pre_commit_version: '3.0'
ci:
  autofix_prs: false
repos:
- repo: https://github.com/pycqa/isort
  rev: 5.12.0
  hooks:
  - id: isort
    args: [--profile, black]
    exclude: ^docs/
";
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.repos()[0].rev, "5.12.0");
    }
}
