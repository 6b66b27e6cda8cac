//! Built-in package to repository table
//!
//! Every URL here must already be in normalized form (see
//! [`crate::normalize_git_url`]).

use std::collections::BTreeMap;

use crate::types::RepoMapping;

/// Number of built-in mappings.
pub const BUILTIN_COUNT: usize = 17;

const BUILTINS: [(&str, &str, &str); BUILTIN_COUNT] = [
    ("autopep8", "https://github.com/pre-commit/mirrors-autopep8", "v${rev}"),
    ("bandit", "https://github.com/PyCQA/bandit", "${rev}"),
    ("black", "https://github.com/psf/black-pre-commit-mirror", "${rev}"),
    ("check-jsonschema", "https://github.com/python-jsonschema/check-jsonschema", "${rev}"),
    ("codespell", "https://github.com/codespell-project/codespell", "v${rev}"),
    ("commitizen", "https://github.com/commitizen-tools/commitizen", "v${rev}"),
    ("docformatter", "https://github.com/PyCQA/docformatter", "${rev}"),
    ("flake8", "https://github.com/pycqa/flake8", "${rev}"),
    ("flakeheaven", "https://github.com/flakeheaven/flakeheaven", "${rev}"),
    ("isort", "https://github.com/pycqa/isort", "${rev}"),
    ("mypy", "https://github.com/pre-commit/mirrors-mypy", "v${rev}"),
    ("pycln", "https://github.com/hadialqattan/pycln", "v${rev}"),
    ("pyroma", "https://github.com/regebro/pyroma", "${rev}"),
    ("pyupgrade", "https://github.com/asottile/pyupgrade", "v${rev}"),
    ("rstcheck", "https://github.com/rstcheck/rstcheck", "v${rev}"),
    ("ruff", "https://github.com/astral-sh/ruff-pre-commit", "v${rev}"),
    ("yamllint", "https://github.com/adrienverge/yamllint", "v${rev}"),
];

/// Returns the built-in package mappings, keyed by canonical package name.
pub fn builtin_entries() -> BTreeMap<String, RepoMapping> {
    BUILTINS
        .iter()
        .map(|(name, repo, rev)| (name.to_string(), RepoMapping::new(*repo, *rev)))
        .collect()
}

/// Returns the built-in aliases: canonical URL to the legacy URLs that
/// used to host the same hook.
pub fn builtin_aliases() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (
            "https://github.com/astral-sh/ruff-pre-commit".to_string(),
            vec!["https://github.com/charliermarsh/ruff-pre-commit".to_string()],
        ),
        (
            "https://github.com/psf/black-pre-commit-mirror".to_string(),
            vec!["https://github.com/psf/black".to_string()],
        ),
    ])
}
