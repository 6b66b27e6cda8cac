//! The subset of PEP 508 requirement strings that can be pinned
//!
//! `name [extras] [specifier] [; marker]`. Direct references (`name @ url`)
//! and anything else outside this shape do not parse, and callers leave
//! such strings alone.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

const NAME: &str = r"[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?";
const CLAUSE: &str = r"(?:~=|===|==|!=|<=|>=|<|>)\s*[A-Za-z0-9_.*+!-]+";

static REQUIREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let clauses = format!(r"{CLAUSE}(?:\s*,\s*{CLAUSE})*");
    let pattern = [
        format!(r"^\s*(?P<name>{NAME})\s*"),
        r"(?:\[(?P<extras>[^\]]*)\])?\s*".to_string(),
        format!(r"(?P<spec>\(\s*{clauses}\s*\)|{clauses})?\s*"),
        r"(?:;\s*(?P<marker>\S.*?))?\s*$".to_string(),
    ]
    .concat();
    Regex::new(&pattern).expect("requirement pattern is valid")
});

static EXTRA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NAME}$")).expect("extra pattern is valid"));

/// A parsed requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Name as written
    pub name: String,
    /// Extras, sorted
    pub extras: Vec<String>,
    /// Version specifier without whitespace or parentheses, if any
    pub specifier: Option<String>,
    /// Environment marker as written
    pub marker: Option<String>,
}

impl Requirement {
    pub fn parse(input: &str) -> Option<Self> {
        let caps = REQUIREMENT_PATTERN.captures(input)?;

        let mut extras = Vec::new();
        if let Some(raw) = caps.name("extras") {
            for extra in raw.as_str().split(',').map(str::trim).filter(|e| !e.is_empty()) {
                if !EXTRA_PATTERN.is_match(extra) {
                    return None;
                }
                extras.push(extra.to_string());
            }
        }
        extras.sort();
        extras.dedup();

        let specifier = caps.name("spec").map(|spec| {
            spec.as_str()
                .chars()
                .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')'))
                .collect()
        });

        Some(Self {
            name: caps["name"].to_string(),
            extras,
            specifier,
            marker: caps.name("marker").map(|m| m.as_str().to_string()),
        })
    }

    /// Same requirement pinned to exactly `version`.
    pub fn pinned(&self, version: &str) -> Self {
        Self {
            specifier: Some(format!("=={version}")),
            ..self.clone()
        }
    }

    /// The version of an `==` pin, if that is the whole specifier.
    pub fn pinned_version(&self) -> Option<&str> {
        let spec = self.specifier.as_deref()?;
        let version = spec.strip_prefix("==")?;
        (!version.starts_with('=') && !version.contains(',')).then_some(version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.extras.is_empty() {
            write!(f, "[{}]", self.extras.join(","))?;
        }
        if let Some(spec) = &self.specifier {
            f.write_str(spec)?;
        }
        if let Some(marker) = &self.marker {
            write!(f, "; {marker}")?;
        }
        Ok(())
    }
}
