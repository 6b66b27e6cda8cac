//! Git URL canonicalization

/// Normalize a git repository URL for equality comparison.
///
/// - local paths (no `://`) are returned unchanged
/// - `git`, `git+ssh` and `ssh` schemes become `https`
/// - the host is lowercased, userinfo and port are dropped
/// - query and fragment are dropped
/// - trailing `/` and `.git` are removed from the path
///
/// Anything that cannot be taken apart (empty scheme or host) is returned
/// unchanged. The function is idempotent.
pub fn normalize_git_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    if !is_valid_scheme(scheme) {
        return url.to_string();
    }

    let scheme = match scheme.to_ascii_lowercase().as_str() {
        "git" | "git+ssh" | "ssh" => "https".to_string(),
        other => other.to_string(),
    };

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);

    let host = hostname(authority);
    if host.is_empty() {
        return url.to_string();
    }

    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());
    let path = trim_path(&tail[..path_end]);

    format!("{scheme}://{host}{path}")
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn hostname(authority: &str) -> String {
    let host_port = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);

    let host = if host_port.starts_with('[') {
        match host_port.find(']') {
            Some(end) => &host_port[..=end],
            None => host_port,
        }
    } else {
        host_port.split(':').next().unwrap_or("")
    };

    host.to_ascii_lowercase()
}

fn trim_path(mut path: &str) -> &str {
    loop {
        path = path.trim_end_matches('/');
        match path.strip_suffix(".git") {
            Some(stripped) => path = stripped,
            None => return path,
        }
    }
}

/// Markers used by [`url_diff_with`] around the changed part.
#[derive(Debug, Clone, Copy)]
pub struct DiffMarkers<'a> {
    pub open: &'a str,
    pub separator: &'a str,
    pub close: &'a str,
}

impl Default for DiffMarkers<'_> {
    fn default() -> Self {
        Self {
            open: "{",
            separator: " -> ",
            close: "}",
        }
    }
}

/// Render a URL change highlighting only the part that differs, e.g.
/// `https://github.com/{charliermarsh -> astral-sh}/ruff-pre-commit`.
pub fn url_diff(old: &str, new: &str) -> String {
    url_diff_with(old, new, DiffMarkers::default())
}

/// [`url_diff`] with custom markers (used for colored output).
pub fn url_diff_with(old: &str, new: &str, markers: DiffMarkers<'_>) -> String {
    if old == new {
        return new.to_string();
    }

    let prefix_len = common_prefix_len(old, new);
    let (prefix, old_rest) = old.split_at(prefix_len);
    let new_rest = &new[prefix_len..];

    let suffix_len = common_suffix_len(old_rest, new_rest);
    let old_mid = &old_rest[..old_rest.len() - suffix_len];
    let new_mid = &new_rest[..new_rest.len() - suffix_len];
    let suffix = &old_rest[old_rest.len() - suffix_len..];

    format!(
        "{prefix}{}{old_mid}{}{new_mid}{}{suffix}",
        markers.open, markers.separator, markers.close
    )
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((i, c), _)| i + c.len_utf8())
        .unwrap_or(0)
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}
