//! Locate-and-replace on raw text lines
//!
//! Independent of the YAML parser: callers supply a predicted line and the
//! text to replace, and the buffer edits only that substring.

use std::ops::Range;

/// Map a parser line (1-based, counted from the document body) to a
/// zero-based index into the raw lines.
pub fn raw_line_index(reported_line: usize, document_start_offset: usize) -> Option<usize> {
    (reported_line + document_start_offset).checked_sub(1)
}

/// Where a replacement ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMatch {
    /// The predicted line held the text.
    Predicted(usize),
    /// The predicted line did not hold the text; the closest line in the
    /// search range that did was used instead.
    Nearest { predicted: usize, found: usize },
}

impl LineMatch {
    pub fn index(&self) -> usize {
        match self {
            Self::Predicted(idx) => *idx,
            Self::Nearest { found, .. } => *found,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, Self::Nearest { .. })
    }
}

/// Raw lines of a text file, each keeping its line terminator.
///
/// Edits substitute substrings within a line; lines are never added or
/// removed, so joining the lines back reproduces the untouched bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn text(&self) -> String {
        self.lines.concat()
    }

    /// Replace `old` with `new` on line `idx`.
    ///
    /// The first occurrence at or after char column `column` is preferred,
    /// then the first occurrence anywhere on the line. Returns false when the
    /// line does not exist or does not contain `old`.
    pub fn replace_at(&mut self, idx: usize, old: &str, new: &str, column: Option<usize>) -> bool {
        let Some(line) = self.lines.get_mut(idx) else {
            return false;
        };
        match replace_in_line(line, old, new, column) {
            Some(updated) => {
                *line = updated;
                true
            }
            None => false,
        }
    }

    /// Replace `old` with `new`, preferring line `predicted` and otherwise
    /// the line within `search` that contains `old` and is closest to
    /// `predicted` (lowest index on ties).
    pub fn replace_near(
        &mut self,
        predicted: usize,
        search: Range<usize>,
        old: &str,
        new: &str,
        column: Option<usize>,
    ) -> Option<LineMatch> {
        if self.replace_at(predicted, old, new, column) {
            return Some(LineMatch::Predicted(predicted));
        }

        let end = search.end.min(self.lines.len());
        let found = (search.start..end)
            .filter(|&idx| self.lines[idx].contains(old))
            .min_by_key(|&idx| idx.abs_diff(predicted))?;

        self.replace_at(found, old, new, None)
            .then_some(LineMatch::Nearest { predicted, found })
    }
}

fn replace_in_line(line: &str, old: &str, new: &str, column: Option<usize>) -> Option<String> {
    if old.is_empty() {
        return None;
    }
    let from = column
        .and_then(|col| line.char_indices().nth(col).map(|(byte, _)| byte))
        .unwrap_or(0);
    let start = line[from..]
        .find(old)
        .map(|pos| from + pos)
        .or_else(|| line.find(old))?;

    let mut updated = String::with_capacity(line.len() + new.len());
    updated.push_str(&line[..start]);
    updated.push_str(new);
    updated.push_str(&line[start + old.len()..]);
    Some(updated)
}
