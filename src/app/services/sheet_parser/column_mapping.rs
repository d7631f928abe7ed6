//! Header resolution for sheets whose column order and naming drift
//!
//! Semantic columns are located by case-insensitive substring matching
//! against the header row, scanning left to right and taking the first hit.
//! Sheets without a usable header can use a fixed positional layout instead.

use crate::{Error, Result};

/// Case-insensitive substring predicate set naming one semantic column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatcher {
    /// Semantic key, e.g. "name"
    pub key: String,

    /// Lower-case fragments; a header matches if it contains any of them
    pub needles: Vec<String>,
}

impl KeyMatcher {
    pub fn new(key: impl Into<String>, needles: &[&str]) -> Self {
        Self {
            key: key.into(),
            needles: needles.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    /// Whether a header cell satisfies this matcher
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        self.needles.iter().any(|needle| header.contains(needle))
    }
}

/// Resolved positions of semantic columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Semantic key to column index; `None` when no header matched
    pub resolved: Vec<(String, Option<usize>)>,
}

impl ColumnMapping {
    /// Resolve each matcher against the header row
    pub fn resolve(header_row: &[String], matchers: &[KeyMatcher]) -> Self {
        let resolved = matchers
            .iter()
            .map(|matcher| {
                let index = header_row.iter().position(|h| matcher.matches(h));
                (matcher.key.clone(), index)
            })
            .collect();

        Self { resolved }
    }

    /// Fixed layout with known positions
    pub fn positional(columns: &[(&str, usize)]) -> Self {
        Self {
            resolved: columns
                .iter()
                .map(|(key, index)| (key.to_string(), Some(*index)))
                .collect(),
        }
    }

    /// Index of a semantic column, if resolved
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.resolved
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, index)| *index)
    }

    /// Check that every required key resolved; a miss fails the whole sheet
    pub fn require(&self, sheet: &str, keys: &[&str]) -> Result<()> {
        let missing: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| self.index_of(key).is_none())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::sheet_format(
                sheet,
                format!("missing expected columns: {}", missing.join(", ")),
            ))
        }
    }

    /// Number of resolved columns
    pub fn resolved_count(&self) -> usize {
        self.resolved.iter().filter(|(_, i)| i.is_some()).count()
    }
}
