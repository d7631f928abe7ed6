//! Parsing statistics and result structures for sheet processing
//!
//! This module provides types for tracking how many rows survived
//! normalization and why the others were skipped.

use serde::{Deserialize, Serialize};

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    /// Successfully normalized records, in sheet order
    pub records: Vec<T>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

impl<T> ParseResult<T> {
    /// Whether no record survived
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of non-blank data rows encountered
    pub total_rows: usize,

    /// Number of records successfully built
    pub records_parsed: usize,

    /// Number of rows skipped
    pub rows_skipped: usize,

    /// Skip reasons, one per skipped row
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped row
    pub fn record_skip(&mut self, reason: impl Into<String>) {
        self.rows_skipped += 1;
        self.errors.push(reason.into());
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_rows as f64) * 100.0
        }
    }
}
