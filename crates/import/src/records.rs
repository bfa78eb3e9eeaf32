//! Data carried through the import pipeline.

use std::collections::HashMap;

use odonto_users::BulkUserRecord;
use serde::{Deserialize, Serialize};

/// One raw spreadsheet row: column name -> trimmed cell text.
///
/// Column names come straight from the header row and are matched
/// case-sensitively against the synonym lists in [`crate::validator`].
/// Discarded once the row has been validated.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    cells: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell; blank values are dropped so lookups only ever see
    /// non-empty text
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.cells.insert(column.into(), trimmed.to_string());
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = RawRecord::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// A row that passed validation, normalized and ready for reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    /// Lowercased, trimmed email
    pub email: String,
    /// Digits-only identity number, minimum 6 digits
    pub cedula: String,
    /// 1-based spreadsheet row this record came from (first data row is 2)
    pub source_row: u32,
}

impl From<&ValidatedRecord> for BulkUserRecord {
    fn from(record: &ValidatedRecord) -> Self {
        BulkUserRecord {
            email: record.email.clone(),
            cedula: record.cedula.clone(),
        }
    }
}

/// One rejected input row, reported back to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based spreadsheet row; 0 marks a whole-file failure
    pub row: u32,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Summary of a completed import, derived per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Rows submitted for reconciliation
    pub total: usize,
    /// Users actually added to the store
    pub successful: usize,
    /// Rows the store did not accept
    pub failed: usize,
    /// Rows skipped as duplicates of existing users
    pub duplicates: usize,
}
