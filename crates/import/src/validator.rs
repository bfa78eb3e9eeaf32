//! Row and batch validation for imported spreadsheet data.
//!
//! Every input row becomes exactly one of a [`ValidatedRecord`] or a
//! [`ValidationError`]; a batch never loses or double-counts a row.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::records::{RawRecord, ValidatedRecord, ValidationError};

/// Accepted header names for the email column, tried in priority order
pub const EMAIL_COLUMNS: [&str; 3] = ["correo", "email", "usuario"];

/// Accepted header names for the cedula column, tried in priority order
pub const CEDULA_COLUMNS: [&str; 3] = ["cedula", "contraseña", "password"];

/// Spreadsheet row number of the first data row (row 1 is the header)
pub const FIRST_DATA_ROW: u32 = 2;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static CEDULA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6,}$").expect("cedula pattern"));

/// Valid and rejected rows of one batch, each input row in exactly one side
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub valid: Vec<ValidatedRecord>,
    pub errors: Vec<ValidationError>,
}

impl BatchOutcome {
    /// Number of input rows accounted for
    pub fn total(&self) -> usize {
        self.valid.len() + self.errors.len()
    }
}

/// Resolve a logical field by trying candidate column names in order,
/// returning the first present non-empty value
fn resolve_column<'a>(record: &'a RawRecord, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|name| record.get(name))
}

/// Validate a single raw row.
///
/// Pure function of its inputs: produces either a normalized record or the
/// reason the row was rejected, never both.
pub fn validate_row(record: &RawRecord, row: u32) -> Result<ValidatedRecord, ValidationError> {
    let email = resolve_column(record, &EMAIL_COLUMNS);
    let cedula = resolve_column(record, &CEDULA_COLUMNS);

    let (email, cedula) = match (email, cedula) {
        (Some(email), Some(cedula)) => (email, cedula),
        _ => {
            return Err(ValidationError {
                row,
                message: "missing required columns (correo and cedula)".to_string(),
            })
        }
    };

    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError {
            row,
            message: format!("invalid email: {email}"),
        });
    }

    if !CEDULA_RE.is_match(cedula) {
        return Err(ValidationError {
            row,
            message: format!("invalid identifier: {cedula} (must be digits, minimum 6)"),
        });
    }

    Ok(ValidatedRecord {
        email: email.to_lowercase(),
        cedula: cedula.to_string(),
        source_row: row,
    })
}

/// Validate a whole batch.
///
/// Rows are independent, so the outcome preserves input order on both sides
/// and `valid.len() + errors.len() == rows.len()` always holds. Row numbers
/// are the 1-based position offset by the header row.
pub fn validate_batch(rows: &[RawRecord]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, record) in rows.iter().enumerate() {
        let row = index as u32 + FIRST_DATA_ROW;
        match validate_row(record, row) {
            Ok(valid) => outcome.valid.push(valid),
            Err(error) => outcome.errors.push(error),
        }
    }

    outcome
}
