//! The import session: a four-stage machine driving one bulk upload.
//!
//! `upload -> preview -> processing -> results`, with an explicit reset back
//! to `upload` from anywhere. Transitions are otherwise one-directional;
//! once a batch has been reconciled the only way forward is a reset, so a
//! reported success can never be re-applied.

use std::path::Path;

use odonto_users::{BulkUserRecord, BulkUserSink};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::ImportError;
use crate::records::{ImportResult, RawRecord, ValidatedRecord, ValidationError};
use crate::sheet::read_rows;
use crate::validator::{validate_batch, BatchOutcome};

/// Default number of valid records surfaced in the preview
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Stage of an import session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStage {
    Upload,
    Preview,
    Processing,
    Results,
}

/// What the operator sees before confirming a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPreview {
    /// Rows that passed validation
    pub valid: usize,
    /// Rows that were rejected
    pub errors: usize,
    /// Rows processed in total
    pub total: usize,
    /// First few valid records, capped at the preview size
    pub sample: Vec<ValidatedRecord>,
}

/// One bulk-upload session; a new upload requires a reset first
#[derive(Debug, Clone)]
pub struct ImportSession {
    stage: ImportStage,
    valid: Vec<ValidatedRecord>,
    errors: Vec<ValidationError>,
    results: Option<ImportResult>,
    preview_rows: usize,
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportSession {
    pub fn new() -> Self {
        Self::with_preview_rows(DEFAULT_PREVIEW_ROWS)
    }

    pub fn with_preview_rows(preview_rows: usize) -> Self {
        Self {
            stage: ImportStage::Upload,
            valid: Vec::new(),
            errors: Vec::new(),
            results: None,
            preview_rows,
        }
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// Rejected rows of the current batch, plus any synthetic whole-file error
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn valid_records(&self) -> &[ValidatedRecord] {
        &self.valid
    }

    pub fn results(&self) -> Option<ImportResult> {
        self.results
    }

    /// Accept exactly one spreadsheet file.
    ///
    /// Only legal in the `Upload` stage. On success the session holds the
    /// batch outcome and moves to `Preview`. A file that cannot be parsed
    /// leaves the session in `Upload` with a single synthetic row-0 error
    /// recorded, and the parse failure is returned to the caller.
    pub fn load_file(&mut self, path: &Path) -> Result<ImportPreview, ImportError> {
        self.guard(ImportStage::Upload)?;

        match read_rows(path) {
            Ok(rows) => Ok(self.accept_batch(validate_batch(&rows))),
            Err(error) => {
                warn!(path = %path.display(), %error, "spreadsheet rejected");
                self.errors = vec![ValidationError {
                    row: 0,
                    message: "could not read spreadsheet file".to_string(),
                }];
                Err(error)
            }
        }
    }

    /// Accept already-parsed rows; same stage semantics as [`Self::load_file`]
    pub fn load_rows(&mut self, rows: &[RawRecord]) -> Result<ImportPreview, ImportError> {
        self.guard(ImportStage::Upload)?;
        Ok(self.accept_batch(validate_batch(rows)))
    }

    /// The preview shown to the operator; `None` outside the `Preview` stage
    pub fn preview(&self) -> Option<ImportPreview> {
        if self.stage != ImportStage::Preview {
            return None;
        }
        Some(self.build_preview())
    }

    /// Reconcile the validated batch into the store.
    ///
    /// Only legal from `Preview`. The session sits in `Processing` while the
    /// (possibly remote, non-instantaneous) store call is awaited, then moves
    /// to `Results`. A failed store update returns the session to `Upload`
    /// with no partial state retained.
    pub async fn confirm<S: BulkUserSink>(&mut self, store: &S) -> Result<ImportResult, ImportError> {
        self.guard(ImportStage::Preview)?;
        self.stage = ImportStage::Processing;

        let records: Vec<BulkUserRecord> = self.valid.iter().map(BulkUserRecord::from).collect();
        let total = records.len();

        match store.add_bulk_users(&records).await {
            Ok(added) => {
                let results = ImportResult {
                    total,
                    successful: added.len(),
                    failed: total - added.len(),
                    duplicates: 0,
                };
                info!(total, successful = results.successful, "bulk upload reconciled");
                self.results = Some(results);
                self.stage = ImportStage::Results;
                Ok(results)
            }
            Err(error) => {
                warn!(%error, "bulk reconciliation failed");
                self.clear();
                self.errors = vec![ValidationError {
                    row: 0,
                    message: "bulk upload could not be processed".to_string(),
                }];
                Err(ImportError::Reconciliation(error))
            }
        }
    }

    /// Discard all parsed state and return to the `Upload` stage
    pub fn reset(&mut self) {
        self.clear();
    }

    fn accept_batch(&mut self, outcome: BatchOutcome) -> ImportPreview {
        self.valid = outcome.valid;
        self.errors = outcome.errors;
        self.results = None;
        self.stage = ImportStage::Preview;
        self.build_preview()
    }

    fn build_preview(&self) -> ImportPreview {
        ImportPreview {
            valid: self.valid.len(),
            errors: self.errors.len(),
            total: self.valid.len() + self.errors.len(),
            sample: self.valid.iter().take(self.preview_rows).cloned().collect(),
        }
    }

    fn guard(&self, expected: ImportStage) -> Result<(), ImportError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(ImportError::WrongStage { stage: self.stage })
        }
    }

    fn clear(&mut self) {
        self.stage = ImportStage::Upload;
        self.valid.clear();
        self.errors.clear();
        self.results = None;
    }
}
