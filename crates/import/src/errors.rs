//! Error types for the import pipeline.

use odonto_users::UserError;
use thiserror::Error;

use crate::session::ImportStage;

/// Import pipeline errors.
///
/// Row-level validation failures are not errors at this level; they are
/// accumulated as [`crate::ValidationError`] values and reported with the
/// batch. These variants cover the failures that abort an import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file extension (expected .xlsx or .xls): {0}")]
    UnsupportedFile(String),

    #[error("could not read spreadsheet file: {0}")]
    ParseFailed(String),

    #[error("could not write template file: {0}")]
    TemplateFailed(String),

    #[error("operation not allowed while the session is in the {stage:?} stage")]
    WrongStage { stage: ImportStage },

    #[error("bulk reconciliation failed: {0}")]
    Reconciliation(#[from] UserError),
}
