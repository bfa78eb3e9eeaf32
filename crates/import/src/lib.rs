//! # Odonto Import Crate
//!
//! The bulk user-import pipeline for the admin portal: parse a spreadsheet,
//! validate every row, show the operator a preview, and on confirmation
//! reconcile the valid rows into the user store.
//!
//! ## Pipeline
//!
//! ```text
//! .xlsx/.xls file -> sheet::read_rows -> validator::validate_batch
//!                 -> preview (counts + first rows)
//!                 -> ImportSession::confirm -> UserStore::add_bulk_users
//!                 -> ImportResult { total, successful, failed, duplicates }
//! ```
//!
//! Row-level validation failures never abort a batch; they are accumulated
//! per row and reported alongside the valid rows. Only an unreadable file or
//! a failed store update aborts the import.

pub mod errors;
pub mod records;
pub mod session;
pub mod sheet;
pub mod validator;

pub use errors::ImportError;
pub use records::{ImportResult, RawRecord, ValidatedRecord, ValidationError};
pub use session::{ImportPreview, ImportSession, ImportStage};
pub use sheet::{read_rows, write_template};
pub use validator::{validate_batch, validate_row, BatchOutcome};
