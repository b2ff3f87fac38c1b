//! Error types for outline operations.
//!
//! Precondition failures are not errors; commands report those as `false`
//! returns. Errors only surface on the strict import paths.

use thiserror::Error;

/// Errors from strict outline import.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OutlineError {
    /// The JSON document shape did not parse.
    #[error("invalid outline JSON: {0}")]
    Json(#[from] serde_json::Error),
}
