//! Error types for the icr-extract library.
//!
//! Every failure is fatal for the request that hit it; nothing is retried.
//! [`IcrError`] is returned as `Err(IcrError)` from the `extract*` entry
//! points and from the formatter.
//!
//! One case is special: a non-200 answer from the extraction API is not a
//! crash but a page the user should see. The entry points report it as
//! [`crate::output::ExtractionOutcome::UpstreamError`]; callers that prefer a
//! plain `Result` can convert it with
//! [`crate::output::ExtractionOutcome::into_result`], which yields
//! [`IcrError::UpstreamStatus`]. Both render the same text.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the icr-extract library.
#[derive(Debug, Error)]
pub enum IcrError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The uploaded file was not found at the given path.
    #[error("Upload not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but reading it failed part-way.
    #[error("Failed to read upload '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The request never produced an HTTP response (DNS, TLS, connection reset…).
    #[error("Request to '{endpoint}' failed: {reason}\nCheck your internet connection.")]
    RequestFailed { endpoint: String, reason: String },

    /// The configured request timeout elapsed.
    #[error("Request to '{endpoint}' timed out after {secs}s")]
    RequestTimeout { endpoint: String, secs: u64 },

    /// The extraction API answered with a status other than 200.
    ///
    /// The message is exactly what the user is shown: the status code, a
    /// newline, then the raw response body.
    #[error("Error: {status}\n{body}")]
    UpstreamStatus { status: u16, body: String },

    // ── Response errors ───────────────────────────────────────────────────
    /// The response body is not JSON or does not have the expected shape.
    #[error("Malformed extraction response: {0}")]
    MalformedResponse(String),

    /// A required `string_data` field is absent.
    #[error("Required field '{key}' is missing from string_data")]
    KeyMissing { key: String },

    /// `table_data` has no columns, so there is no row count to pad to.
    #[error("table_data has no columns; cannot build a table")]
    EmptyTable,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for IcrError {
    fn from(error: serde_json::Error) -> Self {
        Self::MalformedResponse(error.to_string())
    }
}
