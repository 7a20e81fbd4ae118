//! # icr-extract
//!
//! Upload an invoice PDF to a document-extraction (ICR) HTTP API and render
//! the JSON it returns as a styled HTML page: the extracted fields as a
//! labelled list, the extracted line items as a table.
//!
//! The crate does no PDF processing of its own. The API does the reading;
//! this crate moves the bytes there and formats what comes back.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF path
//!  │
//!  ├─ 1. Input      read the uploaded file (content is not inspected)
//!  ├─ 2. Upload     multipart POST, field `file`, to the extraction API
//!  ├─ 3. Status     non-200 → "Error: <status>\n<body>", stop here
//!  ├─ 4. Decode     {"data": {"string_data": {…}, "table_data": {…}}}
//!  ├─ 5. Normalize  pad ragged table columns with ""
//!  └─ 6. Render     summary paragraphs + styled table + submit form
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use icr_extract::{extract, ExtractionConfig, UploadSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let outcome = extract(&UploadSource::new("invoice.pdf"), &config).await?;
//!     println!("{}", outcome.page_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Formatting without a network
//!
//! ```rust
//! use icr_extract::{normalize, render_summary, StringData, TableData};
//!
//! let table: TableData = [("A", vec!["1", "2"]), ("B", vec!["x"])].into_iter().collect();
//! let padded = normalize(&table).unwrap();
//! assert_eq!(padded.column("B").unwrap(), ["x".to_string(), String::new()]);
//!
//! let fields: StringData = [("vendor_name", "Acme")].into_iter().collect();
//! assert!(render_summary(&fields).contains("Acme"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `icr` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, RenderOptions};
pub use error::IcrError;
pub use extract::{
    extract, extract_from_bytes, extract_sync, extract_to_file, page_for_response, render_saved,
    write_page,
};
pub use model::{
    decode_response, ExtractionData, ExtractionResponse, InvoiceSummary, StringData, TableData,
    REQUIRED_FIELDS,
};
pub use output::{ExtractionOutcome, ExtractionOutput, ExtractionStats};
pub use pipeline::input::UploadSource;
pub use pipeline::normalize::{normalize, NormalizedTable};
pub use pipeline::render::{render_document, render_summary, render_table};
