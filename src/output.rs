//! Result types returned by the `extract*` entry points.

use crate::error::IcrError;
use crate::model::{ExtractionResponse, InvoiceSummary};
use crate::pipeline::normalize::NormalizedTable;
use serde::Serialize;

/// What one upload produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    /// The API answered 200 and the response was rendered.
    Rendered(Box<ExtractionOutput>),
    /// The API answered with another status; shown to the user verbatim.
    UpstreamError { status: u16, body: String },
}

impl ExtractionOutcome {
    /// The text handed to the display side: the HTML page, or
    /// `Error: <status>\n<body>`.
    pub fn page_text(&self) -> String {
        match self {
            Self::Rendered(output) => output.html.clone(),
            Self::UpstreamError { status, body } => format!("Error: {status}\n{body}"),
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    /// Treat an upstream error status as an [`IcrError::UpstreamStatus`].
    pub fn into_result(self) -> Result<ExtractionOutput, IcrError> {
        match self {
            Self::Rendered(output) => Ok(*output),
            Self::UpstreamError { status, body } => Err(IcrError::UpstreamStatus { status, body }),
        }
    }
}

/// A rendered extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutput {
    /// Complete HTML fragment for display.
    pub html: String,
    /// The decoded API response.
    pub response: ExtractionResponse,
    /// The six required fields.
    pub summary: InvoiceSummary,
    /// `table_data` after padding.
    pub table: NormalizedTable,
    pub stats: ExtractionStats,
}

/// Sizes and timings of one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Bytes uploaded (0 when rendering a saved response).
    pub upload_bytes: usize,
    pub response_bytes: usize,
    pub fields: usize,
    pub columns: usize,
    pub rows: usize,
    /// Empty cells added to even out ragged columns.
    pub padded_cells: usize,
    /// Wall-clock time of the API call (0 when rendering a saved response).
    pub request_ms: u64,
    pub render_ms: u64,
}
