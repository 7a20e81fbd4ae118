//! Upload-and-render entry points.
//!
//! [`extract`] is the full request: read the upload, POST it, and turn the
//! answer into page text. [`page_for_response`] and [`render_saved`] are the
//! network-free halves, usable on a response obtained some other way.

use crate::config::{ExtractionConfig, RenderOptions};
use crate::error::IcrError;
use crate::model::{decode_response, InvoiceSummary};
use crate::output::{ExtractionOutcome, ExtractionOutput, ExtractionStats};
use crate::pipeline::input::UploadSource;
use crate::pipeline::normalize::normalize;
use crate::pipeline::{render, upload};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Upload a document and render the extraction result.
///
/// # Returns
/// `Ok(ExtractionOutcome::Rendered)` when the API answered 200 and the
/// response rendered, `Ok(ExtractionOutcome::UpstreamError)` for any other
/// status.
///
/// # Errors
/// - Upload unreadable (`FileNotFound`, `PermissionDenied`, `ReadFailed`)
/// - Transport failure (`RequestFailed`, `RequestTimeout`)
/// - Response not decodable (`MalformedResponse`), a required field absent
///   (`KeyMissing`), or `table_data` without columns (`EmptyTable`)
pub async fn extract(
    source: &UploadSource,
    config: &ExtractionConfig,
) -> Result<ExtractionOutcome, IcrError> {
    info!("Starting extraction: {}", source.path().display());
    let bytes = source.read().await?;
    extract_from_bytes(bytes, config).await
}

/// Upload in-memory document bytes and render the extraction result.
///
/// Same contract as [`extract`], minus the file read.
pub async fn extract_from_bytes(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutcome, IcrError> {
    let upload_bytes = bytes.len();
    let response = upload::post_document(bytes, config).await?;

    let mut outcome = page_for_response(response.status, &response.body, &config.render)?;
    if let ExtractionOutcome::Rendered(ref mut output) = outcome {
        output.stats.upload_bytes = upload_bytes;
        output.stats.request_ms = response.elapsed_ms;
    }
    Ok(outcome)
}

/// Upload a document and write the page text to `output_path`.
///
/// The upstream-error text is written too, since it is what the user would
/// see. Uses atomic write (temp file + rename) to prevent partial files.
pub async fn extract_to_file(
    source: &UploadSource,
    output_path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutcome, IcrError> {
    let outcome = extract(source, config).await?;
    write_page(output_path.as_ref(), &outcome.page_text()).await?;
    Ok(outcome)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    source: &UploadSource,
    config: &ExtractionConfig,
) -> Result<ExtractionOutcome, IcrError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| IcrError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract(source, config))
}

/// Turn an HTTP status and body into an outcome.
///
/// Only status 200 is rendered; anything else becomes
/// [`ExtractionOutcome::UpstreamError`] without looking at the body.
pub fn page_for_response(
    status: u16,
    body: &str,
    options: &RenderOptions,
) -> Result<ExtractionOutcome, IcrError> {
    if status != 200 {
        warn!("Extraction API returned {}; skipping render", status);
        return Ok(ExtractionOutcome::UpstreamError {
            status,
            body: body.to_string(),
        });
    }
    render_saved(body, options).map(|output| ExtractionOutcome::Rendered(Box::new(output)))
}

/// Render a successful response body, e.g. one saved from an earlier call.
///
/// Required fields are checked before the table is normalised, so a
/// response missing both reports the missing field.
pub fn render_saved(body: &str, options: &RenderOptions) -> Result<ExtractionOutput, IcrError> {
    let start = Instant::now();

    let response = decode_response(body)?;
    let data = &response.data;
    debug!(
        "Decoded response: {} fields, {} columns",
        data.string_data.len(),
        data.table_data.column_count()
    );

    let summary = InvoiceSummary::from_string_data(&data.string_data)?;
    let table = normalize(&data.table_data)?;
    let html = render::compose_document(&data.string_data, &table, options);

    let stats = ExtractionStats {
        upload_bytes: 0,
        response_bytes: body.len(),
        fields: data.string_data.len(),
        columns: table.column_count(),
        rows: table.row_count(),
        padded_cells: table.padded_cells(),
        request_ms: 0,
        render_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Rendered {} fields and a {}×{} table",
        stats.fields, stats.columns, stats.rows
    );

    Ok(ExtractionOutput {
        html,
        response,
        summary,
        table,
        stats,
    })
}

/// Write page text to `path` atomically (temp file + rename), creating
/// parent directories as needed.
pub async fn write_page(path: &Path, text: &str) -> Result<(), IcrError> {
    let write_failed = |source| IcrError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, text).await.map_err(write_failed)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_failed)?;
    Ok(())
}
