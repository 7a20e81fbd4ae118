//! The one network call: POST the document to the extraction API.
//!
//! The request is a multipart form with a single part named `file` (filename
//! `file`, content type `application/octet-stream`) carrying the raw bytes.
//! No auth headers, no retries; a timeout applies only when configured.
//!
//! Any HTTP status is a successful call at this layer. Interpreting the
//! status belongs to the caller, which shows non-200 answers to the user
//! verbatim.

use crate::config::ExtractionConfig;
use crate::error::IcrError;
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};
use tracing::info;

/// Name, filename and content type of the uploaded part.
pub const FILE_FIELD: &str = "file";
pub const FILE_NAME: &str = "file";
pub const FILE_MIME: &str = "application/octet-stream";

/// Raw answer from the extraction API.
#[derive(Debug, Clone)]
pub struct UploadResponse {
    pub status: u16,
    pub body: String,
    pub elapsed_ms: u64,
}

/// Upload `bytes` to `config.endpoint` and collect the full response.
pub async fn post_document(
    bytes: Vec<u8>,
    config: &ExtractionConfig,
) -> Result<UploadResponse, IcrError> {
    let endpoint = config.endpoint.as_str();
    let request_failed = |e: reqwest::Error| {
        if e.is_timeout() {
            IcrError::RequestTimeout {
                endpoint: endpoint.to_string(),
                secs: config.timeout_secs.unwrap_or_default(),
            }
        } else {
            IcrError::RequestFailed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        }
    };

    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder
        .build()
        .map_err(|e| IcrError::Internal(format!("HTTP client: {e}")))?;

    let upload_len = bytes.len();
    let part = Part::bytes(bytes)
        .file_name(FILE_NAME)
        .mime_str(FILE_MIME)
        .map_err(|e| IcrError::Internal(format!("multipart part: {e}")))?;
    let form = Form::new().part(FILE_FIELD, part);

    info!("Uploading {} bytes to {}", upload_len, endpoint);
    let start = Instant::now();

    let response = client
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(request_failed)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(request_failed)?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    info!(
        "Extraction API answered {} ({} bytes) in {}ms",
        status,
        body.len(),
        elapsed_ms
    );

    Ok(UploadResponse {
        status,
        body,
        elapsed_ms,
    })
}
