//! Configuration types for uploading a document and rendering the result.
//!
//! All behaviour is controlled through [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. The page layout knobs live in a separate
//! [`RenderOptions`] so the pure formatter can be driven without any
//! network settings.

use crate::error::IcrError;
use serde::{Deserialize, Serialize};

/// Extraction endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://poc.lightinfosys.com/external_api/auto_extraction";

/// Logo shown at the top of the rendered page.
pub const DEFAULT_HEADER_IMAGE_URL: &str = "https://cdn-heiaj.nitrocdn.com/yoXwCrslgRpntnfOSDmSVmVdcrMRrNaM/assets/images/optimized/rev-d4788e9/e42.ai/wp-content/uploads/2021/09/E_42-logo.png";

/// Title shown under the logo.
pub const DEFAULT_TITLE: &str = "ICR EXTRACTION";

/// Target of the static submit form.
pub const DEFAULT_SUBMIT_ACTION: &str = "/submit";

/// Configuration for one upload-and-render request.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use icr_extract::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .endpoint("http://localhost:8080/auto_extraction")
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.timeout_secs, Some(30));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// URL the document is POSTed to.
    pub endpoint: String,

    /// Whole-request timeout in seconds. Default: `None`.
    ///
    /// `None` waits for the API indefinitely; the upload blocks until a
    /// response or a transport failure arrives.
    pub timeout_secs: Option<u64>,

    /// `User-Agent` header sent with the upload.
    pub user_agent: String,

    /// Layout of the rendered HTML page.
    pub render: RenderOptions,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            user_agent: concat!("icr-extract/", env!("CARGO_PKG_VERSION")).to_string(),
            render: RenderOptions::default(),
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = Some(secs);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.render.title = title.into();
        self
    }

    pub fn header_image_url(mut self, url: impl Into<String>) -> Self {
        self.config.render.header_image_url = url.into();
        self
    }

    pub fn submit_action(mut self, action: impl Into<String>) -> Self {
        self.config.render.submit_action = action.into();
        self
    }

    pub fn editable_table(mut self, v: bool) -> Self {
        self.config.render.editable_table = v;
        self
    }

    pub fn render(mut self, options: RenderOptions) -> Self {
        self.config.render = options;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, IcrError> {
        let c = &self.config;
        if !is_http_url(&c.endpoint) {
            return Err(IcrError::InvalidConfig(format!(
                "Endpoint must be an http:// or https:// URL, got '{}'",
                c.endpoint
            )));
        }
        if c.timeout_secs == Some(0) {
            return Err(IcrError::InvalidConfig(
                "Timeout must be ≥ 1 second when set".into(),
            ));
        }
        if c.render.title.trim().is_empty() {
            return Err(IcrError::InvalidConfig("Title must not be empty".into()));
        }
        Ok(self.config)
    }
}

fn is_http_url(s: &str) -> bool {
    let rest = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

/// Layout of the rendered result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Heading under the logo. Default: `ICR EXTRACTION`.
    pub title: String,
    /// `src` of the header logo.
    pub header_image_url: String,
    /// `action` of the submit form. Default: `/submit`.
    pub submit_action: String,
    /// Mark the table container `contentEditable` on load. Default: true.
    pub editable_table: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            header_image_url: DEFAULT_HEADER_IMAGE_URL.to_string(),
            submit_action: DEFAULT_SUBMIT_ACTION.to_string(),
            editable_table: true,
        }
    }
}
