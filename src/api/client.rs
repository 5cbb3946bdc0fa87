//! HTTP client for the remote analysis/history service
//!
//! All calls run with a bounded timeout; transport failures are kept
//! distinct from application-level rejections so screens can message
//! them differently.

use reqwest::Client;
use std::fmt;

/// Error types for remote API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Request did not complete within the configured timeout
    Timeout(String),
    /// Transport-level failure (connection refused, DNS, TLS, ...)
    Network(String),
    /// Server responded but reported failure (non-2xx or `success: false`)
    Rejected { status: u16, message: String },
    /// Response body could not be parsed
    InvalidResponse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Timeout(msg) => write!(f, "Request timed out: {}", msg),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Rejected { status, message } => {
                write!(f, "Server rejected request ({}): {}", status, message)
            }
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// Remote service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Client for the diagnosis/history backend
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    pub fn with_default_config() -> Self {
        Self::new(ApiConfig::default())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

/// Turn a non-2xx response into `ApiError::Rejected`, passing a
/// successful response through
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
