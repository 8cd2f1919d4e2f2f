//! GeoSphere warnings client
//!
//! HTTP client for the `getWarningsForCoords` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use domain::WarningSet;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::parse_payload;

/// Warnings client errors
#[derive(Debug, Error)]
pub enum GeosphereError {
    /// Transport-level failure (DNS, refused connection, TLS)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Request was answered with an unexpected status or aborted
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Payload received but not in the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl GeosphereError {
    /// True for failures of the transport rather than of the data
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout(_)
                | Self::RequestFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::RateLimitExceeded
        )
    }

    fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Warnings service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeosphereConfig {
    /// Warnings API base URL (default: <https://warnungen.zamg.at/wsapp/api>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Language of the free-text fields (default: "de")
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    "https://warnungen.zamg.at/wsapp/api".to_string()
}

const fn default_timeout() -> u64 {
    15
}

fn default_language() -> String {
    "de".to_string()
}

impl Default for GeosphereConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            language: default_language(),
        }
    }
}

/// Client trait for fetching warnings
#[async_trait]
pub trait WarningsClient: Send + Sync {
    /// Fetch all warnings issued for a coordinate
    async fn fetch_warnings(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WarningSet, GeosphereError>;

    /// Check if the warnings service is reachable and answering
    async fn is_healthy(&self) -> bool;
}

/// GeoSphere HTTP client implementation
#[derive(Debug, Clone)]
pub struct GeosphereClient {
    client: Client,
    config: GeosphereConfig,
}

impl GeosphereClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeosphereConfig) -> Result<Self, GeosphereError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeosphereError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, GeosphereError> {
        Self::new(GeosphereConfig::default())
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GeosphereConfig {
        &self.config
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), GeosphereError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeosphereError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Endpoint URL without query string
    fn warnings_url(&self) -> String {
        format!(
            "{}/getWarningsForCoords",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Perform the GET and return the decoded JSON body
    async fn fetch_payload(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<serde_json::Value, GeosphereError> {
        let url = self.warnings_url();
        debug!(url = %url, "Fetching warnings");

        let timeout_secs = self.config.timeout_secs;
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("lang", self.config.language.clone()),
            ])
            .send()
            .await
            .map_err(|e| GeosphereError::from_reqwest(&e, timeout_secs))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeosphereError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeosphereError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeosphereError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeosphereError::from_reqwest(&e, timeout_secs))?;

        serde_json::from_str(&body).map_err(|e| GeosphereError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl WarningsClient for GeosphereClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn fetch_warnings(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WarningSet, GeosphereError> {
        Self::validate_coordinates(latitude, longitude)?;

        let payload = self.fetch_payload(latitude, longitude).await?;
        let parsed = parse_payload(payload)?;

        debug!(
            warnings = parsed.warnings.len(),
            rejected = parsed.rejected,
            "Retrieved warnings"
        );

        Ok(parsed.warnings)
    }

    async fn is_healthy(&self) -> bool {
        // Vienna as reference point
        self.fetch_warnings(48.2082, 16.3738).await.is_ok()
    }
}
