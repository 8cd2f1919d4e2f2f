//! GeoSphere adapter - Implements WarningsPort using integration_geosphere

use application::error::ApplicationError;
use application::ports::WarningsPort;
use async_trait::async_trait;
use domain::{GeoLocation, WarningSet};
use integration_geosphere::{GeosphereClient, GeosphereConfig, GeosphereError, WarningsClient};
use tracing::{debug, instrument};

/// Adapter for the GeoSphere Austria warnings API
pub struct GeosphereAdapter {
    client: GeosphereClient,
}

impl std::fmt::Debug for GeosphereAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeosphereAdapter")
            .field("base_url", &self.client.config().base_url)
            .finish()
    }
}

impl GeosphereAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(GeosphereConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: GeosphereConfig) -> Result<Self, ApplicationError> {
        let client =
            GeosphereClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration error to application error
    fn map_error(err: GeosphereError) -> ApplicationError {
        match err {
            GeosphereError::ConnectionFailed(e)
            | GeosphereError::RequestFailed(e)
            | GeosphereError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            GeosphereError::Timeout(secs) => {
                ApplicationError::ExternalService(format!("Request timed out after {secs}s"))
            },
            GeosphereError::MalformedResponse(e) => ApplicationError::InvalidData(e),
            GeosphereError::InvalidCoordinates => {
                ApplicationError::InvalidOperation("Invalid coordinates".into())
            },
            GeosphereError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }
}

#[async_trait]
impl WarningsPort for GeosphereAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn fetch_warnings(&self, location: &GeoLocation) -> Result<WarningSet, ApplicationError> {
        let result = self
            .client
            .fetch_warnings(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(warnings) => debug!(count = warnings.len(), "Retrieved warnings"),
            Err(e) => debug!(error = %e, "Failed to retrieve warnings"),
        }

        result
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_adapter() {
        assert!(GeosphereAdapter::new().is_ok());
    }

    #[test]
    fn debug_shows_base_url() {
        let adapter = GeosphereAdapter::new().unwrap();
        let debug_str = format!("{adapter:?}");
        assert!(debug_str.contains("GeosphereAdapter"));
        assert!(debug_str.contains("warnungen.zamg.at"));
    }

    #[test]
    fn map_error_transport() {
        let app_err = GeosphereAdapter::map_error(GeosphereError::ConnectionFailed("refused".into()));
        assert!(matches!(app_err, ApplicationError::ExternalService(_)));

        let app_err = GeosphereAdapter::map_error(GeosphereError::Timeout(15));
        assert!(matches!(app_err, ApplicationError::ExternalService(ref m) if m.contains("15s")));

        let app_err = GeosphereAdapter::map_error(GeosphereError::ServiceUnavailable("502".into()));
        assert!(matches!(app_err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn map_error_malformed() {
        let app_err = GeosphereAdapter::map_error(GeosphereError::MalformedResponse("eof".into()));
        assert!(matches!(app_err, ApplicationError::InvalidData(_)));
    }

    #[test]
    fn map_error_rate_limited() {
        let app_err = GeosphereAdapter::map_error(GeosphereError::RateLimitExceeded);
        assert!(matches!(app_err, ApplicationError::RateLimited));
    }

    #[test]
    fn map_error_invalid_coords() {
        let app_err = GeosphereAdapter::map_error(GeosphereError::InvalidCoordinates);
        assert!(matches!(app_err, ApplicationError::InvalidOperation(_)));
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeosphereAdapter>();
    }
}
