//! Warnings source port
//!
//! Defines the interface for retrieving the warnings issued for a location.

use async_trait::async_trait;
use domain::{GeoLocation, WarningSet};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching warning snapshots
///
/// One call performs exactly one upstream request; implementations must
/// not retry or cache.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WarningsPort: Send + Sync {
    /// Fetch all warnings currently published for a location
    async fn fetch_warnings(&self, location: &GeoLocation) -> Result<WarningSet, ApplicationError>;

    /// Check if the warnings source is available
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WarningsPort>();
    }

    #[tokio::test]
    async fn mock_returns_configured_set() {
        let mut mock = MockWarningsPort::new();
        mock.expect_fetch_warnings()
            .returning(|_| Ok(WarningSet::empty()));

        let location = GeoLocation::new(48.2, 16.37).expect("valid");
        let set = mock.fetch_warnings(&location).await.expect("ok");
        assert!(set.is_empty());
    }
}
