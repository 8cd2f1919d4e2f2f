//! Warning sink port
//!
//! Where computed warning states are published after each fetch cycle.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{LeadTime, Warning};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::projections::{AlertProjection, SummaryProjection};
use crate::services::WarningSnapshot;

/// Everything a host needs to render one instance after a cycle
#[derive(Debug, Clone)]
pub struct WarningUpdate {
    /// Display name of the monitor instance
    pub instance_name: String,
    /// When the projections were evaluated
    pub evaluated_at: DateTime<Utc>,
    /// Lookahead the projections were computed with
    pub lead_time: LeadTime,
    /// Full snapshot, kept for later relevance queries
    pub snapshot: Arc<WarningSnapshot>,
    /// Boolean alarm view
    pub alert: AlertProjection,
    /// Count view
    pub summary: SummaryProjection,
}

impl WarningUpdate {
    /// Warnings of the snapshot that are relevant at `evaluated_at`
    #[must_use]
    pub fn relevant(&self) -> Vec<&Warning> {
        self.snapshot.warnings.relevant(self.evaluated_at, self.lead_time)
    }
}

/// Port for publishing warning states to a host
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WarningSinkPort: Send + Sync {
    /// Publish the state of one instance
    async fn publish(&self, update: &WarningUpdate) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WarningSinkPort>();
    }

    #[test]
    fn cloned_update_shares_snapshot() {
        let update = WarningUpdate {
            instance_name: "Wien".into(),
            evaluated_at: Utc::now(),
            lead_time: LeadTime::zero(),
            snapshot: Arc::new(WarningSnapshot::pending()),
            alert: AlertProjection::off(),
            summary: SummaryProjection::default(),
        };

        let copy = update.clone();
        assert!(Arc::ptr_eq(&update.snapshot, &copy.snapshot));
        assert!(copy.relevant().is_empty());
        assert!(format!("{copy:?}").contains("Wien"));
    }
}
