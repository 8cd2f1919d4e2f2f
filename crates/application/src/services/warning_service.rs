//! Warning monitor service
//!
//! Runs one fetch cycle per call for a single configured location. A failed
//! cycle never surfaces as an error: it produces an empty snapshot so the
//! host shows "no warnings known" instead of an error state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::{GeoLocation, LeadTime, WarningSet};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{WarningSinkPort, WarningUpdate, WarningsPort};
use crate::projections::{AlertProjection, SummaryProjection};

/// Upper bound for a whole cycle, on top of the client's own request timeout
const DEFAULT_CYCLE_TIMEOUT_SECS: u64 = 20;

/// Identity of a monitor instance, chosen by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create an instance id
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` for blank ids.
    pub fn new(id: impl Into<String>) -> Result<Self, ApplicationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "instance id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Id as string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated settings of one monitor instance
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Registry key
    pub id: InstanceId,
    /// Display name
    pub name: String,
    /// Monitored coordinate
    pub location: GeoLocation,
    /// Lookahead for not-yet-started warnings
    pub lead_time: LeadTime,
    /// Hard bound for one fetch cycle
    pub cycle_timeout: Duration,
}

impl MonitorConfig {
    /// Create a config with the default cycle timeout
    #[must_use]
    pub fn new(id: InstanceId, name: impl Into<String>, location: GeoLocation, lead_time: LeadTime) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            lead_time,
            cycle_timeout: Duration::from_secs(DEFAULT_CYCLE_TIMEOUT_SECS),
        }
    }

    /// Override the cycle timeout
    #[must_use]
    pub fn with_cycle_timeout(mut self, cycle_timeout: Duration) -> Self {
        self.cycle_timeout = cycle_timeout;
        self
    }
}

/// Why a cycle produced no data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// Connection, HTTP status or rate limit problem
    Transport,
    /// Payload could not be understood
    Data,
    /// Cycle exceeded its time bound
    Timeout,
}

impl DegradedReason {
    fn from_error(err: &ApplicationError) -> Self {
        match err {
            ApplicationError::InvalidData(_) | ApplicationError::Domain(_) => Self::Data,
            _ => Self::Transport,
        }
    }
}

/// Outcome of the cycle that produced a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchStatus {
    /// No cycle has completed yet
    Pending,
    /// Warnings were fetched and parsed
    Fresh,
    /// The cycle failed; the snapshot is empty
    Degraded {
        /// Failure class
        reason: DegradedReason,
        /// Error text for operators
        message: String,
    },
}

/// Result of one fetch cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningSnapshot {
    /// Warnings in source order
    pub warnings: WarningSet,
    /// When the cycle started
    pub fetched_at: Option<DateTime<Utc>>,
    /// How the cycle went
    pub status: FetchStatus,
}

impl WarningSnapshot {
    /// Snapshot before the first cycle
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            warnings: WarningSet::empty(),
            fetched_at: None,
            status: FetchStatus::Pending,
        }
    }

    fn fresh(warnings: WarningSet, fetched_at: DateTime<Utc>) -> Self {
        Self {
            warnings,
            fetched_at: Some(fetched_at),
            status: FetchStatus::Fresh,
        }
    }

    fn degraded(reason: DegradedReason, message: String, fetched_at: DateTime<Utc>) -> Self {
        Self {
            warnings: WarningSet::empty(),
            fetched_at: Some(fetched_at),
            status: FetchStatus::Degraded { reason, message },
        }
    }

    /// True if the last cycle failed
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.status, FetchStatus::Degraded { .. })
    }
}

/// Service that owns the latest snapshot of one monitor instance
pub struct WarningService {
    port: Arc<dyn WarningsPort>,
    config: MonitorConfig,
    snapshot: RwLock<Arc<WarningSnapshot>>,
}

impl fmt::Debug for WarningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningService")
            .field("config", &self.config)
            .field("status", &self.snapshot.read().status)
            .finish_non_exhaustive()
    }
}

impl WarningService {
    /// Create a new service; no fetch happens until [`Self::refresh`]
    #[must_use]
    pub fn new(port: Arc<dyn WarningsPort>, config: MonitorConfig) -> Self {
        Self {
            port,
            config,
            snapshot: RwLock::new(Arc::new(WarningSnapshot::pending())),
        }
    }

    /// Instance settings
    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Latest snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<WarningSnapshot> {
        Arc::clone(&self.snapshot.read())
    }

    /// Run one fetch cycle and replace the stored snapshot
    ///
    /// Never fails: transport, data and timeout failures all yield an
    /// empty, degraded snapshot.
    #[instrument(skip(self), fields(instance = %self.config.id))]
    pub async fn refresh(&self) -> Arc<WarningSnapshot> {
        let fetched_at = Utc::now();
        let fetch = self.port.fetch_warnings(&self.config.location);

        let snapshot = match timeout(self.config.cycle_timeout, fetch).await {
            Ok(Ok(warnings)) => {
                debug!(count = warnings.len(), "Fetched warnings");
                WarningSnapshot::fresh(warnings, fetched_at)
            },
            Ok(Err(e)) => {
                let reason = DegradedReason::from_error(&e);
                warn!(
                    error = %e,
                    ?reason,
                    retryable = e.is_retryable(),
                    "Warning fetch failed, treating cycle as empty"
                );
                WarningSnapshot::degraded(reason, e.to_string(), fetched_at)
            },
            Err(_) => {
                let limit = self.config.cycle_timeout;
                warn!(timeout = ?limit, "Warning fetch cycle timed out, treating cycle as empty");
                WarningSnapshot::degraded(
                    DegradedReason::Timeout,
                    format!("cycle exceeded {limit:?}"),
                    fetched_at,
                )
            },
        };

        let snapshot = Arc::new(snapshot);
        *self.snapshot.write() = Arc::clone(&snapshot);
        snapshot
    }

    /// Boolean alarm view of the stored snapshot
    #[must_use]
    pub fn alert(&self, now: DateTime<Utc>) -> AlertProjection {
        AlertProjection::from_warnings(&self.snapshot().warnings, now, self.config.lead_time)
    }

    /// Count view of the stored snapshot
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> SummaryProjection {
        SummaryProjection::from_warnings(&self.snapshot().warnings, now, self.config.lead_time)
    }

    /// Both projections plus the snapshot, evaluated at `now`
    #[must_use]
    pub fn update_at(&self, now: DateTime<Utc>) -> WarningUpdate {
        let snapshot = self.snapshot();
        WarningUpdate {
            instance_name: self.config.name.clone(),
            evaluated_at: now,
            lead_time: self.config.lead_time,
            alert: AlertProjection::from_warnings(&snapshot.warnings, now, self.config.lead_time),
            summary: SummaryProjection::from_warnings(&snapshot.warnings, now, self.config.lead_time),
            snapshot,
        }
    }

    /// Refresh, project and publish to a sink
    ///
    /// # Errors
    ///
    /// Only sink failures are returned; fetch failures are absorbed.
    #[instrument(skip(self, sink), fields(instance = %self.config.id))]
    pub async fn run_cycle(&self, sink: &dyn WarningSinkPort) -> Result<WarningUpdate, ApplicationError> {
        self.refresh().await;
        let update = self.update_at(Utc::now());

        info!(
            state = %update.summary.state(),
            alert = update.alert.is_on,
            degraded = update.snapshot.is_degraded(),
            "Publishing warning state"
        );

        sink.publish(&update).await?;
        Ok(update)
    }

    /// Check if the warnings source is reachable
    pub async fn is_available(&self) -> bool {
        self.port.is_available().await
    }
}
