//! Interval-based poller for warning monitors
//!
//! Triggers one fetch cycle per tick for a single monitor instance and
//! publishes the result. Cycles are awaited inline, so at most one fetch
//! per instance is in flight.

use std::sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
};
use std::time::{Duration, Instant};

use application::{WarningService, WarningSinkPort, WarningUpdate};
use application::error::ApplicationError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

/// Shortest accepted poll interval
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Statistics for one poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerStats {
    /// Instance display name
    pub instance: String,
    /// Cycles that produced fresh data and were published
    pub success_count: u64,
    /// Cycles that degraded or could not be published
    pub failure_count: u64,
    /// Last cycle start
    pub last_run: Option<DateTime<Utc>>,
    /// Last successful cycle
    pub last_success: Option<DateTime<Utc>>,
    /// Last failed cycle
    pub last_failure: Option<DateTime<Utc>>,
    /// Last error message
    pub last_error: Option<String>,
    /// Relevant warnings after the last cycle
    pub last_warning_count: usize,
    /// Average cycle duration in milliseconds
    pub avg_duration_ms: u64,
}

/// Internal counters
#[derive(Debug, Default)]
struct PollerMetrics {
    success_count: AtomicU64,
    failure_count: AtomicU64,
    total_duration_ms: AtomicU64,
    last_warning_count: AtomicUsize,
    last_run: RwLock<Option<DateTime<Utc>>>,
    last_success: RwLock<Option<DateTime<Utc>>>,
    last_failure: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
}

impl PollerMetrics {
    fn to_stats(&self, instance: &str) -> PollerStats {
        let success = self.success_count.load(Ordering::Relaxed);
        let failure = self.failure_count.load(Ordering::Relaxed);
        let total = success + failure;
        let avg_duration = if total > 0 {
            self.total_duration_ms.load(Ordering::Relaxed) / total
        } else {
            0
        };

        PollerStats {
            instance: instance.to_string(),
            success_count: success,
            failure_count: failure,
            last_run: *self.last_run.read(),
            last_success: *self.last_success.read(),
            last_failure: *self.last_failure.read(),
            last_error: self.last_error.read().clone(),
            last_warning_count: self.last_warning_count.load(Ordering::Relaxed),
            avg_duration_ms: avg_duration,
        }
    }

    fn record_success(&self, started: DateTime<Utc>, duration_ms: u64, warnings: usize) {
        self.success_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms.fetch_add(duration_ms, Ordering::Relaxed);
        self.last_warning_count.store(warnings, Ordering::Relaxed);
        *self.last_run.write() = Some(started);
        *self.last_success.write() = Some(started);
    }

    fn record_failure(&self, started: DateTime<Utc>, duration_ms: u64, warnings: usize, error: String) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
        self.total_duration_ms.fetch_add(duration_ms, Ordering::Relaxed);
        self.last_warning_count.store(warnings, Ordering::Relaxed);
        *self.last_run.write() = Some(started);
        *self.last_failure.write() = Some(started);
        *self.last_error.write() = Some(error);
    }
}

/// Periodic driver for one `WarningService`
pub struct WarningPoller {
    service: Arc<WarningService>,
    sink: Arc<dyn WarningSinkPort>,
    interval: Duration,
    metrics: PollerMetrics,
}

impl std::fmt::Debug for WarningPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarningPoller")
            .field("instance", &self.service.config().id)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl WarningPoller {
    /// Create a poller; intervals below one second are raised to one second
    #[must_use]
    pub fn new(service: Arc<WarningService>, sink: Arc<dyn WarningSinkPort>, interval: Duration) -> Self {
        Self {
            service,
            sink,
            interval: interval.max(MIN_INTERVAL),
            metrics: PollerMetrics::default(),
        }
    }

    /// Effective poll interval
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Current statistics
    #[must_use]
    pub fn stats(&self) -> PollerStats {
        self.metrics.to_stats(&self.service.config().name)
    }

    /// Run a single cycle and record its outcome
    ///
    /// # Errors
    ///
    /// Returns an error only if the sink rejected the update.
    #[instrument(skip(self), fields(instance = %self.service.config().id))]
    pub async fn run_once(&self) -> Result<WarningUpdate, ApplicationError> {
        let started_at = Utc::now();
        let start = Instant::now();
        let result = self.service.run_cycle(self.sink.as_ref()).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(update) => {
                let count = update.summary.count;
                if let application::FetchStatus::Degraded { message, .. } = &update.snapshot.status {
                    self.metrics
                        .record_failure(started_at, duration_ms, count, message.clone());
                } else {
                    self.metrics.record_success(started_at, duration_ms, count);
                }
                debug!(duration_ms, warnings = count, "Cycle completed");
            },
            Err(e) => {
                self.metrics
                    .record_failure(started_at, duration_ms, 0, e.to_string());
                error!(error = %e, duration_ms, "Failed to publish warning state");
            },
        }

        result
    }

    /// Poll until `shutdown` flips to `true` or its sender is dropped
    ///
    /// The first cycle runs immediately. Missed ticks are delayed, not
    /// bunched up.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            instance = %self.service.config().id,
            interval_secs = self.interval.as_secs(),
            "Warning poller started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        warn!(error = %e, "Cycle ended with error, retrying on next tick");
                    }
                },
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                },
            }
        }

        info!(instance = %self.service.config().id, "Warning poller stopped");
    }

    /// Run the poll loop on a background task
    pub fn spawn(self: Arc<Self>, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::{InstanceId, MonitorConfig, WarningsPort};
    use async_trait::async_trait;
    use chrono::TimeDelta;
    use domain::{GeoLocation, LeadTime, Warning, WarningCategory, WarningSet, WarningSeverity};
    use tokio::sync::mpsc;

    use crate::adapters::ChannelWarningSink;

    struct StaticPort(Result<WarningSet, String>);

    #[async_trait]
    impl WarningsPort for StaticPort {
        async fn fetch_warnings(&self, _location: &GeoLocation) -> Result<WarningSet, ApplicationError> {
            self.0.clone().map_err(ApplicationError::ExternalService)
        }

        async fn is_available(&self) -> bool {
            self.0.is_ok()
        }
    }

    struct ClosedSink;

    #[async_trait]
    impl WarningSinkPort for ClosedSink {
        async fn publish(&self, _update: &WarningUpdate) -> Result<(), ApplicationError> {
            Err(ApplicationError::Sink("closed".into()))
        }
    }

    fn active_set() -> WarningSet {
        let now = Utc::now();
        WarningSet::new(vec![Warning::new(
            WarningCategory::Storm,
            WarningSeverity::Severe,
            now - TimeDelta::hours(1),
            now + TimeDelta::hours(1),
        )])
    }

    fn service(port: StaticPort) -> Arc<WarningService> {
        let config = MonitorConfig::new(
            InstanceId::new("linz").unwrap(),
            "Linz",
            GeoLocation::new(48.3069, 14.2858).unwrap(),
            LeadTime::zero(),
        );
        Arc::new(WarningService::new(Arc::new(port), config))
    }

    fn poller(port: StaticPort) -> (WarningPoller, mpsc::Receiver<WarningUpdate>) {
        let (sink, rx) = ChannelWarningSink::channel(8);
        (
            WarningPoller::new(service(port), Arc::new(sink), Duration::from_secs(300)),
            rx,
        )
    }

    #[test]
    fn interval_has_lower_bound() {
        let (sink, _rx) = ChannelWarningSink::channel(1);
        let poller = WarningPoller::new(
            service(StaticPort(Ok(WarningSet::empty()))),
            Arc::new(sink),
            Duration::ZERO,
        );
        assert_eq!(poller.interval(), MIN_INTERVAL);
    }

    #[test]
    fn stats_start_empty() {
        let (poller, _rx) = poller(StaticPort(Ok(WarningSet::empty())));
        let stats = poller.stats();
        assert_eq!(stats.instance, "Linz");
        assert_eq!(stats.success_count, 0);
        assert_eq!(stats.failure_count, 0);
        assert!(stats.last_run.is_none());
        assert_eq!(stats.avg_duration_ms, 0);
    }

    #[tokio::test]
    async fn successful_cycle_is_published_and_counted() {
        let (poller, mut rx) = poller(StaticPort(Ok(active_set())));

        let update = poller.run_once().await.unwrap();
        assert!(update.alert.is_on);

        let published = rx.recv().await.unwrap();
        assert_eq!(published.summary.state(), "Warnings: 1");

        let stats = poller.stats();
        assert_eq!(stats.success_count, 1);
        assert_eq!(stats.failure_count, 0);
        assert_eq!(stats.last_warning_count, 1);
        assert!(stats.last_success.is_some());
        assert!(stats.last_error.is_none());
    }

    #[tokio::test]
    async fn degraded_cycle_is_published_as_empty_and_counted_as_failure() {
        let (poller, mut rx) = poller(StaticPort(Err("connection refused".into())));

        poller.run_once().await.unwrap();

        let published = rx.recv().await.unwrap();
        assert!(!published.alert.is_on);
        assert_eq!(published.summary.state(), "No Warnings");

        let stats = poller.stats();
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.last_warning_count, 0);
        assert!(stats.last_error.unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn sink_failure_is_returned_and_counted() {
        let poller = WarningPoller::new(
            service(StaticPort(Ok(active_set()))),
            Arc::new(ClosedSink),
            Duration::from_secs(300),
        );

        let result = poller.run_once().await;
        assert!(matches!(result, Err(ApplicationError::Sink(_))));
        assert_eq!(poller.stats().failure_count, 1);
    }

    #[tokio::test]
    async fn run_loop_fetches_immediately_and_stops_on_shutdown() {
        let (poller, mut rx) = poller(StaticPort(Ok(active_set())));
        let poller = Arc::new(poller);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = Arc::clone(&poller).spawn(shutdown_rx);

        let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("first cycle runs without waiting for the interval")
            .unwrap();
        assert_eq!(first.instance_name, "Linz");

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("poller stops")
            .unwrap();

        assert_eq!(poller.stats().success_count, 1);
    }

    #[tokio::test]
    async fn run_loop_stops_when_sender_dropped() {
        let (poller, _rx) = poller(StaticPort(Ok(WarningSet::empty())));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(5), poller.run(shutdown_rx))
            .await
            .expect("poller stops");
    }
}
