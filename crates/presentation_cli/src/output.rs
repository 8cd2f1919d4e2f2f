//! Rendering of warning updates for the terminal

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write as _;

use application::error::ApplicationError;
use application::{ATTRIBUTION, FetchStatus, WarningSinkPort, WarningUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::Warning;
use serde::Serialize;

/// Output format of rendered updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable block per instance
    #[default]
    Text,
    /// One JSON document per instance
    Json,
}

impl OutputFormat {
    /// Pick the format from a `--json` flag
    #[must_use]
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// JSON view of one update
#[derive(Serialize)]
struct UpdateView<'a> {
    instance: &'a str,
    evaluated_at: DateTime<Utc>,
    state: String,
    is_on: bool,
    degraded: bool,
    attributes: BTreeMap<&'static str, String>,
    status: &'a FetchStatus,
    lead_time_minutes: i64,
    warnings: Vec<&'a Warning>,
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn render_text(update: &WarningUpdate) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}: {}", update.instance_name, update.summary.state());
    if let (Some(category), Some(severity)) = (update.alert.event_type, update.alert.event_level) {
        let _ = write!(out, " (top: {category}, {severity}/{})", severity.colour());
    }
    out.push('\n');

    for warning in update.relevant() {
        let _ = writeln!(
            out,
            "  - {} [{}] {} until {}",
            warning.category,
            warning.severity,
            format_time(warning.valid_from),
            format_time(warning.valid_until)
        );
        if let Some(description) = &warning.description {
            let _ = writeln!(out, "      {}", description.trim());
        }
    }

    if let FetchStatus::Degraded { reason, message } = &update.snapshot.status {
        let _ = writeln!(out, "  ! last fetch failed ({reason:?}): {message}");
    }

    let _ = write!(out, "  {ATTRIBUTION}");
    out
}

/// Render an update in the given format
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_update(update: &WarningUpdate, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(update)),
        OutputFormat::Json => {
            let view = UpdateView {
                instance: &update.instance_name,
                evaluated_at: update.evaluated_at,
                state: update.summary.state(),
                is_on: update.alert.is_on,
                degraded: update.snapshot.is_degraded(),
                attributes: update.alert.attributes(),
                status: &update.snapshot.status,
                lead_time_minutes: update.lead_time.minutes(),
                warnings: update.relevant(),
            };
            serde_json::to_string(&view)
        },
    }
}

/// Sink that prints each update to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWarningSink {
    format: OutputFormat,
}

impl StdoutWarningSink {
    /// Create a sink with the given format
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

#[async_trait]
impl WarningSinkPort for StdoutWarningSink {
    async fn publish(&self, update: &WarningUpdate) -> Result<(), ApplicationError> {
        let rendered =
            render_update(update, self.format).map_err(|e| ApplicationError::Sink(e.to_string()))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{rendered}").map_err(|e| ApplicationError::Sink(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use application::{AlertProjection, DegradedReason, SummaryProjection, WarningSnapshot};
    use chrono::{TimeDelta, TimeZone};
    use domain::{LeadTime, WarningCategory, WarningSet, WarningSeverity};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 26, 12, 0, 0).unwrap()
    }

    fn update(snapshot: WarningSnapshot) -> WarningUpdate {
        let lead_time = LeadTime::zero();
        WarningUpdate {
            instance_name: "Wien".into(),
            evaluated_at: now(),
            lead_time,
            alert: AlertProjection::from_warnings(&snapshot.warnings, now(), lead_time),
            summary: SummaryProjection::from_warnings(&snapshot.warnings, now(), lead_time),
            snapshot: Arc::new(snapshot),
        }
    }

    fn heat_snapshot() -> WarningSnapshot {
        let warnings = WarningSet::new(vec![
            Warning::new(
                WarningCategory::Heat,
                WarningSeverity::Moderate,
                now() - TimeDelta::hours(12),
                now() + TimeDelta::hours(11),
            )
            .with_description("Starke Hitzebelastung"),
            Warning::new(
                WarningCategory::Rain,
                WarningSeverity::Minor,
                now() - TimeDelta::hours(6),
                now() - TimeDelta::hours(1),
            ),
        ]);
        WarningSnapshot {
            warnings,
            fetched_at: Some(now()),
            status: FetchStatus::Fresh,
        }
    }

    #[test]
    fn text_lists_relevant_warnings_only() {
        let text = render_update(&update(heat_snapshot()), OutputFormat::Text).unwrap();

        assert!(text.starts_with("Wien: Warnings: 1 (top: Heat, Moderate/orange)"));
        assert!(text.contains("2025-06-26 00:00 UTC until 2025-06-26 23:00 UTC"));
        assert!(text.contains("Starke Hitzebelastung"));
        assert!(!text.contains("Rain"));
        assert!(text.ends_with(ATTRIBUTION));
    }

    #[test]
    fn text_without_warnings() {
        let text = render_update(&update(WarningSnapshot::pending()), OutputFormat::Text).unwrap();
        assert!(text.starts_with("Wien: No Warnings\n"));
    }

    fn snapshot_timeout() -> WarningSnapshot {
        WarningSnapshot {
            warnings: WarningSet::empty(),
            fetched_at: Some(now()),
            status: FetchStatus::Degraded {
                reason: DegradedReason::Timeout,
                message: "cycle exceeded 20s".into(),
            },
        }
    }

    #[test]
    fn degraded_fetch_is_reported() {
        let text = render_update(&update(snapshot_timeout()), OutputFormat::Text).unwrap();
        assert!(text.contains("No Warnings"));
        assert!(text.contains("last fetch failed (Timeout): cycle exceeded 20s"));

        let json = render_update(&update(snapshot_timeout()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["degraded"], true);
        assert_eq!(value["is_on"], false);
    }

    #[test]
    fn json_carries_host_attributes() {
        let json = render_update(&update(heat_snapshot()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["instance"], "Wien");
        assert_eq!(value["state"], "Warnings: 1");
        assert_eq!(value["is_on"], true);
        assert_eq!(value["degraded"], false);
        assert_eq!(value["attributes"]["eventType"], "heat");
        assert_eq!(value["attributes"]["eventLevel"], "moderate");
        assert_eq!(value["attributes"]["attribution"], ATTRIBUTION);
        assert_eq!(value["status"]["status"], "fresh");
        assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
        assert_eq!(value["warnings"][0]["category"], "heat");
    }

    #[test]
    fn format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Text);
    }

    #[tokio::test]
    async fn stdout_sink_publishes() {
        let sink = StdoutWarningSink::new(OutputFormat::Json);
        assert!(sink.publish(&update(heat_snapshot())).await.is_ok());
    }
}
