//! Host-facing projections of a warning snapshot
//!
//! Two read-only views over the same `WarningSet`: a boolean alarm and a
//! count summary. Both go through `WarningSet::relevant`, so filtering
//! rules live in one place.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use domain::{LeadTime, Warning, WarningCategory, WarningSet, WarningSeverity, highest_severity};
use serde::{Deserialize, Serialize};

/// Attribution shown next to every projected state
pub const ATTRIBUTION: &str = "Data by Geosphere Austria";

/// Boolean alarm view: is any warning relevant, and which one tops the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertProjection {
    /// True while at least one warning is relevant
    pub is_on: bool,
    /// Category of the most severe relevant warning
    pub event_type: Option<WarningCategory>,
    /// Severity of the most severe relevant warning
    pub event_level: Option<WarningSeverity>,
}

impl AlertProjection {
    /// Project a snapshot at `now` with the given lead time
    #[must_use]
    pub fn from_warnings(warnings: &WarningSet, now: DateTime<Utc>, lead_time: LeadTime) -> Self {
        Self::from_relevant(&warnings.relevant(now, lead_time))
    }

    fn from_relevant(relevant: &[&Warning]) -> Self {
        let top = highest_severity(relevant.iter().copied());
        Self {
            is_on: top.is_some(),
            event_type: top.map(|w| w.category),
            event_level: top.map(|w| w.severity),
        }
    }

    /// An alarm that is off
    #[must_use]
    pub const fn off() -> Self {
        Self {
            is_on: false,
            event_type: None,
            event_level: None,
        }
    }

    /// Extra state attributes in the host's naming
    #[must_use]
    pub fn attributes(&self) -> BTreeMap<&'static str, String> {
        let mut attrs = BTreeMap::new();
        attrs.insert("attribution", ATTRIBUTION.to_string());
        if let Some(category) = self.event_type {
            attrs.insert("eventType", category.as_str().to_string());
        }
        if let Some(severity) = self.event_level {
            attrs.insert("eventLevel", severity.as_str().to_string());
        }
        attrs
    }
}

impl Default for AlertProjection {
    fn default() -> Self {
        Self::off()
    }
}

/// Count view: how many warnings are relevant and the top one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryProjection {
    /// Number of relevant warnings
    pub count: usize,
    /// Category of the most severe relevant warning
    pub top_category: Option<WarningCategory>,
    /// Severity of the most severe relevant warning
    pub top_severity: Option<WarningSeverity>,
}

impl SummaryProjection {
    /// Project a snapshot at `now` with the given lead time
    #[must_use]
    pub fn from_warnings(warnings: &WarningSet, now: DateTime<Utc>, lead_time: LeadTime) -> Self {
        let relevant = warnings.relevant(now, lead_time);
        let top = highest_severity(relevant.iter().copied());
        Self {
            count: relevant.len(),
            top_category: top.map(|w| w.category),
            top_severity: top.map(|w| w.severity),
        }
    }

    /// True if any warning is relevant
    #[must_use]
    pub const fn has_warnings(&self) -> bool {
        self.count > 0
    }

    /// Sensor state text
    #[must_use]
    pub fn state(&self) -> String {
        if self.has_warnings() {
            format!("Warnings: {}", self.count)
        } else {
            "No Warnings".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 26, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn active(category: WarningCategory, severity: WarningSeverity) -> Warning {
        Warning::new(
            category,
            severity,
            now() - TimeDelta::hours(1),
            now() + TimeDelta::hours(1),
        )
    }

    fn expired(category: WarningCategory, severity: WarningSeverity) -> Warning {
        Warning::new(
            category,
            severity,
            now() - TimeDelta::hours(3),
            now() - TimeDelta::hours(2),
        )
    }

    fn upcoming(category: WarningCategory, severity: WarningSeverity) -> Warning {
        Warning::new(
            category,
            severity,
            now() + TimeDelta::minutes(30),
            now() + TimeDelta::hours(3),
        )
    }

    #[test]
    fn alert_picks_first_most_severe() {
        let set = WarningSet::new(vec![
            active(WarningCategory::Heat, WarningSeverity::Moderate),
            active(WarningCategory::Heat, WarningSeverity::Severe),
            active(WarningCategory::Storm, WarningSeverity::Severe),
        ]);

        let alert = AlertProjection::from_warnings(&set, now(), LeadTime::zero());
        assert!(alert.is_on);
        assert_eq!(alert.event_type, Some(WarningCategory::Heat));
        assert_eq!(alert.event_level, Some(WarningSeverity::Severe));
    }

    #[test]
    fn alert_is_off_without_relevant_warnings() {
        let set = WarningSet::new(vec![expired(WarningCategory::Storm, WarningSeverity::Extreme)]);
        let alert = AlertProjection::from_warnings(&set, now(), LeadTime::zero());
        assert_eq!(alert, AlertProjection::off());
        assert_eq!(alert.attributes().len(), 1);
    }

    #[test]
    fn alert_attributes_use_host_names() {
        let set = WarningSet::new(vec![active(WarningCategory::BlackIce, WarningSeverity::Minor)]);
        let attrs = AlertProjection::from_warnings(&set, now(), LeadTime::zero()).attributes();
        assert_eq!(attrs.get("eventType").map(String::as_str), Some("black_ice"));
        assert_eq!(attrs.get("eventLevel").map(String::as_str), Some("minor"));
        assert_eq!(attrs.get("attribution").map(String::as_str), Some(ATTRIBUTION));
    }

    #[test]
    fn lead_time_applies_to_both_projections() {
        let set = WarningSet::new(vec![upcoming(WarningCategory::Thunderstorm, WarningSeverity::Severe)]);
        let one_hour = LeadTime::from_hours(1).expect("valid");

        assert!(!AlertProjection::from_warnings(&set, now(), LeadTime::zero()).is_on);
        assert!(AlertProjection::from_warnings(&set, now(), one_hour).is_on);

        assert_eq!(SummaryProjection::from_warnings(&set, now(), LeadTime::zero()).count, 0);
        assert_eq!(SummaryProjection::from_warnings(&set, now(), one_hour).count, 1);
    }

    #[test]
    fn summary_counts_relevant_only() {
        let set = WarningSet::new(vec![
            active(WarningCategory::Rain, WarningSeverity::Minor),
            expired(WarningCategory::Storm, WarningSeverity::Extreme),
            active(WarningCategory::Snow, WarningSeverity::Moderate),
        ]);

        let summary = SummaryProjection::from_warnings(&set, now(), LeadTime::zero());
        assert_eq!(summary.count, 2);
        assert_eq!(summary.top_category, Some(WarningCategory::Snow));
        assert_eq!(summary.top_severity, Some(WarningSeverity::Moderate));
        assert_eq!(summary.state(), "Warnings: 2");
    }

    #[test]
    fn summary_state_without_warnings() {
        let summary = SummaryProjection::from_warnings(&WarningSet::empty(), now(), LeadTime::zero());
        assert!(!summary.has_warnings());
        assert_eq!(summary.state(), "No Warnings");
        assert!(summary.top_category.is_none());
    }

    #[test]
    fn projections_serialize_for_hosts() {
        let set = WarningSet::new(vec![active(WarningCategory::Heat, WarningSeverity::Extreme)]);
        let alert = AlertProjection::from_warnings(&set, now(), LeadTime::zero());
        let json = serde_json::to_value(alert).expect("serialize");
        assert_eq!(json["is_on"], true);
        assert_eq!(json["event_type"], "heat");
        assert_eq!(json["event_level"], "extreme");
    }
}
