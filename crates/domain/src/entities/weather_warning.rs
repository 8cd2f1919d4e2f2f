//! Warning entity - A single severe-weather advisory and its relevance rule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{LeadTime, WarningCategory, WarningSeverity};

/// A severe-weather warning issued for a location
///
/// `valid_from <= valid_until` is expected from upstream but not enforced;
/// [`Warning::is_relevant`] checks both bounds independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Kind of weather event
    pub category: WarningCategory,
    /// Warning level
    pub severity: WarningSeverity,
    /// Start of the warning period (UTC)
    pub valid_from: DateTime<Utc>,
    /// End of the warning period (UTC)
    pub valid_until: DateTime<Utc>,
    /// Free-text description of the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expected effects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<String>,
    /// Recommended behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
}

impl Warning {
    /// Create a warning without any free-text fields
    #[must_use]
    pub const fn new(
        category: WarningCategory,
        severity: WarningSeverity,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            severity,
            valid_from,
            valid_until,
            description: None,
            effects: None,
            recommendations: None,
        }
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an effects text
    #[must_use]
    pub fn with_effects(mut self, effects: impl Into<String>) -> Self {
        self.effects = Some(effects.into());
        self
    }

    /// Attach recommendations
    #[must_use]
    pub fn with_recommendations(mut self, recommendations: impl Into<String>) -> Self {
        self.recommendations = Some(recommendations.into());
        self
    }

    /// Whether this warning matters at `now` given a lookahead of `lead_time`
    ///
    /// Not relevant once `valid_until < now`, or while `valid_from` lies
    /// beyond `now + lead_time`. Both comparisons are strict, so a warning
    /// ending exactly at `now` and one starting exactly at the horizon are
    /// still relevant.
    #[must_use]
    pub fn is_relevant(&self, now: DateTime<Utc>, lead_time: LeadTime) -> bool {
        if self.valid_until < now {
            return false;
        }

        let horizon = now
            .checked_add_signed(lead_time.as_time_delta())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.valid_from <= horizon
    }
}
