//! Lead time value object
//!
//! How far into the future a not-yet-started warning still counts as relevant.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Non-negative lookahead window applied at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct LeadTime {
    /// Lookahead in whole minutes
    minutes: i64,
}

impl LeadTime {
    /// Largest accepted lead time (one year)
    pub const MAX_MINUTES: i64 = 366 * 24 * 60;

    /// No lookahead: only warnings active right now are relevant
    #[must_use]
    pub const fn zero() -> Self {
        Self { minutes: 0 }
    }

    /// Create a lead time from minutes
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeadTime` for negative values or values
    /// above [`Self::MAX_MINUTES`].
    pub fn from_minutes(minutes: i64) -> Result<Self, DomainError> {
        if minutes < 0 {
            return Err(DomainError::InvalidLeadTime(format!(
                "{minutes} minutes is negative"
            )));
        }
        if minutes > Self::MAX_MINUTES {
            return Err(DomainError::InvalidLeadTime(format!(
                "{minutes} minutes exceeds {} minutes",
                Self::MAX_MINUTES
            )));
        }
        Ok(Self { minutes })
    }

    /// Create a lead time from hours
    ///
    /// # Errors
    ///
    /// Same rules as [`Self::from_minutes`].
    pub fn from_hours(hours: i64) -> Result<Self, DomainError> {
        let minutes = hours
            .checked_mul(60)
            .ok_or_else(|| DomainError::InvalidLeadTime(format!("{hours} hours overflows")))?;
        Self::from_minutes(minutes)
    }

    /// Lead time in minutes
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Lead time as a chrono delta
    #[must_use]
    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::minutes(self.minutes)
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes)
    }
}

impl TryFrom<i64> for LeadTime {
    type Error = DomainError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<LeadTime> for i64 {
    fn from(lead_time: LeadTime) -> Self {
        lead_time.minutes
    }
}
