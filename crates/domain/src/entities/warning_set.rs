//! Warning set - The complete snapshot produced by one fetch cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Warning;
use crate::value_objects::LeadTime;

/// Ordered warnings exactly as received from the source
///
/// A set is built once per fetch cycle and replaced wholesale by the next
/// one. Order is not guaranteed to follow time or severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningSet {
    warnings: Vec<Warning>,
}

impl WarningSet {
    /// Create a set from warnings in source order
    #[must_use]
    pub const fn new(warnings: Vec<Warning>) -> Self {
        Self { warnings }
    }

    /// A set without warnings
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Number of warnings in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// True if the snapshot holds no warnings
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// True if the source reported any warning at all, relevant or not
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.is_empty()
    }

    /// Iterate warnings in source order
    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.warnings.iter()
    }

    /// Warnings as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Warning] {
        &self.warnings
    }

    /// Warnings relevant at `now` with the given lookahead, in source order
    #[must_use]
    pub fn relevant(&self, now: DateTime<Utc>, lead_time: LeadTime) -> Vec<&Warning> {
        self.warnings
            .iter()
            .filter(|w| w.is_relevant(now, lead_time))
            .collect()
    }
}

impl From<Vec<Warning>> for WarningSet {
    fn from(warnings: Vec<Warning>) -> Self {
        Self::new(warnings)
    }
}

impl FromIterator<Warning> for WarningSet {
    fn from_iter<I: IntoIterator<Item = Warning>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WarningSet {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}

/// Pick the warning with the highest severity
///
/// Ties go to the earliest warning in iteration order. Returns `None` for
/// an empty input.
pub fn highest_severity<'a, I>(warnings: I) -> Option<&'a Warning>
where
    I: IntoIterator<Item = &'a Warning>,
{
    warnings.into_iter().fold(None, |best, candidate| match best {
        Some(current) if current.severity >= candidate.severity => Some(current),
        _ => Some(candidate),
    })
}
