//! Warning severity value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Severity of a weather warning
///
/// Ordered ascending, so `Extreme` compares greatest. Upstream publishes the
/// level as a colour code:
/// - 1: yellow (Minor)
/// - 2: orange (Moderate)
/// - 3: red (Severe)
/// - 4: violet (Extreme)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Minor weather event (yellow)
    Minor,
    /// Moderate weather event (orange)
    Moderate,
    /// Severe weather event (red)
    Severe,
    /// Extreme weather event (violet)
    Extreme,
}

impl WarningSeverity {
    /// Convert from the upstream `wlevel` code
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSeverityCode` for anything outside 1-4.
    pub const fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Self::Minor),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Severe),
            4 => Ok(Self::Extreme),
            other => Err(DomainError::UnknownSeverityCode(other)),
        }
    }

    /// Upstream `wlevel` code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
            Self::Extreme => 4,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Minor => "Minor",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::Extreme => "Extreme",
        }
    }

    /// Warning colour used by the issuing service
    #[must_use]
    pub const fn colour(&self) -> &'static str {
        match self {
            Self::Minor => "yellow",
            Self::Moderate => "orange",
            Self::Severe => "red",
            Self::Extreme => "violet",
        }
    }

    /// Stable machine token, same as the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Extreme => "extreme",
        }
    }

    /// All severities in ascending order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Minor, Self::Moderate, Self::Severe, Self::Extreme]
    }
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<i64> for WarningSeverity {
    type Error = DomainError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
