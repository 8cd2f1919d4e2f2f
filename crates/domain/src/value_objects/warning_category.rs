//! Warning category value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Kind of weather event a warning is issued for
///
/// Purely descriptive, no ordering. Codes follow the upstream `wtype` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    /// Wind (1)
    Storm,
    /// Rain (2)
    Rain,
    /// Snow (3)
    Snow,
    /// Ice and glaze (4)
    BlackIce,
    /// Thunderstorm (5)
    Thunderstorm,
    /// Heat (6)
    Heat,
    /// Cold (7)
    Cold,
}

impl WarningCategory {
    /// Convert from the upstream `wtype` code
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCategoryCode` for anything outside 1-7.
    pub const fn from_code(code: i64) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Self::Storm),
            2 => Ok(Self::Rain),
            3 => Ok(Self::Snow),
            4 => Ok(Self::BlackIce),
            5 => Ok(Self::Thunderstorm),
            6 => Ok(Self::Heat),
            7 => Ok(Self::Cold),
            other => Err(DomainError::UnknownCategoryCode(other)),
        }
    }

    /// Upstream `wtype` code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Storm => 1,
            Self::Rain => 2,
            Self::Snow => 3,
            Self::BlackIce => 4,
            Self::Thunderstorm => 5,
            Self::Heat => 6,
            Self::Cold => 7,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Storm => "Storm",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::BlackIce => "Black ice",
            Self::Thunderstorm => "Thunderstorm",
            Self::Heat => "Heat",
            Self::Cold => "Cold",
        }
    }

    /// Stable machine token, same as the serialized form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Storm => "storm",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::BlackIce => "black_ice",
            Self::Thunderstorm => "thunderstorm",
            Self::Heat => "heat",
            Self::Cold => "cold",
        }
    }

    /// All categories in code order
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Storm,
            Self::Rain,
            Self::Snow,
            Self::BlackIce,
            Self::Thunderstorm,
            Self::Heat,
            Self::Cold,
        ]
    }
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<i64> for WarningCategory {
    type Error = DomainError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
