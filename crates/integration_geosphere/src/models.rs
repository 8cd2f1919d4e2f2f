//! Warning payload models
//!
//! Wire types for the `getWarningsForCoords` response and their mapping onto
//! domain warnings.

use chrono::{DateTime, Utc};
use domain::{DomainError, Warning, WarningCategory, WarningSet, WarningSeverity};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::GeosphereError;

/// Why a single warning record was dropped
#[derive(Debug, Error)]
pub enum RecordError {
    /// Record does not match the expected shape
    #[error("Schema mismatch: {0}")]
    Schema(#[from] serde_json::Error),

    /// Record carries a value outside the domain taxonomy
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of parsing a full response body
#[derive(Debug, Clone, Default)]
pub struct ParsedPayload {
    /// Successfully parsed warnings, in source order
    pub warnings: WarningSet,
    /// Number of records that were dropped
    pub rejected: usize,
}

/// Top-level response document
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    properties: Option<ApiProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiProperties {
    /// Kept raw so that one bad record cannot fail the whole batch
    #[serde(default)]
    warnings: Option<Vec<serde_json::Value>>,
}

/// One entry of `properties.warnings`
#[derive(Debug, Deserialize)]
struct RawWarningRecord {
    properties: RawWarningProperties,
}

#[derive(Debug, Deserialize)]
struct RawWarningProperties {
    rawinfo: RawInfo,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    auswirkungen: Option<String>,
    #[serde(default)]
    empfehlungen: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    wtype: i64,
    wlevel: i64,
    start: EpochSeconds,
    end: EpochSeconds,
}

/// Unix timestamp, sent either as a number or as a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EpochSeconds {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Whole seconds of a float timestamp, fraction discarded
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate_seconds(secs: f64) -> Option<i64> {
    let whole = secs.trunc();
    let in_range = whole >= i64::MIN as f64 && whole < i64::MAX as f64;
    (whole.is_finite() && in_range).then_some(whole as i64)
}

impl EpochSeconds {
    fn to_datetime(&self, field: &str) -> Result<DateTime<Utc>, DomainError> {
        let secs = match self {
            Self::Integer(secs) => *secs,
            Self::Float(secs) => truncate_seconds(*secs).ok_or_else(|| {
                DomainError::InvalidDateTime(format!("{field}: {secs} is not a timestamp"))
            })?,
            Self::Text(text) => text.trim().parse::<i64>().map_err(|e| {
                DomainError::InvalidDateTime(format!("{field}: '{text}' is not a timestamp ({e})"))
            })?,
        };

        DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| DomainError::InvalidDateTime(format!("{field}: {secs} out of range")))
    }
}

impl RawWarningRecord {
    fn into_warning(self) -> Result<Warning, DomainError> {
        let RawWarningProperties {
            rawinfo,
            text,
            auswirkungen,
            empfehlungen,
        } = self.properties;

        Ok(Warning {
            category: WarningCategory::from_code(rawinfo.wtype)?,
            severity: WarningSeverity::from_code(rawinfo.wlevel)?,
            valid_from: rawinfo.start.to_datetime("start")?,
            valid_until: rawinfo.end.to_datetime("end")?,
            description: text,
            effects: auswirkungen,
            recommendations: empfehlungen,
        })
    }
}

/// Parse a single warning record
///
/// # Errors
///
/// Returns a `RecordError` if the record is missing required fields, has
/// wrong types, unknown codes or unrepresentable timestamps.
fn parse_record(record: serde_json::Value) -> Result<Warning, RecordError> {
    let raw: RawWarningRecord = serde_json::from_value(record)?;
    Ok(raw.into_warning()?)
}

/// Parse a decoded response body into warnings
///
/// A missing `properties` or `properties.warnings` path is an empty result.
/// Records that fail to parse are dropped and logged; the rest are kept.
///
/// # Errors
///
/// Returns `GeosphereError::MalformedResponse` if the document itself does
/// not have the expected top-level shape.
pub fn parse_payload(payload: serde_json::Value) -> Result<ParsedPayload, GeosphereError> {
    if !payload.is_object() {
        return Err(GeosphereError::MalformedResponse(
            "Response is not a JSON object".to_string(),
        ));
    }

    let response: ApiResponse = serde_json::from_value(payload)
        .map_err(|e| GeosphereError::MalformedResponse(e.to_string()))?;

    let records = response
        .properties
        .and_then(|p| p.warnings)
        .unwrap_or_default();

    let total = records.len();
    let mut warnings = Vec::with_capacity(total);
    let mut rejected = 0;

    for (index, record) in records.into_iter().enumerate() {
        match parse_record(record) {
            Ok(warning) => warnings.push(warning),
            Err(e) => {
                rejected += 1;
                warn!(index, error = %e, "Dropping malformed warning record");
            },
        }
    }

    debug!(total, parsed = warnings.len(), rejected, "Parsed warning payload");

    Ok(ParsedPayload {
        warnings: WarningSet::new(warnings),
        rejected,
    })
}
