//! FRED response models and query option types.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder FRED uses in place of a value when there is no data for a date.
pub const MISSING_VALUE_SENTINEL: &str = ".";

/// Date format used by FRED for observation dates and date parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Observations
// ============================================================================

/// The value of a single observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationValue {
    Number(f64),
    /// The upstream missing-value sentinel.
    Missing,
    /// Anything else that does not parse as a number.
    Malformed(String),
}

impl ObservationValue {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == MISSING_VALUE_SENTINEL {
            return Self::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Number(v),
            _ => Self::Malformed(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for ObservationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Missing => f.write_str("N/A"),
            Self::Malformed(raw) => write!(f, "invalid value '{}'", raw),
        }
    }
}

/// The date of a single observation.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservationDate {
    Valid(NaiveDate),
    Malformed(String),
}

impl ObservationDate {
    pub fn parse(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Self::Valid(date),
            Err(_) => Self::Malformed(raw.to_string()),
        }
    }
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Malformed(raw) => write!(f, "invalid date '{}'", raw),
        }
    }
}

/// One (date, value) data point of a series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawObservation")]
pub struct Observation {
    pub date: ObservationDate,
    pub value: ObservationValue,
}

#[derive(Deserialize)]
struct RawObservation {
    #[serde(default)]
    date: String,
    #[serde(default)]
    value: String,
}

impl From<RawObservation> for Observation {
    fn from(raw: RawObservation) -> Self {
        Self {
            date: ObservationDate::parse(&raw.date),
            value: ObservationValue::parse(&raw.value),
        }
    }
}

/// Body of a `series/observations` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsResponse {
    #[serde(default)]
    pub count: Option<u64>,
    pub observations: Vec<Observation>,
}

// ============================================================================
// Series metadata and search
// ============================================================================

/// Metadata for one series, as returned by `series` and `series/search`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesInfo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub seasonal_adjustment: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub observation_start: Option<String>,
    #[serde(default)]
    pub observation_end: Option<String>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of a `series` or `series/search` response. FRED really does spell
/// the list `seriess`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesResponse {
    #[serde(default)]
    pub count: Option<u64>,
    pub seriess: Vec<SeriesInfo>,
}

/// Error payload FRED sends instead of a result.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamErrorBody {
    pub error_code: i64,
    #[serde(default)]
    pub error_message: String,
}

// ============================================================================
// Query options
// ============================================================================

/// Ordering of returned observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Frequency to aggregate observations to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum Frequency {
    /// Daily
    D,
    /// Weekly
    W,
    /// Biweekly
    Bw,
    /// Monthly
    M,
    /// Quarterly
    Q,
    /// Semiannual
    Sa,
    /// Annual
    A,
}

impl Frequency {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::D => "d",
            Self::W => "w",
            Self::Bw => "bw",
            Self::M => "m",
            Self::Q => "q",
            Self::Sa => "sa",
            Self::A => "a",
        }
    }
}

/// How observations are combined when a lower frequency is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[schemars(rename_all = "lowercase")]
pub enum AggregationMethod {
    /// Average
    Avg,
    /// Sum
    Sum,
    /// End of period
    Eop,
}

impl AggregationMethod {
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Avg => "avg",
            Self::Sum => "sum",
            Self::Eop => "eop",
        }
    }
}
