//! Request descriptors for the FRED API.

use chrono::NaiveDate;
use std::fmt;

use super::models::{AggregationMethod, DATE_FORMAT, Frequency, SortOrder};

/// Default FRED API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "api_key";

/// Upper bound FRED accepts for `limit` on observation requests.
pub const MAX_OBSERVATIONS: usize = 100_000;

/// The read-only FRED endpoints this server uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SeriesObservations,
    Series,
    SeriesSearch,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::SeriesObservations => "series/observations",
            Self::Series => "series",
            Self::SeriesSearch => "series/search",
        }
    }
}

/// A fully built request: URL plus query parameters, API key included.
#[derive(Clone, PartialEq)]
pub struct FredRequest {
    base_url: String,
    endpoint: Endpoint,
    query: Vec<(String, String)>,
}

impl FredRequest {
    pub(crate) fn new(base_url: &str, endpoint: Endpoint, query: Vec<(String, String)>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint,
            query,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Endpoint URL without the query string.
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.endpoint.path())
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Look up a query parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Query string with the API key replaced, safe for logs.
    pub fn redacted_query(&self) -> String {
        let redacted: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| {
                if k == API_KEY_PARAM {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        serde_urlencoded::to_string(redacted).unwrap_or_default()
    }
}

/// Custom Debug implementation to redact the API key from logs.
impl fmt::Debug for FredRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FredRequest")
            .field("url", &self.url())
            .field("query", &self.redacted_query())
            .finish()
    }
}

/// Parameters of a `series/observations` request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationsQuery {
    pub series_id: String,
    pub limit: Option<usize>,
    pub sort_order: SortOrder,
    pub observation_start: Option<NaiveDate>,
    pub observation_end: Option<NaiveDate>,
    pub frequency: Option<Frequency>,
    pub aggregation_method: Option<AggregationMethod>,
}

impl ObservationsQuery {
    pub fn new(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            ..Default::default()
        }
    }

    /// The most recent `limit` observations, newest first.
    pub fn latest(series_id: impl Into<String>, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            sort_order: SortOrder::Descending,
            ..Self::new(series_id)
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("series_id", self.series_id.clone()),
            ("sort_order", self.sort_order.as_param().to_string()),
        ];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.min(MAX_OBSERVATIONS).to_string()));
        }
        if let Some(start) = self.observation_start {
            params.push(("observation_start", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.observation_end {
            params.push(("observation_end", end.format(DATE_FORMAT).to_string()));
        }
        if let Some(frequency) = self.frequency {
            params.push(("frequency", frequency.as_param().to_string()));
        }
        if let Some(method) = self.aggregation_method {
            params.push(("aggregation_method", method.as_param().to_string()));
        }
        params
    }
}
