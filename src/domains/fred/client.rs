//! FRED API client: request building and response normalization.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::FredConfig;

use super::error::{FredError, FredResult};
use super::models::{ObservationsResponse, SeriesInfo, SeriesResponse, UpstreamErrorBody};
use super::request::{API_KEY_PARAM, Endpoint, FredRequest, ObservationsQuery};
use super::transport::{FredTransport, HttpResponse, ReqwestTransport};

/// Series fetched to check connectivity at startup.
const CONNECTIVITY_SERIES: &str = "GDP";

/// Client for the FRED API.
///
/// Holds the API key and base URL read from configuration and the injected
/// transport. It keeps no state between calls.
#[derive(Clone)]
pub struct FredClient {
    base_url: String,
    api_key: Option<String>,
    transport: Arc<dyn FredTransport>,
}

impl FredClient {
    /// Create a client with an explicit transport.
    pub fn new(config: &FredConfig, transport: Arc<dyn FredTransport>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            transport,
        }
    }

    /// Create a client backed by [`ReqwestTransport`].
    pub fn from_config(config: &FredConfig) -> FredResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fail with a configuration error when no API key is set.
    pub fn ensure_configured(&self) -> FredResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(FredError::missing_api_key)
    }

    /// Build a request for `endpoint`, appending the API key and the JSON
    /// format selector to `params`.
    pub fn build_request(
        &self,
        endpoint: Endpoint,
        params: Vec<(&'static str, String)>,
    ) -> FredResult<FredRequest> {
        let api_key = self.ensure_configured()?;

        let mut query: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        query.push((API_KEY_PARAM.to_string(), api_key.to_string()));
        query.push(("file_type".to_string(), "json".to_string()));

        Ok(FredRequest::new(&self.base_url, endpoint, query))
    }

    /// Fetch observations for one series.
    pub async fn observations(&self, query: &ObservationsQuery) -> FredResult<ObservationsResponse> {
        let request = self.build_request(Endpoint::SeriesObservations, query.to_params())?;
        self.send(&request).await
    }

    /// Fetch metadata for one series.
    pub async fn series(&self, series_id: &str) -> FredResult<SeriesInfo> {
        let request = self.build_request(Endpoint::Series, vec![("series_id", series_id.to_string())])?;
        let response: SeriesResponse = self.send(&request).await?;
        response
            .seriess
            .into_iter()
            .next()
            .ok_or_else(|| FredError::upstream(404, format!("Series '{}' not found", series_id)))
    }

    /// Full-text series search, ranked by popularity.
    pub async fn search(&self, text: &str, limit: usize) -> FredResult<SeriesResponse> {
        let request = self.build_request(
            Endpoint::SeriesSearch,
            vec![
                ("search_text", text.to_string()),
                ("limit", limit.to_string()),
                ("order_by", "popularity".to_string()),
                ("sort_order", "desc".to_string()),
            ],
        )?;
        self.send(&request).await
    }

    /// Check that the API answers with the configured key.
    pub async fn check_connectivity(&self) -> FredResult<()> {
        self.series(CONNECTIVITY_SERIES).await.map(|_| ())
    }

    /// Send a request and decode the body, mapping FRED error payloads and
    /// unreadable bodies onto the error taxonomy.
    async fn send<T: DeserializeOwned>(&self, request: &FredRequest) -> FredResult<T> {
        debug!(
            "FRED request: {} ?{}",
            request.endpoint().path(),
            request.redacted_query()
        );

        let response = self.transport.get(request).await?;
        decode_response(&response)
    }
}

fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> FredResult<T> {
    if let Ok(upstream) = serde_json::from_str::<UpstreamErrorBody>(&response.body) {
        warn!(
            "FRED returned error {}: {}",
            upstream.error_code, upstream.error_message
        );
        return Err(FredError::upstream(
            upstream.error_code,
            upstream.error_message,
        ));
    }

    if !response.is_success() {
        warn!("FRED returned HTTP {}", response.status);
        return Err(FredError::upstream(
            i64::from(response.status),
            format!("HTTP status {}", response.status),
        ));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        warn!("Failed to decode FRED response: {}", e);
        FredError::transport("malformed response from FRED API")
    })
}
