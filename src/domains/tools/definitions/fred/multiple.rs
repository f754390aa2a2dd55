//! FRED multi-series comparison tool.

use chrono::NaiveDate;
use rmcp::handler::server::tool::{ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::fred::{
    FredClient, FredError, FredResult, Frequency, Observation, ObservationsQuery,
};

use super::common::{
    BatchEntry, error_result, fetch_all, format_observation_table, fred_error_result,
    normalize_series_id, parse_date, parse_params, route, success_result, validate_limit,
};

const MAX_SERIES: usize = 10;
const MAX_LIMIT: usize = 100;

/// Parameters for the multi-series comparison.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMultipleSeriesParams {
    #[schemars(description = "List of FRED series IDs (1 to 10)")]
    pub series_ids: Vec<String>,

    #[schemars(description = "Observations per series, most recent first (default: 5, max: 100)")]
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[schemars(description = "Start date in YYYY-MM-DD format (optional)")]
    #[serde(default)]
    pub start_date: Option<String>,

    #[schemars(description = "Data frequency: d, w, bw, m, q, sa, a (optional)")]
    #[serde(default)]
    pub frequency: Option<Frequency>,
}

fn default_limit() -> usize {
    5
}

/// Validated request shared by every series in the batch.
struct Comparison {
    series_ids: Vec<String>,
    limit: usize,
    start: Option<NaiveDate>,
    frequency: Option<Frequency>,
}

/// FRED multi-series comparison tool implementation.
#[derive(Debug, Clone)]
pub struct GetMultipleSeriesTool;

impl GetMultipleSeriesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_multiple_series";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get recent observations for several FRED series at once for comparison. \
         Series are reported in the order given; a series that fails to load is reported inline \
         without affecting the others.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(count = params.series_ids.len()))]
    pub async fn execute(params: &GetMultipleSeriesParams, client: &FredClient) -> CallToolResult {
        let comparison = match Self::validate(params) {
            Ok(c) => c,
            Err(e) => return fred_error_result(&e),
        };
        if let Err(e) = client.ensure_configured() {
            return fred_error_result(&e);
        }

        info!("Fetching multiple FRED series");

        let entries = fetch_all(&comparison.series_ids, |series_id| {
            Self::fetch(client, &comparison, series_id)
        })
        .await;

        success_result(Self::format_report(&comparison, &entries))
    }

    /// Decode arguments and execute.
    pub async fn call(args: JsonObject, client: &FredClient) -> CallToolResult {
        match parse_params::<GetMultipleSeriesParams>(args) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => error_result(&e.to_string()),
        }
    }

    fn validate(params: &GetMultipleSeriesParams) -> FredResult<Comparison> {
        if params.series_ids.is_empty() {
            return Err(FredError::validation("series_ids", "must not be empty"));
        }
        if params.series_ids.len() > MAX_SERIES {
            return Err(FredError::validation(
                "series_ids",
                format!(
                    "at most {} series allowed, got {}",
                    MAX_SERIES,
                    params.series_ids.len()
                ),
            ));
        }

        let series_ids = params
            .series_ids
            .iter()
            .map(|id| normalize_series_id("series_ids", id))
            .collect::<FredResult<Vec<_>>>()?;

        Ok(Comparison {
            series_ids,
            limit: validate_limit(params.limit, MAX_LIMIT),
            start: parse_date("start_date", params.start_date.as_deref())?,
            frequency: params.frequency,
        })
    }

    async fn fetch(
        client: &FredClient,
        comparison: &Comparison,
        series_id: String,
    ) -> FredResult<Vec<Observation>> {
        let query = ObservationsQuery {
            observation_start: comparison.start,
            frequency: comparison.frequency,
            ..ObservationsQuery::latest(series_id, comparison.limit)
        };
        Ok(client.observations(&query).await?.observations)
    }

    fn format_report(comparison: &Comparison, entries: &[BatchEntry<Vec<Observation>>]) -> String {
        let sections: Vec<String> = entries
            .iter()
            .map(|entry| {
                let body = match &entry.outcome {
                    Ok(observations) if observations.is_empty() => {
                        "  no observations returned".to_string()
                    }
                    Ok(observations) => format_observation_table(observations),
                    Err(e) => {
                        warn!(series_id = %entry.key, "Series fetch failed: {}", e);
                        format!("  error: {}", e)
                    }
                };
                format!("== {} ==\n{}", entry.key, body)
            })
            .collect();

        format!(
            "Series comparison ({} series, latest {} observations each)\n\n{}",
            entries.len(),
            comparison.limit,
            sections.join("\n\n")
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetMultipleSeriesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp router.
    pub fn create_route<S>(client: Arc<FredClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        route(Self::to_tool(), client, |args, client| async move {
            Self::call(args, &client).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::fred::Endpoint;
    use crate::domains::fred::transport::stub::{StubTransport, observations_body};
    use crate::domains::tools::definitions::fred::common::test_support::{
        is_error, result_text, stub_client, stub_client_with_key,
    };
    use std::time::Duration;

    fn params(ids: &[&str]) -> GetMultipleSeriesParams {
        GetMultipleSeriesParams {
            series_ids: ids.iter().map(|s| s.to_string()).collect(),
            limit: 2,
            start_date: None,
            frequency: None,
        }
    }

    fn stub() -> StubTransport {
        StubTransport::new()
            .with_json(
                Endpoint::SeriesObservations,
                "GDP",
                observations_body(&[("2024-04-01", "28652.337"), ("2024-01-01", "28269.174")]),
            )
            .with_json(
                Endpoint::SeriesObservations,
                "UNRATE",
                observations_body(&[("2024-09-01", "4.1"), ("2024-08-01", "4.2")]),
            )
    }

    #[tokio::test]
    async fn test_order_preserved_despite_latency() {
        let slow_gdp = stub().with_delay(
            Endpoint::SeriesObservations,
            "GDP",
            Duration::from_millis(50),
        );
        let (_, client) = stub_client(slow_gdp);

        let result = GetMultipleSeriesTool::execute(&params(&["GDP", "UNRATE"]), &client).await;

        assert!(!is_error(&result));
        assert_eq!(
            result_text(&result),
            "Series comparison (2 series, latest 2 observations each)\n\n\
             == GDP ==\n  \
             2024-04-01  28652.337\n  \
             2024-01-01  28269.174\n\n\
             == UNRATE ==\n  \
             2024-09-01  4.1\n  \
             2024-08-01  4.2"
        );
    }

    #[tokio::test]
    async fn test_bad_series_reported_inline() {
        let (stub, client) = stub_client(stub());

        let result =
            GetMultipleSeriesTool::execute(&params(&["gdp", "BOGUS", "unrate"]), &client).await;
        let text = result_text(&result);

        assert!(!is_error(&result));
        assert!(text.contains(
            "== BOGUS ==\n  error: FRED API error 400: Bad Request.  The series does not exist."
        ));
        assert!(text.contains("== GDP ==\n  2024-04-01  28652.337"));
        assert!(text.contains("== UNRATE ==\n  2024-09-01  4.1"));
        assert_eq!(stub.call_count(), 3);
    }

    #[tokio::test]
    async fn test_list_bounds_validated_without_call() {
        let too_many: Vec<String> = (0..11).map(|i| format!("S{}", i)).collect();
        let too_many: Vec<&str> = too_many.iter().map(String::as_str).collect();

        for ids in [&[][..], &too_many[..], &["GDP", " "][..]] {
            let (stub, client) = stub_client(stub());

            let result = GetMultipleSeriesTool::execute(&params(ids), &client).await;

            assert!(is_error(&result));
            assert!(result_text(&result).starts_with("Invalid parameter 'series_ids'"));
            assert_eq!(stub.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_missing_key_aborts() {
        let (stub, client) = stub_client_with_key(stub(), None);

        let result = GetMultipleSeriesTool::execute(&params(&["GDP"]), &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("Configuration error"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_shared_options_forwarded() {
        let (stub, client) = stub_client(stub());
        let params = GetMultipleSeriesParams {
            start_date: Some("2020-01-01".to_string()),
            frequency: Some(Frequency::Q),
            ..params(&["GDP", "UNRATE"])
        };

        GetMultipleSeriesTool::execute(&params, &client).await;

        for request in stub.calls() {
            assert_eq!(request.param("observation_start"), Some("2020-01-01"));
            assert_eq!(request.param("frequency"), Some("q"));
            assert_eq!(request.param("sort_order"), Some("desc"));
            assert_eq!(request.param("limit"), Some("2"));
        }
    }
}
