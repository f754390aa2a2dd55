//! FRED single-series fetch tool.
//!
//! Returns the most recent observations of one series, newest first.

use rmcp::model::{CallToolResult, JsonObject, Tool};
use rmcp::handler::server::tool::{ToolRoute, cached_schema_for_type};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::fred::request::MAX_OBSERVATIONS;
use crate::domains::fred::{
    AggregationMethod, FredClient, FredError, FredResult, Frequency, ObservationsQuery,
    ObservationsResponse,
};

use super::common::{
    error_result, format_observation, format_observation_table, fred_error_result,
    normalize_series_id, parse_date, parse_params, route, success_result, validate_limit,
};

/// Parameters for the single-series fetch.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFredDataParams {
    /// FRED series ID.
    #[schemars(description = "FRED series ID (e.g., GDP, UNRATE, FEDFUNDS)")]
    pub series_id: String,

    /// Number of observations to return.
    #[schemars(description = "Number of most recent observations (default: 10, max: 100000)")]
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[schemars(description = "Start date in YYYY-MM-DD format (optional)")]
    #[serde(default)]
    pub start_date: Option<String>,

    #[schemars(description = "End date in YYYY-MM-DD format (optional)")]
    #[serde(default)]
    pub end_date: Option<String>,

    #[schemars(description = "Data frequency: d, w, bw, m, q, sa, a (optional)")]
    #[serde(default)]
    pub frequency: Option<Frequency>,

    #[schemars(description = "Aggregation method: avg, sum, eop (end of period)")]
    #[serde(default)]
    pub aggregation_method: Option<AggregationMethod>,
}

fn default_limit() -> usize {
    10
}

/// FRED single-series fetch tool implementation.
#[derive(Debug, Clone)]
pub struct GetFredDataTool;

impl GetFredDataTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_fred_data";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the most recent observations of a FRED economic series by ID. \
         Returns the latest value and a table of recent observations, newest first. \
         Missing data points are shown as N/A. Optional date range, frequency and aggregation.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(series_id = %params.series_id, limit = params.limit))]
    pub async fn execute(params: &GetFredDataParams, client: &FredClient) -> CallToolResult {
        info!("Fetching FRED series data");

        let query = match Self::build_query(params) {
            Ok(q) => q,
            Err(e) => return fred_error_result(&e),
        };

        match client.observations(&query).await {
            Ok(response) => success_result(Self::format_report(&query, &response)),
            Err(e) => fred_error_result(&e),
        }
    }

    /// Decode arguments and execute.
    pub async fn call(args: JsonObject, client: &FredClient) -> CallToolResult {
        match parse_params::<GetFredDataParams>(args) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => error_result(&e.to_string()),
        }
    }

    fn build_query(params: &GetFredDataParams) -> FredResult<ObservationsQuery> {
        let series_id = normalize_series_id("series_id", &params.series_id)?;
        let start = parse_date("start_date", params.start_date.as_deref())?;
        let end = parse_date("end_date", params.end_date.as_deref())?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(FredError::validation(
                    "start_date",
                    "must not be after end_date",
                ));
            }
        }

        Ok(ObservationsQuery {
            observation_start: start,
            observation_end: end,
            frequency: params.frequency,
            aggregation_method: params.aggregation_method,
            ..ObservationsQuery::latest(series_id, validate_limit(params.limit, MAX_OBSERVATIONS))
        })
    }

    fn format_report(query: &ObservationsQuery, response: &ObservationsResponse) -> String {
        let observations = &response.observations;
        let Some(latest) = observations.first() else {
            return format!("Series: {}\nLatest: no observations returned", query.series_id);
        };

        format!(
            "Series: {}\nLatest: {}\nObservations ({}, most recent first):\n{}",
            query.series_id,
            format_observation(latest),
            observations.len(),
            format_observation_table(observations)
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetFredDataParams>(),
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
