//! FRED historical fetch tool.
//!
//! Pulls several years of a series in chronological order and condenses it
//! into a short summary with a handful of sample points.

use chrono::{Months, NaiveDate, Utc};
use rmcp::handler::server::tool::{ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::fred::models::DATE_FORMAT;
use crate::domains::fred::request::MAX_OBSERVATIONS;
use crate::domains::fred::{
    AggregationMethod, FredClient, FredError, FredResult, Frequency, ObservationsQuery,
    ObservationsResponse, SortOrder,
};

use super::common::{
    error_result, format_observation, format_observation_table, fred_error_result,
    normalize_series_id, parse_params, route, sample_indices, success_result,
};

const MAX_YEARS: i64 = 100;
const SAMPLE_POINTS: usize = 5;

/// Parameters for the historical fetch.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFredHistoricalParams {
    #[schemars(description = "FRED series ID")]
    pub series_id: String,

    #[schemars(description = "Number of years back from today (default: 10, max: 100)")]
    #[serde(default = "default_years")]
    pub years: i64,

    #[schemars(description = "Aggregate to this frequency using averages: d, w, bw, m, q, sa, a (optional)")]
    #[serde(default)]
    pub frequency: Option<Frequency>,
}

fn default_years() -> i64 {
    10
}

/// FRED historical fetch tool implementation.
#[derive(Debug, Clone)]
pub struct GetFredHistoricalTool;

impl GetFredHistoricalTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_fred_historical";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a condensed multi-year history of a FRED series: \
         first and last observation, observation count and evenly spaced sample points. \
         Series that start later than the requested range simply return fewer points.";

    /// Execute the tool logic relative to today's date.
    pub async fn execute(params: &GetFredHistoricalParams, client: &FredClient) -> CallToolResult {
        Self::execute_as_of(params, client, Utc::now().date_naive()).await
    }

    /// Execute the tool logic relative to `today`.
    #[instrument(skip_all, fields(series_id = %params.series_id, years = params.years))]
    pub async fn execute_as_of(
        params: &GetFredHistoricalParams,
        client: &FredClient,
        today: NaiveDate,
    ) -> CallToolResult {
        info!("Fetching FRED historical data");

        let query = match Self::build_query(params, today) {
            Ok(q) => q,
            Err(e) => return fred_error_result(&e),
        };

        match client.observations(&query).await {
            Ok(response) => success_result(Self::format_report(&query, params.years, &response)),
            Err(e) => fred_error_result(&e),
        }
    }

    /// Decode arguments and execute.
    pub async fn call(args: JsonObject, client: &FredClient) -> CallToolResult {
        match parse_params::<GetFredHistoricalParams>(args) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => error_result(&e.to_string()),
        }
    }

    fn build_query(params: &GetFredHistoricalParams, today: NaiveDate) -> FredResult<ObservationsQuery> {
        let series_id = normalize_series_id("series_id", &params.series_id)?;

        if !(1..=MAX_YEARS).contains(&params.years) {
            return Err(FredError::validation(
                "years",
                format!("must be between 1 and {}, got {}", MAX_YEARS, params.years),
            ));
        }

        let months = Months::new(params.years as u32 * 12);
        let start = today
            .checked_sub_months(months)
            .ok_or_else(|| FredError::validation("years", "start date out of range"))?;

        Ok(ObservationsQuery {
            series_id,
            limit: Some(MAX_OBSERVATIONS),
            sort_order: SortOrder::Ascending,
            observation_start: Some(start),
            observation_end: Some(today),
            frequency: params.frequency,
            aggregation_method: params.frequency.map(|_| AggregationMethod::Avg),
        })
    }

    fn format_report(query: &ObservationsQuery, years: i64, response: &ObservationsResponse) -> String {
        let range = match (query.observation_start, query.observation_end) {
            (Some(start), Some(end)) => format!(
                "{} to {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
            _ => "full history".to_string(),
        };

        let mut report = format!(
            "Historical data for {} ({} years, {})\n",
            query.series_id, years, range
        );

        let observations = &response.observations;
        let (Some(first), Some(last)) = (observations.first(), observations.last()) else {
            report.push_str("No observations available in the requested range.");
            return report;
        };

        report.push_str(&format!("Observations: {}\n", observations.len()));

        let missing = observations.iter().filter(|o| o.value.is_missing()).count();
        if missing > 0 {
            report.push_str(&format!("Missing values: {}\n", missing));
        }

        let samples: Vec<_> = sample_indices(observations.len(), SAMPLE_POINTS)
            .into_iter()
            .map(|i| observations[i].clone())
            .collect();

        report.push_str(&format!(
            "First: {}\nLast: {}\nSample points:\n{}",
            format_observation(first),
            format_observation(last),
            format_observation_table(&samples)
        ));
        report
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetFredHistoricalParams>(),
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
