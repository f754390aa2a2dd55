//! FRED series metadata tool.

use rmcp::handler::server::tool::{ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::fred::{FredClient, SeriesInfo};

use super::common::{
    error_result, fred_error_result, normalize_series_id, parse_params, route, success_result,
};

/// Notes longer than this are cut with an ellipsis.
const MAX_NOTES_CHARS: usize = 500;

/// Parameters for the metadata lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFredSeriesInfoParams {
    #[schemars(description = "FRED series ID (e.g., GDP, UNRATE)")]
    pub series_id: String,
}

/// FRED series metadata tool implementation.
#[derive(Debug, Clone)]
pub struct GetFredSeriesInfoTool;

impl GetFredSeriesInfoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_fred_series_info";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get metadata for a FRED series: title, units, frequency, \
         seasonal adjustment, last update, available date range and notes.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(series_id = %params.series_id))]
    pub async fn execute(params: &GetFredSeriesInfoParams, client: &FredClient) -> CallToolResult {
        let series_id = match normalize_series_id("series_id", &params.series_id) {
            Ok(id) => id,
            Err(e) => return fred_error_result(&e),
        };

        info!("Fetching FRED series metadata");

        match client.series(&series_id).await {
            Ok(info) => success_result(Self::format_report(&info)),
            Err(e) => fred_error_result(&e),
        }
    }

    /// Decode arguments and execute.
    pub async fn call(args: JsonObject, client: &FredClient) -> CallToolResult {
        match parse_params::<GetFredSeriesInfoParams>(args) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => error_result(&e.to_string()),
        }
    }

    fn format_report(info: &SeriesInfo) -> String {
        let mut lines = vec![format!(
            "Series: {} - {}",
            info.id,
            info.title.as_deref().unwrap_or("Untitled")
        )];

        let fields = [
            ("Units", &info.units),
            ("Frequency", &info.frequency),
            ("Seasonal adjustment", &info.seasonal_adjustment),
            ("Last updated", &info.last_updated),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{}: {}", label, value));
            }
        }

        if let (Some(start), Some(end)) = (&info.observation_start, &info.observation_end) {
            lines.push(format!("Observation range: {} to {}", start, end));
        }
        if let Some(popularity) = info.popularity {
            lines.push(format!("Popularity: {}", popularity));
        }
        if let Some(notes) = info.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            lines.push(format!("Notes: {}", truncate_chars(notes, MAX_NOTES_CHARS)));
        }

        lines.join("\n")
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetFredSeriesInfoParams>(),
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

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::fred::Endpoint;
    use crate::domains::fred::transport::stub::StubTransport;
    use crate::domains::tools::definitions::fred::common::test_support::{
        is_error, result_text, stub_client, stub_client_with_key,
    };

    fn params(series_id: &str) -> GetFredSeriesInfoParams {
        GetFredSeriesInfoParams {
            series_id: series_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_metadata_report() {
        let stub = StubTransport::new().with_json(
            Endpoint::Series,
            "UNRATE",
            serde_json::json!({
                "seriess": [{
                    "id": "UNRATE",
                    "title": "Unemployment Rate",
                    "units": "Percent",
                    "frequency": "Monthly",
                    "seasonal_adjustment": "Seasonally Adjusted",
                    "last_updated": "2024-10-04 07:48:02-05",
                    "observation_start": "1948-01-01",
                    "observation_end": "2024-09-01",
                    "popularity": 94,
                    "notes": "  The unemployment rate represents the number of unemployed as a percentage of the labor force.  "
                }]
            }),
        );
        let (stub, client) = stub_client(stub);

        let result = GetFredSeriesInfoTool::execute(&params(" unrate"), &client).await;

        assert!(!is_error(&result));
        assert_eq!(
            result_text(&result),
            "Series: UNRATE - Unemployment Rate\n\
             Units: Percent\n\
             Frequency: Monthly\n\
             Seasonal adjustment: Seasonally Adjusted\n\
             Last updated: 2024-10-04 07:48:02-05\n\
             Observation range: 1948-01-01 to 2024-09-01\n\
             Popularity: 94\n\
             Notes: The unemployment rate represents the number of unemployed as a percentage of the labor force."
        );
        assert_eq!(stub.calls()[0].param("series_id"), Some("UNRATE"));
    }

    #[tokio::test]
    async fn test_sparse_metadata() {
        let stub = StubTransport::new().with_json(
            Endpoint::Series,
            "X",
            serde_json::json!({ "seriess": [{ "id": "X" }] }),
        );
        let (_, client) = stub_client(stub);

        let result = GetFredSeriesInfoTool::execute(&params("x"), &client).await;

        assert_eq!(result_text(&result), "Series: X - Untitled");
    }

    #[tokio::test]
    async fn test_unknown_series_is_error() {
        let (_, client) = stub_client(StubTransport::new());

        let result = GetFredSeriesInfoTool::execute(&params("NOPE"), &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("FRED API error 400"));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error_without_call() {
        let (stub, client) = stub_client_with_key(StubTransport::new(), None);

        let result = GetFredSeriesInfoTool::execute(&params("GDP"), &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("Configuration error"));
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }
}
