//! FRED keyword search tool.

use rmcp::handler::server::tool::{ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::fred::{FredClient, FredError, SeriesInfo, SeriesResponse};

use super::common::{
    error_result, fred_error_result, parse_params, route, success_result, validate_limit,
};

/// Upper bound FRED accepts for search `limit`.
const MAX_SEARCH_RESULTS: usize = 1000;

/// Parameters for series search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchFredParams {
    #[schemars(description = "Search query (keywords)")]
    pub query: String,

    #[schemars(description = "Number of results (default: 10, max: 1000)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// FRED series search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchFredTool;

impl SearchFredTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_fred";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the FRED database for series by keywords. \
         Returns series IDs with titles and frequencies, ranked by popularity.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query, limit = params.limit))]
    pub async fn execute(params: &SearchFredParams, client: &FredClient) -> CallToolResult {
        let query = params.query.trim();
        if query.is_empty() {
            return fred_error_result(&FredError::validation("query", "must not be empty"));
        }
        let limit = validate_limit(params.limit, MAX_SEARCH_RESULTS);

        info!("Searching FRED series");

        match client.search(query, limit).await {
            Ok(response) => success_result(Self::format_report(query, &response)),
            Err(e) => fred_error_result(&e),
        }
    }

    /// Decode arguments and execute.
    pub async fn call(args: JsonObject, client: &FredClient) -> CallToolResult {
        match parse_params::<SearchFredParams>(args) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => error_result(&e.to_string()),
        }
    }

    fn format_report(query: &str, response: &SeriesResponse) -> String {
        if response.seriess.is_empty() {
            return format!("No series found matching '{}'", query);
        }

        let total = response
            .count
            .map(|c| format!(" of {}", c))
            .unwrap_or_default();

        let lines: Vec<String> = response
            .seriess
            .iter()
            .enumerate()
            .map(|(i, series)| format!("{}. {}", i + 1, Self::format_entry(series)))
            .collect();

        format!(
            "Search results for '{}' ({}{} matches):\n{}",
            query,
            response.seriess.len(),
            total,
            lines.join("\n")
        )
    }

    fn format_entry(series: &SeriesInfo) -> String {
        let mut details = Vec::new();
        if let Some(frequency) = &series.frequency {
            details.push(frequency.clone());
        }
        if let Some(popularity) = series.popularity {
            details.push(format!("popularity {}", popularity));
        }

        let title = series.title.as_deref().unwrap_or("Untitled");
        if details.is_empty() {
            format!("{} - {}", series.id, title)
        } else {
            format!("{} - {} ({})", series.id, title, details.join(", "))
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchFredParams>(),
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
