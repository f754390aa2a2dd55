//! FRED economic dashboard tool.
//!
//! Fetches the latest value of a fixed set of headline indicators. A failing
//! indicator is reported on its own line; the rest of the dashboard still
//! renders.

use rmcp::handler::server::tool::{ToolRoute, cached_schema_for_type};
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::fred::{FredClient, FredResult, Observation, ObservationsQuery};

use super::common::{
    BatchEntry, error_result, fetch_all, fred_error_result, parse_params, route, success_result,
};

/// Headline indicators available on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DashboardIndicator {
    /// Gross Domestic Product
    #[serde(rename = "GDP")]
    Gdp,
    /// Unemployment Rate
    #[serde(rename = "UNRATE")]
    Unrate,
    /// Federal Funds Effective Rate
    #[serde(rename = "FEDFUNDS")]
    FedFunds,
    /// Consumer Price Index for All Urban Consumers
    #[serde(rename = "CPIAUCSL")]
    Cpi,
    /// 10-Year Treasury Constant Maturity Rate
    #[serde(rename = "DGS10")]
    Treasury10Y,
    /// Nominal Broad U.S. Dollar Index
    #[serde(rename = "DTWEXBGS")]
    DollarIndex,
    /// S&P 500
    #[serde(rename = "SP500")]
    Sp500,
}

impl DashboardIndicator {
    /// The default dashboard, in display order.
    pub const ALL: [Self; 7] = [
        Self::Gdp,
        Self::Unrate,
        Self::FedFunds,
        Self::Cpi,
        Self::Treasury10Y,
        Self::DollarIndex,
        Self::Sp500,
    ];

    pub fn series_id(self) -> &'static str {
        match self {
            Self::Gdp => "GDP",
            Self::Unrate => "UNRATE",
            Self::FedFunds => "FEDFUNDS",
            Self::Cpi => "CPIAUCSL",
            Self::Treasury10Y => "DGS10",
            Self::DollarIndex => "DTWEXBGS",
            Self::Sp500 => "SP500",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gdp => "Gross Domestic Product",
            Self::Unrate => "Unemployment Rate",
            Self::FedFunds => "Fed Funds Rate",
            Self::Cpi => "Inflation (CPI)",
            Self::Treasury10Y => "10-Year Treasury",
            Self::DollarIndex => "USD Index",
            Self::Sp500 => "S&P 500",
        }
    }
}

/// Parameters for the dashboard.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct FredDashboardParams {
    #[schemars(description = "Subset of indicators to show (default: all of GDP, UNRATE, FEDFUNDS, CPIAUCSL, DGS10, DTWEXBGS, SP500)")]
    #[serde(default)]
    pub indicators: Option<Vec<DashboardIndicator>>,
}

/// FRED dashboard tool implementation.
#[derive(Debug, Clone)]
pub struct FredDashboardTool;

impl FredDashboardTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fred_dashboard";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the latest values of key economic indicators \
         (GDP, unemployment, fed funds rate, CPI, 10-year treasury, USD index, S&P 500). \
         Indicators that fail to load are reported inline without affecting the others.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(params: &FredDashboardParams, client: &FredClient) -> CallToolResult {
        if let Err(e) = client.ensure_configured() {
            return fred_error_result(&e);
        }

        let indicators = Self::selected(params);
        info!(count = indicators.len(), "Building FRED dashboard");

        let keys: Vec<String> = indicators
            .iter()
            .map(|i| i.series_id().to_string())
            .collect();
        let entries = fetch_all(&keys, |series_id| Self::latest(client, series_id)).await;

        success_result(Self::format_report(&indicators, &entries))
    }

    /// Decode arguments and execute.
    pub async fn call(args: JsonObject, client: &FredClient) -> CallToolResult {
        match parse_params::<FredDashboardParams>(args) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => error_result(&e.to_string()),
        }
    }

    /// Requested indicators with duplicates removed, or the full set.
    fn selected(params: &FredDashboardParams) -> Vec<DashboardIndicator> {
        let requested = match &params.indicators {
            Some(list) if !list.is_empty() => list.as_slice(),
            _ => &DashboardIndicator::ALL[..],
        };

        let mut selected = Vec::with_capacity(requested.len());
        for indicator in requested {
            if !selected.contains(indicator) {
                selected.push(*indicator);
            }
        }
        selected
    }

    async fn latest(client: &FredClient, series_id: String) -> FredResult<Option<Observation>> {
        let response = client
            .observations(&ObservationsQuery::latest(series_id, 1))
            .await?;
        Ok(response.observations.into_iter().next())
    }

    fn format_report(
        indicators: &[DashboardIndicator],
        entries: &[BatchEntry<Option<Observation>>],
    ) -> String {
        let lines: Vec<String> = indicators
            .iter()
            .zip(entries)
            .map(|(indicator, entry)| {
                let value = match &entry.outcome {
                    Ok(Some(obs)) => format!("{} as of {}", obs.value, obs.date),
                    Ok(None) => "no data".to_string(),
                    Err(e) => {
                        warn!(series_id = %entry.key, "Dashboard indicator failed: {}", e);
                        format!("error: {}", e)
                    }
                };
                format!("- {} ({}): {}", indicator.label(), entry.key, value)
            })
            .collect();

        format!(
            "Economic Dashboard ({} indicators)\n{}",
            indicators.len(),
            lines.join("\n")
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FredDashboardParams>(),
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
    use crate::domains::fred::transport::stub::{StubTransport, observations_body};
    use crate::domains::fred::{Endpoint, FredError};
    use crate::domains::tools::definitions::fred::common::test_support::{
        is_error, result_text, stub_client, stub_client_with_key,
    };

    fn full_stub() -> StubTransport {
        let points = [
            ("GDP", "2024-04-01", "28652.337"),
            ("UNRATE", "2024-09-01", "4.1"),
            ("FEDFUNDS", "2024-09-01", "5.13"),
            ("CPIAUCSL", "2024-09-01", "315.301"),
            ("DGS10", "2024-10-15", "."),
            ("DTWEXBGS", "2024-10-11", "123.4"),
            ("SP500", "2024-10-16", "5842.47"),
        ];
        points
            .into_iter()
            .fold(StubTransport::new(), |stub, (id, date, value)| {
                stub.with_json(
                    Endpoint::SeriesObservations,
                    id,
                    observations_body(&[(date, value)]),
                )
            })
    }

    #[tokio::test]
    async fn test_default_dashboard() {
        let (stub, client) = stub_client(full_stub());

        let result = FredDashboardTool::execute(&FredDashboardParams::default(), &client).await;

        assert!(!is_error(&result));
        assert_eq!(
            result_text(&result),
            "Economic Dashboard (7 indicators)\n\
             - Gross Domestic Product (GDP): 28652.337 as of 2024-04-01\n\
             - Unemployment Rate (UNRATE): 4.1 as of 2024-09-01\n\
             - Fed Funds Rate (FEDFUNDS): 5.13 as of 2024-09-01\n\
             - Inflation (CPI) (CPIAUCSL): 315.301 as of 2024-09-01\n\
             - 10-Year Treasury (DGS10): N/A as of 2024-10-15\n\
             - USD Index (DTWEXBGS): 123.4 as of 2024-10-11\n\
             - S&P 500 (SP500): 5842.47 as of 2024-10-16"
        );
        assert_eq!(stub.call_count(), 7);
        assert!(stub
            .calls()
            .iter()
            .all(|r| r.param("limit") == Some("1") && r.param("sort_order") == Some("desc")));
    }

    #[tokio::test]
    async fn test_one_failing_indicator_reported_inline() {
        let stub = full_stub().with_failure(
            Endpoint::SeriesObservations,
            "FEDFUNDS",
            FredError::transport("request timed out"),
        );
        let (_, client) = stub_client(stub);

        let result = FredDashboardTool::execute(&FredDashboardParams::default(), &client).await;
        let text = result_text(&result);

        assert!(!is_error(&result));
        assert!(text.contains("- Fed Funds Rate (FEDFUNDS): error: Transport error: request timed out"));
        assert!(text.contains("- Gross Domestic Product (GDP): 28652.337 as of 2024-04-01"));
        assert!(text.contains("- S&P 500 (SP500): 5842.47 as of 2024-10-16"));
    }

    #[tokio::test]
    async fn test_subset_selection_dedupes() {
        let (stub, client) = stub_client(full_stub());
        let params: FredDashboardParams = serde_json::from_value(serde_json::json!({
            "indicators": ["UNRATE", "GDP", "UNRATE"]
        }))
        .unwrap();

        let result = FredDashboardTool::execute(&params, &client).await;

        assert_eq!(
            result_text(&result),
            "Economic Dashboard (2 indicators)\n\
             - Unemployment Rate (UNRATE): 4.1 as of 2024-09-01\n\
             - Gross Domestic Product (GDP): 28652.337 as of 2024-04-01"
        );
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_aborts_whole_dashboard() {
        let (stub, client) = stub_client_with_key(full_stub(), None);

        let result = FredDashboardTool::execute(&FredDashboardParams::default(), &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("Configuration error"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_dashboard_is_byte_identical() {
        let stub = full_stub().with_delay(
            Endpoint::SeriesObservations,
            "GDP",
            std::time::Duration::from_millis(20),
        );
        let (stub, client) = stub_client(stub);

        let first = FredDashboardTool::execute(&FredDashboardParams::default(), &client).await;
        let second = FredDashboardTool::execute(&FredDashboardParams::default(), &client).await;

        assert_eq!(result_text(&first), result_text(&second));
        assert_eq!(stub.call_count(), 14);
    }

    #[tokio::test]
    async fn test_unknown_indicator_key_rejected() {
        let (stub, client) = stub_client(full_stub());
        let mut args = JsonObject::new();
        args.insert("indicators".to_string(), serde_json::json!(["BOGUS"]));

        let result = FredDashboardTool::call(args, &client).await;

        assert!(is_error(&result));
        assert!(result_text(&result).starts_with("Invalid arguments"));
        assert_eq!(stub.call_count(), 0);
    }
}
