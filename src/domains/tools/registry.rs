//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Name-based dispatch for tool calls arriving over HTTP

use std::sync::Arc;
use tracing::warn;

use rmcp::model::JsonObject;

use crate::domains::fred::FredClient;

use super::ToolError;
use super::definitions::fred::common::call_result_to_json;
use super::definitions::{
    FredDashboardTool, GetFredDataTool, GetFredHistoricalTool, GetFredSeriesInfoTool,
    GetMultipleSeriesTool, SearchFredTool,
};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<FredClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<FredClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetFredDataTool::NAME,
            GetFredHistoricalTool::NAME,
            SearchFredTool::NAME,
            FredDashboardTool::NAME,
            GetMultipleSeriesTool::NAME,
            GetFredSeriesInfoTool::NAME,
        ]
    }

    /// Dispatch a tool call by name.
    ///
    /// Tool failures come back as `Ok` with `isError: true`; `Err` is reserved
    /// for calls that never reach a tool.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let args = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => JsonObject::new(),
            other => {
                let err = ToolError::invalid_arguments(format!("expected an object, got {}", other));
                return Err(err.to_string());
            }
        };

        let client = self.client.as_ref();
        let result = match name {
            GetFredDataTool::NAME => GetFredDataTool::call(args, client).await,
            GetFredHistoricalTool::NAME => GetFredHistoricalTool::call(args, client).await,
            SearchFredTool::NAME => SearchFredTool::call(args, client).await,
            FredDashboardTool::NAME => FredDashboardTool::call(args, client).await,
            GetMultipleSeriesTool::NAME => GetMultipleSeriesTool::call(args, client).await,
            GetFredSeriesInfoTool::NAME => GetFredSeriesInfoTool::call(args, client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name).to_string());
            }
        };

        Ok(call_result_to_json(result))
    }
}
