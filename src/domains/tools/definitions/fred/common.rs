//! Common utilities shared across FRED tools.
//!
//! Parameter validation, result construction, observation formatting and the
//! ordered fan-out used by the batch tools.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::FutureExt;
use futures::future::join_all;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute},
    model::{CallToolResult, Content, JsonObject, Tool},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::fred::models::DATE_FORMAT;
use crate::domains::fred::{FredClient, FredError, FredResult, Observation};
use crate::domains::tools::ToolError;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create an error result from a FRED error.
pub fn fred_error_result(err: &FredError) -> CallToolResult {
    error_result(&err.to_string())
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Decode raw tool arguments into a parameter struct. Type errors are
/// prefixed with the path of the offending field.
pub fn parse_params<T: DeserializeOwned>(args: JsonObject) -> Result<T, ToolError> {
    serde_path_to_error::deserialize(serde_json::Value::Object(args)).map_err(|e| {
        let path = e.path().to_string();
        if path == "." {
            ToolError::invalid_arguments(e.inner().to_string())
        } else {
            ToolError::invalid_arguments(format!("'{}': {}", path, e.inner()))
        }
    })
}

/// Build a rmcp route whose handler always answers with a `CallToolResult`.
pub fn route<S, F, Fut>(tool: Tool, client: Arc<FredClient>, call: F) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
    F: Fn(JsonObject, Arc<FredClient>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallToolResult> + Send + 'static,
{
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let fut = call(args, client.clone());
        async move { Ok::<_, McpError>(fut.await) }.boxed()
    })
}

/// Trim and upper-case a series identifier, rejecting empty ones.
pub fn normalize_series_id(param: &str, raw: &str) -> FredResult<String> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(FredError::validation(param, "must not be empty"));
    }
    Ok(id.to_uppercase())
}

/// Parse an optional `YYYY-MM-DD` parameter.
pub fn parse_date(param: &str, raw: Option<&str>) -> FredResult<Option<NaiveDate>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
                FredError::validation(param, format!("expected YYYY-MM-DD, got '{}'", s))
            })
        })
        .transpose()
}

/// Clamp a limit to `1..=max`.
pub fn validate_limit(limit: usize, max: usize) -> usize {
    limit.clamp(1, max)
}

/// `2024-09-01 = 4.1`
pub fn format_observation(obs: &Observation) -> String {
    format!("{} = {}", obs.date, obs.value)
}

/// Two-column table of observations, one per line, indented.
pub fn format_observation_table(observations: &[Observation]) -> String {
    observations
        .iter()
        .map(|obs| format!("  {}  {}", obs.date, obs.value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indices of up to `samples` evenly spaced points, first and last included.
pub fn sample_indices(len: usize, samples: usize) -> Vec<usize> {
    if len <= samples {
        return (0..len).collect();
    }
    if samples < 2 {
        return (0..samples).collect();
    }
    let mut indices: Vec<usize> = (0..samples)
        .map(|i| i * (len - 1) / (samples - 1))
        .collect();
    indices.dedup();
    indices
}

/// Outcome of one item of a batch fetch.
#[derive(Debug, Clone)]
pub struct BatchEntry<T> {
    pub key: String,
    pub outcome: FredResult<T>,
}

/// Run `fetch` for every key concurrently. Results come back in input order
/// regardless of completion order.
pub async fn fetch_all<T, F, Fut>(keys: &[String], fetch: F) -> Vec<BatchEntry<T>>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = FredResult<T>>,
{
    let outcomes = join_all(keys.iter().cloned().map(&fetch)).await;
    keys.iter()
        .cloned()
        .zip(outcomes)
        .map(|(key, outcome)| BatchEntry { key, outcome })
        .collect()
}

/// Serialize a tool result for the HTTP transport.
pub fn call_result_to_json(result: CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::config::FredConfig;
    use crate::domains::fred::transport::stub::StubTransport;
    use rmcp::model::RawContent;

    /// Client over a stub transport with a test API key.
    pub fn stub_client(stub: StubTransport) -> (Arc<StubTransport>, FredClient) {
        stub_client_with_key(stub, Some("test-key"))
    }

    pub fn stub_client_with_key(
        stub: StubTransport,
        api_key: Option<&str>,
    ) -> (Arc<StubTransport>, FredClient) {
        let stub = Arc::new(stub);
        let config = FredConfig {
            api_key: api_key.map(str::to_string),
            ..FredConfig::default()
        };
        let client = FredClient::new(&config, stub.clone());
        (stub, client)
    }

    /// The single text block of a tool result.
    pub fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    pub fn is_error(result: &CallToolResult) -> bool {
        result.is_error.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::fred::{ObservationDate, ObservationValue};

    #[test]
    fn test_normalize_series_id() {
        assert_eq!(normalize_series_id("series_id", " unrate ").unwrap(), "UNRATE");
        let err = normalize_series_id("series_id", "   ").unwrap_err();
        assert!(err.to_string().contains("series_id"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("start_date", None).unwrap(), None);
        assert_eq!(parse_date("start_date", Some("")).unwrap(), None);
        assert_eq!(
            parse_date("start_date", Some("2020-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 31)
        );
        let err = parse_date("end_date", Some("01/31/2020")).unwrap_err();
        assert!(matches!(err, FredError::Validation { ref param, .. } if param == "end_date"));
    }

    #[allow(dead_code)]
    #[derive(Debug, serde::Deserialize)]
    struct LimitParams {
        series_id: String,
        limit: usize,
    }

    #[test]
    fn test_parse_params_names_bad_field() {
        let args = serde_json::json!({ "series_id": "GDP", "limit": -1 })
            .as_object()
            .unwrap()
            .clone();

        let err = parse_params::<LimitParams>(args).unwrap_err();

        assert!(err.to_string().starts_with("Invalid arguments: 'limit': "));
    }

    #[test]
    fn test_parse_params_missing_field() {
        let err = parse_params::<LimitParams>(JsonObject::new()).unwrap_err();
        assert!(err.to_string().contains("series_id"));
    }

    #[test]
    fn test_validate_limit() {
        assert_eq!(validate_limit(0, 100), 1);
        assert_eq!(validate_limit(10, 100), 10);
        assert_eq!(validate_limit(500, 100), 100);
    }

    #[test]
    fn test_sample_indices() {
        assert_eq!(sample_indices(0, 5), Vec::<usize>::new());
        assert_eq!(sample_indices(3, 5), vec![0, 1, 2]);
        assert_eq!(sample_indices(5, 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(sample_indices(9, 5), vec![0, 2, 4, 6, 8]);
        assert_eq!(sample_indices(40, 5), vec![0, 9, 19, 29, 39]);
    }

    #[test]
    fn test_observation_table_renders_sentinel() {
        let observations = vec![
            Observation {
                date: ObservationDate::parse("2024-09-01"),
                value: ObservationValue::parse("4.1"),
            },
            Observation {
                date: ObservationDate::parse("2024-08-01"),
                value: ObservationValue::parse("."),
            },
        ];
        assert_eq!(
            format_observation_table(&observations),
            "  2024-09-01  4.1\n  2024-08-01  N/A"
        );
        assert_eq!(format_observation(&observations[1]), "2024-08-01 = N/A");
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_input_order() {
        let keys = vec!["SLOW".to_string(), "FAST".to_string()];
        let entries = fetch_all(&keys, |key| async move {
            if key == "SLOW" {
                tokio::time::sleep(std::time::Duration::from_millis(30)).await;
            }
            Ok::<_, FredError>(key.to_lowercase())
        })
        .await;

        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["SLOW", "FAST"]);
        assert_eq!(entries[0].outcome, Ok("slow".to_string()));
    }
}
