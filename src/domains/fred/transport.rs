//! HTTP transport abstraction for FRED requests.
//!
//! The client never talks to reqwest directly; it goes through
//! [`FredTransport`] so tests can substitute deterministic stubs.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, instrument};

use super::error::{FredError, FredResult};
use super::request::FredRequest;

/// Raw HTTP response handed back to the client for interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one GET request and returns the raw response.
#[async_trait]
pub trait FredTransport: Send + Sync {
    async fn get(&self, request: &FredRequest) -> FredResult<HttpResponse>;
}

/// Production transport backed by an async reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> FredResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                error!("Failed to create HTTP client: {}", e);
                FredError::transport("failed to create HTTP client")
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FredTransport for ReqwestTransport {
    #[instrument(skip_all, fields(endpoint = request.endpoint().path()))]
    async fn get(&self, request: &FredRequest) -> FredResult<HttpResponse> {
        let response = self
            .client
            .get(request.url())
            .query(request.query())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_error)?;

        debug!(status, bytes = body.len(), "FRED response received");

        Ok(HttpResponse { status, body })
    }
}

/// Map a reqwest error to a generic transport error. The URL is stripped
/// before logging because it carries the API key.
fn classify_error(e: reqwest::Error) -> FredError {
    let message = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    error!("FRED request failed: {} ({})", message, e.without_url());
    FredError::transport(message)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::fred::request::Endpoint;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request_for(server: &MockServer) -> FredRequest {
        FredRequest::new(
            &server.uri(),
            Endpoint::SeriesObservations,
            vec![
                ("series_id".to_string(), "GDP".to_string()),
                ("api_key".to_string(), "test-key".to_string()),
                ("file_type".to_string(), "json".to_string()),
            ],
        )
    }

    #[tokio::test]
    async fn test_reqwest_transport_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/series/observations"))
            .and(query_param("series_id", "GDP"))
            .and(query_param("api_key", "test-key"))
            .and(query_param("file_type", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"observations":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport.get(&request_for(&server)).await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body, r#"{"observations":[]}"#);
    }

    #[tokio::test]
    async fn test_reqwest_transport_passes_error_status_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/series/observations"))
            .respond_with(ResponseTemplate::new(400).set_body_string(
                r#"{"error_code":400,"error_message":"Bad Request."}"#,
            ))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_secs(5)).unwrap();
        let response = transport.get(&request_for(&server)).await.unwrap();

        assert_eq!(response.status, 400);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_reqwest_transport_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new(Duration::from_millis(100)).unwrap();
        let err = transport.get(&request_for(&server)).await.unwrap_err();

        assert_eq!(err, FredError::transport("request timed out"));
    }
}
