//! Error types and handling for the MCP server.
//!
//! A single error type for bootstrap and server plumbing. Tool-level failures
//! never surface here; they are returned to the client as error results.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the FRED client.
    #[error(transparent)]
    Fred(#[from] crate::domains::fred::FredError),

    /// Error from the MCP transport layer.
    #[error(transparent)]
    Transport(#[from] super::transport::TransportError),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
