//! FRED MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing Federal Reserve Economic
//! Data (FRED) as tools.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **fred**: the FRED API client, its transport seam and data model
//!   - **tools**: the MCP tools built on the client
//!
//! # Example
//!
//! ```rust,no_run
//! use fred_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
