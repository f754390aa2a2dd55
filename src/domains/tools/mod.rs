//! Tools domain module.
//!
//! Tools are the functions MCP clients call to query FRED.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - rmcp ToolRouter builder for the STDIO transport
//! - `registry.rs` - Tool listing and name-based dispatch for HTTP
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/fred/` with params, `execute()` and `call()`
//! 2. Export it in `definitions/fred/mod.rs`
//! 3. Add its route in `router.rs`
//! 4. Register it in `registry.rs`

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
