//! Domains module containing business logic organized by bounded contexts.
//!
//! - `fred`: access to the FRED API
//! - `tools`: MCP tools exposed to clients

pub mod fred;
pub mod tools;
