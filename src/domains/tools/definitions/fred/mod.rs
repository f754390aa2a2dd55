//! FRED economic data tools.
//!
//! - `data`: latest observations of one series
//! - `historical`: multi-year summary of one series
//! - `search`: keyword search over series metadata
//! - `dashboard`: latest values of headline indicators
//! - `multiple`: side-by-side recent observations of several series
//! - `series_info`: metadata for one series

pub mod common;
pub mod dashboard;
pub mod data;
pub mod historical;
pub mod multiple;
pub mod search;
pub mod series_info;

pub use dashboard::{DashboardIndicator, FredDashboardParams, FredDashboardTool};
pub use data::{GetFredDataParams, GetFredDataTool};
pub use historical::{GetFredHistoricalParams, GetFredHistoricalTool};
pub use multiple::{GetMultipleSeriesParams, GetMultipleSeriesTool};
pub use search::{SearchFredParams, SearchFredTool};
pub use series_info::{GetFredSeriesInfoParams, GetFredSeriesInfoTool};
