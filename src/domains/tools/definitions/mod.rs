//! Tool definitions module.
//!
//! Each tool is defined in its own file under its API family.

pub mod fred;

pub use fred::{
    DashboardIndicator, FredDashboardParams, FredDashboardTool, GetFredDataParams,
    GetFredDataTool, GetFredHistoricalParams, GetFredHistoricalTool, GetFredSeriesInfoParams,
    GetFredSeriesInfoTool, GetMultipleSeriesParams, GetMultipleSeriesTool, SearchFredParams,
    SearchFredTool,
};
