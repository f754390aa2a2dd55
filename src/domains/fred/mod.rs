//! FRED (Federal Reserve Economic Data) API domain.
//!
//! - `client`: request builder and response normalization
//! - `transport`: the HTTP seam (reqwest in production, stubs in tests)
//! - `models`: observations, series metadata and query options
//! - `error`: the error taxonomy shared by all tools

mod client;
mod error;
pub mod models;
pub mod request;
pub mod transport;

pub use client::FredClient;
pub use error::{FredError, FredResult};
pub use models::{
    AggregationMethod, Frequency, Observation, ObservationDate, ObservationValue,
    ObservationsResponse, SeriesInfo, SeriesResponse, SortOrder,
};
pub use request::{Endpoint, FredRequest, ObservationsQuery};
pub use transport::{FredTransport, HttpResponse, ReqwestTransport};
