//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::FlightDataset;
pub use crate::models::FlightRecord;
pub use crate::routes::charts::ChartKind;
pub use crate::routes::charts::ChartPayload;
pub use crate::routes::charts::ChartPoint;
pub use crate::routes::charts::ChartTables;
pub use crate::routes::charts::PricePoint;
pub use crate::routes::charts::RouteCount;
pub use crate::routes::dashboard::DashboardView;
pub use crate::routes::dashboard::FlightRow;
pub use crate::routes::dashboard::RawFilters;
pub use crate::routes::insights::AirlineCount;
pub use crate::routes::insights::Insight;
pub use crate::routes::insights::InsightSummary;
pub use crate::routes::insights::InsightsView;
pub use crate::routes::insights::PeakWindow;
pub use crate::routes::insights::RouteDeal;
pub use crate::source::DatasetOrigin;

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
