//! Data Transfer Objects for the HTTP API.
//!
//! The dashboard payload itself is re-exported from the routes module since it
//! already derives Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{DashboardView, RawFilters};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Cached dataset state, e.g. `live (50 flights)` or `not loaded`
    pub dataset: String,
}
