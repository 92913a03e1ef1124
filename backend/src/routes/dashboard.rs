use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::charts::ChartPayload;
use super::insights::InsightsView;
use crate::models::{format_minutes, FlightRecord};

// =========================================================
// Dashboard types
// =========================================================

/// Filter form fields exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFilters {
    pub route: String,
    pub min_price: String,
    pub max_price: String,
    pub airline: String,
}

/// One row of the flights table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRow {
    /// `YYYY-MM-DD HH:MM`, null when the flight has no schedule time.
    pub datetime: Option<String>,
    pub airline: String,
    pub flight_number: String,
    pub route: String,
    pub price: f64,
    pub status: String,
}

impl From<&FlightRecord> for FlightRow {
    fn from(record: &FlightRecord) -> Self {
        Self {
            datetime: record.scheduled_time.as_ref().map(format_minutes),
            airline: record.airline.clone(),
            flight_number: record.flight_number.clone(),
            route: record.route.clone(),
            price: record.price,
            status: record.status.clone(),
        }
    }
}

/// Everything the dashboard page needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Keyed by `routes`, `prices`, `airlines`; absent when there is nothing to plot.
    pub charts: BTreeMap<String, ChartPayload>,
    pub insights: InsightsView,
    pub flights: Vec<FlightRow>,
    pub routes: Vec<String>,
    pub airlines: Vec<String>,
    pub current_filters: RawFilters,
    pub last_updated: String,
}

impl DashboardView {
    /// Payload served when the pipeline fails.
    pub fn fallback(filters: RawFilters, now: &NaiveDateTime) -> Self {
        Self {
            charts: BTreeMap::new(),
            insights: InsightsView::no_data(),
            flights: Vec::new(),
            routes: Vec::new(),
            airlines: Vec::new(),
            current_filters: filters,
            last_updated: format_minutes(now),
        }
    }
}
