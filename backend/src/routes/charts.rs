use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::insights::AirlineCount;
use crate::models::format_minutes;

// =========================================================
// Chart types
// =========================================================

pub const ROUTES_CHART: &str = "routes";
pub const PRICES_CHART: &str = "prices";
pub const AIRLINES_CHART: &str = "airlines";

/// Flights on one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCount {
    pub route: String,
    pub flights: usize,
}

/// Mean price inside one 6-hour window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub bucket_start: NaiveDateTime,
    pub mean_price: f64,
}

/// Chart-ready aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartTables {
    /// Top 5 routes, busiest first.
    pub route_counts: Vec<RouteCount>,
    /// Chronological, empty windows omitted.
    pub price_trend: Vec<PricePoint>,
    pub airline_share: Vec<AirlineCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Renderable chart description consumed by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartTables {
    pub fn is_empty(&self) -> bool {
        self.route_counts.is_empty() && self.price_trend.is_empty() && self.airline_share.is_empty()
    }

    /// Build the chart map; a chart is present only when its table has rows.
    pub fn to_payloads(&self) -> BTreeMap<String, ChartPayload> {
        let mut charts = BTreeMap::new();

        if !self.route_counts.is_empty() {
            charts.insert(
                ROUTES_CHART.to_string(),
                ChartPayload {
                    title: "Top 5 Busiest Routes".to_string(),
                    kind: ChartKind::Bar,
                    x_label: "route".to_string(),
                    y_label: "count".to_string(),
                    points: self
                        .route_counts
                        .iter()
                        .map(|r| ChartPoint {
                            label: r.route.clone(),
                            value: r.flights as f64,
                        })
                        .collect(),
                },
            );
        }

        if !self.price_trend.is_empty() {
            charts.insert(
                PRICES_CHART.to_string(),
                ChartPayload {
                    title: "Price Trends (6hr intervals)".to_string(),
                    kind: ChartKind::Line,
                    x_label: "datetime".to_string(),
                    y_label: "price".to_string(),
                    points: self
                        .price_trend
                        .iter()
                        .map(|p| ChartPoint {
                            label: format_minutes(&p.bucket_start),
                            value: p.mean_price,
                        })
                        .collect(),
                },
            );
        }

        if !self.airline_share.is_empty() {
            charts.insert(
                AIRLINES_CHART.to_string(),
                ChartPayload {
                    title: "Airline Market Share".to_string(),
                    kind: ChartKind::Pie,
                    x_label: "airline".to_string(),
                    y_label: "count".to_string(),
                    points: self
                        .airline_share
                        .iter()
                        .map(|a| ChartPoint {
                            label: a.airline.clone(),
                            value: a.flights as f64,
                        })
                        .collect(),
                },
            );
        }

        charts
    }
}
