use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum number of flights kept from a single fetch.
pub const MAX_FLIGHTS_PER_FETCH: usize = 50;

/// Placeholder for an unknown airline or status.
pub const UNKNOWN: &str = "Unknown";

/// One flight observation.
///
/// Every field is populated at construction; absent upstream values are
/// replaced with their defaults so grouping never has to check for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub scheduled_time: Option<NaiveDateTime>,
    /// `ORIGIN-DEST`, either side possibly empty.
    pub route: String,
    /// Non-negative ticket price, 0 when unknown.
    pub price: f64,
    pub airline: String,
    pub flight_number: String,
    pub status: String,
}

impl FlightRecord {
    /// Build a record from already-extracted upstream parts.
    pub fn new(
        scheduled_time: Option<NaiveDateTime>,
        origin: &str,
        destination: &str,
        price: f64,
        airline: Option<&str>,
        flight_number: Option<&str>,
        status: Option<&str>,
    ) -> Self {
        Self {
            scheduled_time,
            route: format!("{}-{}", origin.trim(), destination.trim()),
            price: sanitize_price(price),
            airline: non_empty_or(airline, UNKNOWN),
            flight_number: flight_number.unwrap_or_default().trim().to_string(),
            status: non_empty_or(status, UNKNOWN),
        }
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Clamp a price into the non-negative finite range, 0 otherwise.
pub fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Ordered collection of flights from one fetch (or a filtered view of one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightDataset {
    records: Vec<FlightRecord>,
}

impl FlightDataset {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlightRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct routes.
    pub fn routes(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.route.as_str()))
    }

    /// Sorted distinct airlines.
    pub fn airlines(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.airline.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl FromIterator<FlightRecord> for FlightDataset {
    fn from_iter<I: IntoIterator<Item = FlightRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FlightDataset {
    type Item = &'a FlightRecord;
    type IntoIter = std::slice::Iter<'a, FlightRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
