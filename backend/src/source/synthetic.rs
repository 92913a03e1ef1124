//! Random but plausible flights used when the live feed is unavailable.

use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;

use crate::models::{Clock, FlightDataset, FlightRecord, SystemClock};

/// Number of flights in a synthetic dataset.
pub const SYNTHETIC_FLIGHT_COUNT: usize = 50;

pub const SYNTHETIC_ROUTES: [(&str, &str); 5] = [
    ("SYD", "MEL"),
    ("MEL", "BNE"),
    ("BNE", "PER"),
    ("PER", "ADL"),
    ("ADL", "CBR"),
];

pub const SYNTHETIC_AIRLINES: [&str; 5] = [
    "Qantas",
    "Virgin Australia",
    "Jetstar",
    "Rex",
    "Air New Zealand",
];

const CARRIER_CODES: [&str; 5] = ["QA", "VA", "JQ", "RX", "NZ"];

const STATUSES: [&str; 3] = ["On Time", "Delayed", "Cancelled"];

const BASE_PRICE: f64 = 150.0;

/// Price added per character of the route string, before jitter.
const PRICE_PER_ROUTE_CHAR: f64 = 10.0;

/// Generator for fallback datasets.
#[derive(Clone)]
pub struct SyntheticGenerator {
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SyntheticGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntheticGenerator").finish_non_exhaustive()
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl SyntheticGenerator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Generate a fresh dataset dated today.
    pub fn generate(&self) -> FlightDataset {
        generate_with(&mut rand::rng(), self.clock.today())
    }
}

/// Generate [`SYNTHETIC_FLIGHT_COUNT`] flights on `date` from the given RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate) -> FlightDataset {
    (0..SYNTHETIC_FLIGHT_COUNT)
        .map(|_| synthetic_flight(rng, date))
        .collect()
}

fn synthetic_flight<R: Rng + ?Sized>(rng: &mut R, date: NaiveDate) -> FlightRecord {
    let (origin, destination) = SYNTHETIC_ROUTES[rng.random_range(0..SYNTHETIC_ROUTES.len())];
    let route_len = origin.len() + 1 + destination.len();
    let jitter = rng.random_range(0.8..=1.2);
    let price = BASE_PRICE + route_len as f64 * PRICE_PER_ROUTE_CHAR * jitter;

    let airline = SYNTHETIC_AIRLINES[rng.random_range(0..SYNTHETIC_AIRLINES.len())];
    let carrier = CARRIER_CODES[rng.random_range(0..CARRIER_CODES.len())];
    let flight_number = format!("{}{}", carrier, rng.random_range(100..=999));
    let status = STATUSES[rng.random_range(0..STATUSES.len())];
    let scheduled_time = date.and_hms_opt(rng.random_range(0..24), 0, 0);

    FlightRecord::new(
        scheduled_time,
        origin,
        destination,
        price,
        Some(airline),
        Some(flight_number.as_str()),
        Some(status),
    )
}
