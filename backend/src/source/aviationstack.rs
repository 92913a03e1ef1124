//! AviationStack `/flights` client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{FlightSource, SourceError, SourceResult};
use crate::config::SourceSettings;
use crate::models::{parse_timestamp, FlightDataset, FlightRecord};

/// Envelope of a `/flights` response. Individual flights stay untyped so a
/// malformed entry only loses its own fields.
#[derive(Debug, Deserialize)]
struct FlightsEnvelope {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP-backed flight source.
#[derive(Debug, Clone)]
pub struct AviationStackSource {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
    timeout: Duration,
    max_flights: usize,
}

impl AviationStackSource {
    pub fn new(settings: &SourceSettings) -> SourceResult<Self> {
        let timeout = Duration::from_secs(settings.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_key: settings.access_key.clone(),
            timeout,
            max_flights: settings.max_flights,
        })
    }

    fn flights_url(&self) -> String {
        format!("{}/flights", self.base_url)
    }
}

#[async_trait]
impl FlightSource for AviationStackSource {
    fn name(&self) -> &str {
        "aviationstack"
    }

    async fn fetch_flights(&self) -> SourceResult<FlightDataset> {
        log::debug!("Fetching flights from {}", self.flights_url());

        let response = self
            .client
            .get(self.flights_url())
            .query(&[("access_key", self.access_key.as_str())])
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: body.trim().chars().take(200).collect(),
            });
        }

        let dataset = parse_flights_response(&body, self.max_flights)?;
        log::info!("Fetched {} flights from {}", dataset.len(), self.name());
        Ok(dataset)
    }
}

/// Parse a `/flights` response body into at most `max_flights` records.
pub fn parse_flights_response(body: &str, max_flights: usize) -> SourceResult<FlightDataset> {
    let envelope: FlightsEnvelope =
        serde_json::from_str(body).map_err(|e| SourceError::InvalidBody(e.to_string()))?;

    if let Some(err) = envelope.error {
        let message = match (err.code, err.message) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => "unspecified error".to_string(),
        };
        return Err(SourceError::Api(message));
    }

    let data = envelope.data.unwrap_or_default();
    if data.is_empty() {
        return Err(SourceError::EmptyData);
    }

    Ok(data.iter().take(max_flights).map(parse_flight).collect())
}

/// Build one record, defaulting each field on its own.
fn parse_flight(flight: &Value) -> FlightRecord {
    let scheduled_time = nested(flight, "departure", "scheduled").and_then(parse_timestamp);
    let price = flight.get("price").map(parse_price).unwrap_or(0.0);

    FlightRecord::new(
        scheduled_time,
        nested(flight, "departure", "iata").unwrap_or_default(),
        nested(flight, "arrival", "iata").unwrap_or_default(),
        price,
        nested(flight, "airline", "name"),
        nested(flight, "flight", "iata"),
        flight.get("flight_status").and_then(Value::as_str),
    )
}

/// `flight[block][key]` as a string; `None` when any level is missing or mistyped.
fn nested<'a>(flight: &'a Value, block: &str, key: &str) -> Option<&'a str> {
    flight.get(block).and_then(|b| b.get(key)).and_then(Value::as_str)
}

fn parse_price(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
