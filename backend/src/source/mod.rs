//! Flight data acquisition.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  FallbackSource              │  never fails
//! └───────┬──────────────┬───────┘
//!         │ Ok           │ Err(SourceError)
//! ┌───────▼───────┐ ┌────▼───────────────┐
//! │ FlightSource  │ │ SyntheticGenerator │
//! │ (AviationStack│ │  50 random flights │
//! │  or a double) │ └────────────────────┘
//! └───────────────┘
//! ```

pub mod aviationstack;
pub mod fallback;
pub mod synthetic;

pub use aviationstack::{parse_flights_response, AviationStackSource};
pub use fallback::{FallbackSource, FetchOutcome};
pub use synthetic::SyntheticGenerator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::FlightDataset;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Why a remote fetch produced no usable dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream reported an error: {0}")]
    Api(String),

    #[error("invalid response body: {0}")]
    InvalidBody(String),

    #[error("response contained no flights")]
    EmptyData,
}

impl SourceError {
    /// Classify a reqwest failure.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            SourceError::Timeout(timeout)
        } else if err.is_decode() {
            SourceError::InvalidBody(err.to_string())
        } else {
            SourceError::Network(err.to_string())
        }
    }
}

/// Where the current dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetOrigin {
    Live,
    Synthetic,
}

impl std::fmt::Display for DatasetOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetOrigin::Live => write!(f, "live"),
            DatasetOrigin::Synthetic => write!(f, "synthetic"),
        }
    }
}

/// A remote provider of flight records.
#[async_trait]
pub trait FlightSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch up to [`crate::models::MAX_FLIGHTS_PER_FETCH`] flights.
    async fn fetch_flights(&self) -> SourceResult<FlightDataset>;
}
