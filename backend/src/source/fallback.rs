//! Live source with synthetic fallback.

use std::sync::Arc;

use super::{DatasetOrigin, FlightSource, SourceError, SyntheticGenerator};
use crate::models::FlightDataset;

/// Which path produced a dataset.
#[derive(Debug)]
pub enum FetchOutcome {
    Live(FlightDataset),
    Fallback {
        dataset: FlightDataset,
        cause: SourceError,
    },
}

impl FetchOutcome {
    pub fn origin(&self) -> DatasetOrigin {
        match self {
            FetchOutcome::Live(_) => DatasetOrigin::Live,
            FetchOutcome::Fallback { .. } => DatasetOrigin::Synthetic,
        }
    }

    pub fn dataset(&self) -> &FlightDataset {
        match self {
            FetchOutcome::Live(dataset) | FetchOutcome::Fallback { dataset, .. } => dataset,
        }
    }

    pub fn into_dataset(self) -> FlightDataset {
        match self {
            FetchOutcome::Live(dataset) | FetchOutcome::Fallback { dataset, .. } => dataset,
        }
    }
}

/// Wraps a [`FlightSource`] so that fetching always yields a dataset.
#[derive(Clone)]
pub struct FallbackSource {
    primary: Arc<dyn FlightSource>,
    generator: SyntheticGenerator,
}

impl FallbackSource {
    pub fn new(primary: Arc<dyn FlightSource>, generator: SyntheticGenerator) -> Self {
        Self { primary, generator }
    }

    /// Fetch from the primary source, substituting synthetic data on any failure.
    pub async fn fetch(&self) -> FetchOutcome {
        match self.primary.fetch_flights().await {
            Ok(dataset) => FetchOutcome::Live(dataset),
            Err(cause) => {
                log::warn!(
                    "Flight source '{}' unavailable ({}), using synthetic data",
                    self.primary.name(),
                    cause
                );
                FetchOutcome::Fallback {
                    dataset: self.generator.generate(),
                    cause,
                }
            }
        }
    }
}
