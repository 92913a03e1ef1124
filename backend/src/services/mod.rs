//! Service layer for the dashboard pipeline.
//!
//! Each module here is a pure function of a [`FlightDataset`](crate::models::FlightDataset):
//! filtering, insight generation and chart reduction. [`dashboard`] composes
//! them into the per-request view and is the only place that turns a
//! [`PipelineError`] into the degraded payload.

pub mod charts;
pub mod dashboard;
pub mod filter;
pub mod insights;

pub use charts::summarize_for_charts;
pub use dashboard::render_dashboard;
pub use filter::{FilterCriteria, PriceBound};
pub use insights::summarize;

/// Failures inside the per-request pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Non-finite aggregate: {0}")]
    NonFiniteAggregate(String),

    #[error("Pipeline task failed: {0}")]
    TaskFailed(String),
}

/// Incremental mean; stays finite for any run of finite inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct RunningMean {
    mean: f64,
    count: usize,
}

impl RunningMean {
    pub(crate) fn push(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
    }

    /// The mean, or an error naming `what` when it is not finite.
    pub(crate) fn finite(&self, what: impl FnOnce() -> String) -> Result<f64, PipelineError> {
        if self.mean.is_finite() {
            Ok(self.mean)
        } else {
            Err(PipelineError::NonFiniteAggregate(what()))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn mean_of(values: &[f64]) -> RunningMean {
        let mut mean = RunningMean::default();
        for value in values {
            mean.push(*value);
        }
        mean
    }

    #[test]
    fn test_running_mean() {
        assert_eq!(mean_of(&[100.0, 200.0]).finite(String::new).unwrap(), 150.0);
        assert_eq!(mean_of(&[42.0]).finite(String::new).unwrap(), 42.0);
    }

    #[test]
    fn test_running_mean_of_huge_values_stays_finite() {
        let mean = mean_of(&[f64::MAX, f64::MAX, f64::MAX]);
        assert_eq!(mean.finite(String::new).unwrap(), f64::MAX);
    }

    #[test]
    fn test_running_mean_nan_is_an_error() {
        let result = mean_of(&[10.0, f64::NAN]).finite(|| "route SYD-MEL".to_string());
        assert!(
            matches!(result, Err(PipelineError::NonFiniteAggregate(what)) if what == "route SYD-MEL")
        );
    }
}
