use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use super::insights::count_by_airline;
use super::{PipelineError, RunningMean};
use crate::models::{floor_to_bucket, FlightDataset, BUCKET_HOURS};
use crate::routes::charts::{ChartTables, PricePoint, RouteCount};

/// Number of bars in the busiest-routes chart.
pub const TOP_ROUTES: usize = 5;

/// Flights per route, busiest first, ties alphabetical, top [`TOP_ROUTES`].
pub(crate) fn compute_route_counts(dataset: &FlightDataset) -> Vec<RouteCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in dataset {
        *counts.entry(record.route.as_str()).or_default() += 1;
    }

    let mut counts: Vec<RouteCount> = counts
        .into_iter()
        .map(|(route, flights)| RouteCount {
            route: route.to_string(),
            flights,
        })
        .collect();
    counts.sort_by(|a, b| b.flights.cmp(&a.flights));
    counts.truncate(TOP_ROUTES);
    counts
}

/// Mean price per 6-hour window, in chronological order.
///
/// Flights without a schedule time are skipped and windows without flights
/// are left out rather than zero-filled.
pub(crate) fn compute_price_trend(
    dataset: &FlightDataset,
) -> Result<Vec<PricePoint>, PipelineError> {
    let mut buckets: BTreeMap<NaiveDateTime, RunningMean> = BTreeMap::new();
    for record in dataset {
        let Some(ts) = record.scheduled_time else {
            continue;
        };
        buckets
            .entry(floor_to_bucket(&ts, BUCKET_HOURS))
            .or_default()
            .push(record.price);
    }

    buckets
        .into_iter()
        .map(|(bucket_start, mean)| {
            Ok(PricePoint {
                bucket_start,
                mean_price: mean
                    .finite(|| format!("mean price for bucket starting {}", bucket_start))?,
            })
        })
        .collect()
}

/// Reduce a dataset into the three chart tables.
///
/// An empty dataset yields empty tables.
pub fn summarize_for_charts(dataset: &FlightDataset) -> Result<ChartTables, PipelineError> {
    if dataset.is_empty() {
        return Ok(ChartTables::default());
    }

    Ok(ChartTables {
        route_counts: compute_route_counts(dataset),
        price_trend: compute_price_trend(dataset)?,
        airline_share: count_by_airline(dataset),
    })
}
