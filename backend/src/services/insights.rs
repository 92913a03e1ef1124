use std::collections::BTreeMap;

use chrono::Timelike;

use super::{PipelineError, RunningMean};
use crate::models::FlightDataset;
use crate::routes::insights::{
    AirlineCount, Insight, InsightSummary, PeakWindow, RouteDeal, NO_AIRLINE_DATA,
    NO_ROUTE_PRICE_DATA, NO_TIME_DATA,
};

/// Number of entries in the best-deal and top-airline lists.
pub const TOP_N: usize = 3;

/// Count flights per departure hour and pick the busiest.
///
/// Ties go to the earliest hour.
pub(crate) fn compute_peak_hour(dataset: &FlightDataset) -> Insight<PeakWindow> {
    let mut per_hour: BTreeMap<u32, usize> = BTreeMap::new();
    for ts in dataset.iter().filter_map(|r| r.scheduled_time) {
        *per_hour.entry(ts.hour()).or_default() += 1;
    }

    // BTreeMap iterates by ascending hour, and max_by_key keeps the last
    // maximum, so iterate in reverse to keep the first.
    per_hour
        .into_iter()
        .rev()
        .max_by_key(|&(_, flights)| flights)
        .map(|(hour, flights)| Insight::Computed(PeakWindow { hour, flights }))
        .unwrap_or_else(|| Insight::missing(NO_TIME_DATA))
}

/// Mean price per route.
pub(crate) fn mean_price_by_route(
    dataset: &FlightDataset,
) -> Result<Vec<RouteDeal>, PipelineError> {
    let mut totals: BTreeMap<&str, RunningMean> = BTreeMap::new();
    for record in dataset {
        totals
            .entry(record.route.as_str())
            .or_default()
            .push(record.price);
    }

    totals
        .into_iter()
        .map(|(route, mean)| {
            Ok(RouteDeal {
                route: route.to_string(),
                mean_price: mean.finite(|| format!("mean price for route {}", route))?,
            })
        })
        .collect()
}

/// The cheapest routes by mean price, ascending.
pub(crate) fn compute_best_deals(
    dataset: &FlightDataset,
) -> Result<Insight<Vec<RouteDeal>>, PipelineError> {
    if dataset.is_empty() {
        return Ok(Insight::missing(NO_ROUTE_PRICE_DATA));
    }

    let mut deals = mean_price_by_route(dataset)?;
    // stable sort keeps alphabetical order between equal means
    deals.sort_by(|a, b| a.mean_price.total_cmp(&b.mean_price));
    deals.truncate(TOP_N);
    Ok(Insight::Computed(deals))
}

/// Flights per airline, busiest first, ties alphabetical.
pub(crate) fn count_by_airline(dataset: &FlightDataset) -> Vec<AirlineCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in dataset {
        *counts.entry(record.airline.as_str()).or_default() += 1;
    }

    let mut counts: Vec<AirlineCount> = counts
        .into_iter()
        .map(|(airline, flights)| AirlineCount {
            airline: airline.to_string(),
            flights,
        })
        .collect();
    counts.sort_by(|a, b| b.flights.cmp(&a.flights));
    counts
}

pub(crate) fn compute_top_airlines(dataset: &FlightDataset) -> Insight<Vec<AirlineCount>> {
    if dataset.is_empty() {
        return Insight::missing(NO_AIRLINE_DATA);
    }

    let mut counts = count_by_airline(dataset);
    counts.truncate(TOP_N);
    Insight::Computed(counts)
}

fn try_summarize(dataset: &FlightDataset) -> Result<InsightSummary, PipelineError> {
    Ok(InsightSummary {
        peak_hour_window: compute_peak_hour(dataset),
        best_deals: compute_best_deals(dataset)?,
        top_airlines: compute_top_airlines(dataset),
    })
}

/// Derive the insight cards for a dataset.
///
/// Dimensions with nothing to work from carry their own sentinel. If any
/// computation fails, every dimension is reported unavailable.
pub fn summarize(dataset: &FlightDataset) -> InsightSummary {
    try_summarize(dataset).unwrap_or_else(|e| {
        log::warn!("Insight generation error: {}", e);
        InsightSummary::unavailable()
    })
}
