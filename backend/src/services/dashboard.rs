use chrono::NaiveDateTime;

use super::{charts, filter, insights, PipelineError};
use crate::models::{format_minutes, FlightDataset};
use crate::routes::dashboard::{DashboardView, FlightRow, RawFilters};
use crate::routes::insights::InsightsView;

fn try_build(
    dataset: &FlightDataset,
    raw: &RawFilters,
    now: &NaiveDateTime,
) -> Result<DashboardView, PipelineError> {
    let criteria = filter::FilterCriteria::from_raw(raw);
    let filtered = filter::apply(dataset, &criteria);

    let charts = charts::summarize_for_charts(&filtered)?.to_payloads();
    let insights = InsightsView::from(&insights::summarize(&filtered));
    let flights = filtered.iter().map(FlightRow::from).collect();

    Ok(DashboardView {
        charts,
        insights,
        flights,
        routes: filtered.routes(),
        airlines: filtered.airlines(),
        current_filters: raw.clone(),
        last_updated: format_minutes(now),
    })
}

/// Build the dashboard view for one request.
///
/// Never fails: a pipeline error is logged and replaced by
/// [`DashboardView::fallback`], which still echoes the submitted filters.
pub fn render_dashboard(
    dataset: &FlightDataset,
    raw: &RawFilters,
    now: &NaiveDateTime,
) -> DashboardView {
    match try_build(dataset, raw, now) {
        Ok(view) => {
            log::debug!(
                "Rendered dashboard: {} of {} flights after filtering",
                view.flights.len(),
                dataset.len()
            );
            view
        }
        Err(e) => {
            log::error!("Dashboard pipeline error: {}", e);
            DashboardView::fallback(raw.clone(), now)
        }
    }
}
