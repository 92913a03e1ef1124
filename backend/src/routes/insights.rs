use serde::{Deserialize, Serialize};

// =========================================================
// Insights types
// =========================================================

pub const NO_TIME_DATA: &str = "No time data";
pub const NO_ROUTE_PRICE_DATA: &str = "No route/price data";
pub const NO_AIRLINE_DATA: &str = "No airline data";
pub const DATA_UNAVAILABLE: &str = "Data unavailable";
pub const NO_DATA: &str = "No data";

/// Outcome of one insight dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Insight<T> {
    Computed(T),
    /// The dataset carries nothing to compute this from.
    Missing(String),
    /// Computation failed somewhere in the summary.
    Unavailable,
}

impl<T> Insight<T> {
    pub fn missing(sentinel: &str) -> Self {
        Insight::Missing(sentinel.to_string())
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            Insight::Computed(value) => Some(value),
            _ => None,
        }
    }

    fn render(&self, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Insight::Computed(value) => f(value),
            Insight::Missing(sentinel) => sentinel.clone(),
            Insight::Unavailable => DATA_UNAVAILABLE.to_string(),
        }
    }
}

/// Busiest departure hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub hour: u32,
    pub flights: usize,
}

impl std::fmt::Display for PeakWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:00-{}:00", self.hour, self.hour + 1)
    }
}

/// Mean price of one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDeal {
    pub route: String,
    pub mean_price: f64,
}

impl std::fmt::Display for RouteDeal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // truncated, not rounded
        write!(f, "{} (${:.0})", self.route, self.mean_price.trunc())
    }
}

/// Number of flights operated by one airline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineCount {
    pub airline: String,
    pub flights: usize,
}

impl std::fmt::Display for AirlineCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} flights)", self.airline, self.flights)
    }
}

/// Summary insights over a (filtered) dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub peak_hour_window: Insight<PeakWindow>,
    /// At most three routes, cheapest first.
    pub best_deals: Insight<Vec<RouteDeal>>,
    /// At most three airlines, busiest first.
    pub top_airlines: Insight<Vec<AirlineCount>>,
}

impl InsightSummary {
    pub fn unavailable() -> Self {
        Self {
            peak_hour_window: Insight::Unavailable,
            best_deals: Insight::Unavailable,
            top_airlines: Insight::Unavailable,
        }
    }

    pub fn to_view(&self) -> InsightsView {
        InsightsView {
            peak_hour_window: self.peak_hour_window.render(|w| w.to_string()),
            best_deals: self.best_deals.render(|deals| join(deals)),
            top_airlines: self.top_airlines.render(|airlines| join(airlines)),
        }
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display strings for the insight cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsView {
    pub peak_hour_window: String,
    pub best_deals: String,
    pub top_airlines: String,
}

impl InsightsView {
    pub fn no_data() -> Self {
        Self {
            peak_hour_window: NO_DATA.to_string(),
            best_deals: NO_DATA.to_string(),
            top_airlines: NO_DATA.to_string(),
        }
    }
}

impl From<&InsightSummary> for InsightsView {
    fn from(summary: &InsightSummary) -> Self {
        summary.to_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_window_display() {
        assert_eq!(PeakWindow { hour: 8, flights: 3 }.to_string(), "8:00-9:00");
        assert_eq!(PeakWindow { hour: 23, flights: 1 }.to_string(), "23:00-24:00");
    }

    #[test]
    fn test_route_deal_truncates_price() {
        let deal = RouteDeal {
            route: "SYD-MEL".to_string(),
            mean_price: 150.99,
        };
        assert_eq!(deal.to_string(), "SYD-MEL ($150)");

        let deal = RouteDeal {
            route: "SYD-MEL".to_string(),
            mean_price: 1e20,
        };
        assert_eq!(deal.to_string(), "SYD-MEL ($100000000000000000000)");
    }

    #[test]
    fn test_view_rendering() {
        let summary = InsightSummary {
            peak_hour_window: Insight::missing(NO_TIME_DATA),
            best_deals: Insight::Computed(vec![
                RouteDeal {
                    route: "MEL-BNE".to_string(),
                    mean_price: 99.5,
                },
                RouteDeal {
                    route: "SYD-MEL".to_string(),
                    mean_price: 150.0,
                },
            ]),
            top_airlines: Insight::Computed(vec![AirlineCount {
                airline: "Rex".to_string(),
                flights: 4,
            }]),
        };

        let view = summary.to_view();
        assert_eq!(view.peak_hour_window, NO_TIME_DATA);
        assert_eq!(view.best_deals, "MEL-BNE ($99), SYD-MEL ($150)");
        assert_eq!(view.top_airlines, "Rex (4 flights)");
    }

    #[test]
    fn test_unavailable_view() {
        let view = InsightSummary::unavailable().to_view();
        assert_eq!(view.peak_hour_window, DATA_UNAVAILABLE);
        assert_eq!(view.best_deals, DATA_UNAVAILABLE);
        assert_eq!(view.top_airlines, DATA_UNAVAILABLE);
    }
}
