use serde::{Deserialize, Serialize};

use crate::models::{FlightDataset, FlightRecord};
use crate::routes::dashboard::RawFilters;

/// How a submitted price bound was interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PriceBound {
    /// Nothing submitted.
    Absent,
    Applied(f64),
    /// Submitted but not a finite number; left unapplied.
    Ignored(String),
}

impl PriceBound {
    /// Parse a form value permissively.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return PriceBound::Absent;
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => PriceBound::Applied(value),
            _ => PriceBound::Ignored(raw.to_string()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            PriceBound::Applied(value) => Some(*value),
            _ => None,
        }
    }
}

/// Constraints narrowing the dataset for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub route: Option<String>,
    pub min_price: PriceBound,
    pub max_price: PriceBound,
    pub airline: Option<String>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            route: None,
            min_price: PriceBound::Absent,
            max_price: PriceBound::Absent,
            airline: None,
        }
    }
}

impl FilterCriteria {
    pub fn from_raw(raw: &RawFilters) -> Self {
        Self {
            route: non_empty(&raw.route),
            min_price: PriceBound::parse(&raw.min_price),
            max_price: PriceBound::parse(&raw.max_price),
            airline: non_empty(&raw.airline),
        }
    }

    /// Bounds that were submitted but could not be used, by field name.
    pub fn ignored_bounds(&self) -> Vec<(&'static str, &str)> {
        [("min_price", &self.min_price), ("max_price", &self.max_price)]
            .into_iter()
            .filter_map(|(name, bound)| match bound {
                PriceBound::Ignored(raw) => Some((name, raw.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn matches(&self, record: &FlightRecord) -> bool {
        self.route.as_ref().map_or(true, |route| &record.route == route)
            && self.min_price.value().map_or(true, |min| record.price >= min)
            && self.max_price.value().map_or(true, |max| record.price <= max)
            && self.airline.as_ref().map_or(true, |airline| &record.airline == airline)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Return the records matching every criterion, in their original order.
pub fn apply(dataset: &FlightDataset, criteria: &FilterCriteria) -> FlightDataset {
    for (field, raw) in criteria.ignored_bounds() {
        log::debug!("Ignoring non-numeric {} filter value {:?}", field, raw);
    }

    dataset
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(route: &str, price: f64, airline: &str) -> FlightRecord {
        let (origin, destination) = route.split_once('-').unwrap_or((route, ""));
        FlightRecord::new(None, origin, destination, price, Some(airline), None, None)
    }

    fn sample() -> FlightDataset {
        FlightDataset::new(vec![
            record("SYD-MEL", 40.0, "Qantas"),
            record("MEL-BNE", 60.0, "Jetstar"),
            record("SYD-MEL", 80.0, "Jetstar"),
        ])
    }

    fn raw(route: &str, min: &str, max: &str, airline: &str) -> RawFilters {
        RawFilters {
            route: route.to_string(),
            min_price: min.to_string(),
            max_price: max.to_string(),
            airline: airline.to_string(),
        }
    }

    #[test]
    fn test_price_bound_parse() {
        assert_eq!(PriceBound::parse(""), PriceBound::Absent);
        assert_eq!(PriceBound::parse("   "), PriceBound::Absent);
        assert_eq!(PriceBound::parse(" 50 "), PriceBound::Applied(50.0));
        assert_eq!(PriceBound::parse("1e2"), PriceBound::Applied(100.0));
        assert_eq!(
            PriceBound::parse("not-a-number"),
            PriceBound::Ignored("not-a-number".to_string())
        );
        assert_eq!(PriceBound::parse("NaN"), PriceBound::Ignored("NaN".to_string()));
        assert_eq!(PriceBound::parse("inf"), PriceBound::Ignored("inf".to_string()));
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let dataset = sample();
        let filtered = apply(&dataset, &FilterCriteria::from_raw(&RawFilters::default()));
        assert_eq!(filtered, dataset);
    }

    #[test]
    fn test_route_filter() {
        let filtered = apply(&sample(), &FilterCriteria::from_raw(&raw("SYD-MEL", "", "", "")));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.route == "SYD-MEL"));
    }

    #[test]
    fn test_unknown_route_yields_empty() {
        let filtered = apply(&sample(), &FilterCriteria::from_raw(&raw("PER-ADL", "", "", "")));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_min_applied_max_ignored() {
        let criteria = FilterCriteria::from_raw(&raw("", "50", "not-a-number", ""));
        assert_eq!(criteria.ignored_bounds(), vec![("max_price", "not-a-number")]);

        let prices: Vec<f64> = apply(&sample(), &criteria).iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![60.0, 80.0]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let criteria = FilterCriteria::from_raw(&raw("", "60", "80", ""));
        let prices: Vec<f64> = apply(&sample(), &criteria).iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![60.0, 80.0]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let criteria = FilterCriteria::from_raw(&raw("SYD-MEL", "", "", "Jetstar"));
        let filtered = apply(&sample(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].price, 80.0);
    }

    #[test]
    fn test_original_dataset_untouched() {
        let dataset = sample();
        let _ = apply(&dataset, &FilterCriteria::from_raw(&raw("MEL-BNE", "", "", "")));
        assert_eq!(dataset.len(), 3);
    }
}
