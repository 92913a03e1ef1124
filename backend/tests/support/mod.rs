#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use flight_dash::cache::{DatasetCache, RefreshPolicy};
use flight_dash::models::{Clock, FlightDataset, FlightRecord, ManualClock};
use flight_dash::source::{
    FallbackSource, FlightSource, SourceError, SourceResult, SyntheticGenerator,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// 2024-05-01 09:30:00
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(fixed_now()))
}

/// A live source that is always down.
pub struct OfflineSource;

#[async_trait]
impl FlightSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    async fn fetch_flights(&self) -> SourceResult<FlightDataset> {
        Err(SourceError::Network("connection refused".to_string()))
    }
}

/// A live source that always returns the same flights.
pub struct StaticSource(pub FlightDataset);

#[async_trait]
impl FlightSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_flights(&self) -> SourceResult<FlightDataset> {
        Ok(self.0.clone())
    }
}

/// Three flights on two routes, all on 2024-05-01.
pub fn small_dataset() -> FlightDataset {
    let at = |h| NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(h, 0, 0));
    FlightDataset::new(vec![
        FlightRecord::new(
            at(8),
            "SYD",
            "MEL",
            120.0,
            Some("Qantas"),
            Some("QF401"),
            Some("scheduled"),
        ),
        FlightRecord::new(
            at(13),
            "MEL",
            "BNE",
            90.0,
            Some("Jetstar"),
            Some("JQ570"),
            Some("active"),
        ),
        FlightRecord::new(
            at(8),
            "SYD",
            "MEL",
            160.0,
            Some("Jetstar"),
            Some("JQ502"),
            None,
        ),
    ])
}

pub fn cache_with(primary: Arc<dyn FlightSource>, clock: Arc<dyn Clock>) -> Arc<DatasetCache> {
    let source = FallbackSource::new(primary, SyntheticGenerator::new(clock.clone()));
    Arc::new(DatasetCache::new(source, clock, RefreshPolicy::Never))
}
