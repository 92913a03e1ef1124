//! Single-slot cache for the current flight dataset.
//!
//! The slot is filled by the first request. Concurrent first requests may
//! each fetch; the last one to finish wins the slot. Fetching has no side
//! effects beyond returning data, so the race only costs redundant work.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use parking_lot::RwLock;

use crate::models::{Clock, FlightDataset};
use crate::source::{DatasetOrigin, FallbackSource};

/// When a cached dataset is considered stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Keep the first dataset for the lifetime of the cache.
    #[default]
    Never,
    /// Refetch once the dataset is older than this.
    MaxAge(Duration),
}

/// A dataset together with where and when it was obtained.
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub dataset: Arc<FlightDataset>,
    pub origin: DatasetOrigin,
    pub fetched_at: NaiveDateTime,
}

pub struct DatasetCache {
    source: FallbackSource,
    clock: Arc<dyn Clock>,
    policy: RefreshPolicy,
    slot: RwLock<Option<CachedDataset>>,
}

impl DatasetCache {
    pub fn new(source: FallbackSource, clock: Arc<dyn Clock>, policy: RefreshPolicy) -> Self {
        Self {
            source,
            clock,
            policy,
            slot: RwLock::new(None),
        }
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Return the cached dataset, fetching it first if the slot is empty or stale.
    pub async fn get_or_fetch(&self) -> CachedDataset {
        if let Some(cached) = self.fresh() {
            return cached;
        }

        let outcome = self.source.fetch().await;
        let cached = CachedDataset {
            origin: outcome.origin(),
            dataset: Arc::new(outcome.into_dataset()),
            fetched_at: self.clock.now(),
        };
        log::info!(
            "Cached {} dataset with {} flights",
            cached.origin,
            cached.dataset.len()
        );

        *self.slot.write() = Some(cached.clone());
        cached
    }

    /// Current slot contents, without fetching.
    pub fn snapshot(&self) -> Option<CachedDataset> {
        self.slot.read().clone()
    }

    /// Empty the slot so the next request refetches.
    pub fn invalidate(&self) {
        self.slot.write().take();
    }

    fn fresh(&self) -> Option<CachedDataset> {
        let slot = self.slot.read();
        let cached = slot.as_ref()?;
        self.is_fresh(cached).then(|| cached.clone())
    }

    fn is_fresh(&self, cached: &CachedDataset) -> bool {
        match self.policy {
            RefreshPolicy::Never => true,
            RefreshPolicy::MaxAge(max_age) => (self.clock.now() - cached.fetched_at)
                .to_std()
                // fetched_at in the future means the clock moved backwards
                .map(|age| age < max_age)
                .unwrap_or(true),
        }
    }
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetCache")
            .field("policy", &self.policy)
            .field("slot", &*self.slot.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightRecord, ManualClock};
    use crate::source::{FlightSource, SourceError, SourceResult, SyntheticGenerator};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FlightSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn fetch_flights(&self) -> SourceResult<FlightDataset> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SourceError::Timeout(Duration::from_secs(10)));
            }
            Ok(FlightDataset::new(vec![FlightRecord::new(
                None,
                "SYD",
                "MEL",
                100.0,
                Some("Qantas"),
                None,
                None,
            )]))
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn cache_with(
        source: Arc<CountingSource>,
        clock: Arc<ManualClock>,
        policy: RefreshPolicy,
    ) -> DatasetCache {
        let fallback = FallbackSource::new(source, SyntheticGenerator::new(clock.clone()));
        DatasetCache::new(fallback, clock, policy)
    }

    #[tokio::test]
    async fn test_fetches_once_and_returns_same_dataset() {
        let source = Arc::new(CountingSource::default());
        let clock = Arc::new(ManualClock::new(start()));
        let cache = cache_with(source.clone(), clock.clone(), RefreshPolicy::Never);

        assert!(cache.snapshot().is_none());
        let first = cache.get_or_fetch().await;
        clock.advance(chrono::Duration::days(30));
        let second = cache.get_or_fetch().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first.dataset, &second.dataset));
        assert_eq!(first.origin, DatasetOrigin::Live);
        assert_eq!(first.fetched_at, start());
    }

    #[tokio::test]
    async fn test_fallback_dataset_is_cached_too() {
        let source = Arc::new(CountingSource {
            fail: true,
            ..Default::default()
        });
        let clock = Arc::new(ManualClock::new(start()));
        let cache = cache_with(source.clone(), clock, RefreshPolicy::Never);

        let first = cache.get_or_fetch().await;
        let second = cache.get_or_fetch().await;

        assert_eq!(first.origin, DatasetOrigin::Synthetic);
        assert_eq!(first.dataset.len(), 50);
        assert!(Arc::ptr_eq(&first.dataset, &second.dataset));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_max_age_refetches_when_stale() {
        let source = Arc::new(CountingSource::default());
        let clock = Arc::new(ManualClock::new(start()));
        let cache = cache_with(
            source.clone(),
            clock.clone(),
            RefreshPolicy::MaxAge(Duration::from_secs(300)),
        );

        cache.get_or_fetch().await;
        clock.advance(chrono::Duration::seconds(299));
        cache.get_or_fetch().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        clock.advance(chrono::Duration::seconds(2));
        let refreshed = cache.get_or_fetch().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.fetched_at, start() + chrono::Duration::seconds(301));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = Arc::new(CountingSource::default());
        let clock = Arc::new(ManualClock::new(start()));
        let cache = cache_with(source.clone(), clock, RefreshPolicy::Never);

        cache.get_or_fetch().await;
        cache.invalidate();
        assert!(cache.snapshot().is_none());
        cache.get_or_fetch().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
