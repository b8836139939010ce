//! Bounded LRU cache of computed days

use chrono::NaiveDate;
use log::debug;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::{Location, PanchangDay};
use crate::tradition::Tradition;

/// Coordinates are keyed at micro-degree resolution (about 11 cm)
const COORDINATE_SCALE: f64 = 1.0e6;

/// Identity of one computed day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub date: NaiveDate,
    pub latitude_micro: i64,
    pub longitude_micro: i64,
    pub timezone: String,
    pub tradition: Tradition,
}

impl CacheKey {
    pub fn new(date: NaiveDate, location: &Location, tradition: Tradition) -> Self {
        Self {
            date,
            latitude_micro: (location.latitude * COORDINATE_SCALE).round() as i64,
            longitude_micro: (location.longitude * COORDINATE_SCALE).round() as i64,
            timezone: location.timezone.clone(),
            tradition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Thread-safe LRU of shared, immutable [`PanchangDay`] values
///
/// Each get and put holds the lock only for the map operation. Two threads
/// missing on the same key both compute and the later put wins.
pub struct PanchangCache {
    days: Mutex<LruCache<CacheKey, Arc<PanchangDay>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PanchangCache {
    /// A zero capacity is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            days: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<PanchangDay>> {
        let found = self.days.lock().get(key).cloned();
        match found {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for {} ({})", key.date, key.tradition);
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for {} ({})", key.date, key.tradition);
            }
        }
        found
    }

    pub fn put(&self, key: CacheKey, day: Arc<PanchangDay>) {
        self.days.lock().put(key, day);
    }

    pub fn clear(&self) {
        self.days.lock().clear();
        debug!("Cache cleared");
    }

    pub fn len(&self) -> usize {
        self.days.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.days.lock().cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        let days = self.days.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: days.len(),
            capacity: days.cap().get(),
        }
    }
}

impl std::fmt::Debug for PanchangCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanchangCache")
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_resolution() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        let delhi = Location::delhi();
        let nudged = Location::new(delhi.latitude + 1e-9, delhi.longitude, &delhi.timezone);
        let moved = Location::new(delhi.latitude + 0.01, delhi.longitude, &delhi.timezone);

        let key = CacheKey::new(date, &delhi, Tradition::NorthIndian);
        assert_eq!(key, CacheKey::new(date, &nudged, Tradition::NorthIndian));
        assert_ne!(key, CacheKey::new(date, &moved, Tradition::NorthIndian));
        assert_ne!(key, CacheKey::new(date, &delhi, Tradition::Tamil));
        assert_ne!(key, CacheKey::new(date.succ_opt().unwrap(), &delhi, Tradition::NorthIndian));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let cache = PanchangCache::new(0);
        assert_eq!(cache.capacity(), 1);
        assert!(cache.is_empty());
    }
}
