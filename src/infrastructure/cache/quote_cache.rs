//! # Quote Cache
//!
//! Time-bounded in-memory cache of normalized quotes, keyed by [`Symbol`].
//!
//! An entry is served only while its age is strictly below the TTL. Stale
//! entries stay in the map until overwritten by the next successful fetch;
//! they are never returned. The map is unbounded: it holds at most one
//! entry per distinct symbol ever fetched successfully.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use quote_proxy::infrastructure::cache::QuoteCache;
//!
//! let cache = QuoteCache::new(Duration::from_secs(15));
//! assert!(cache.is_empty());
//! ```

use crate::domain::entities::QuoteRecord;
use crate::domain::value_objects::{Symbol, Timestamp};
use dashmap::DashMap;
use std::time::Duration;

/// A cached record and the moment it was fetched.
#[derive(Debug, Clone)]
struct CacheEntry {
    record: QuoteRecord,
    fetched_at: Timestamp,
}

impl CacheEntry {
    fn is_fresh_at(&self, now: &Timestamp, ttl: Duration) -> bool {
        now.elapsed_since(&self.fetched_at) < ttl
    }
}

/// Concurrent TTL cache of quotes.
///
/// # Thread Safety
///
/// Backed by [`DashMap`]; share it across tasks through an `Arc`.
#[derive(Debug)]
pub struct QuoteCache {
    entries: DashMap<Symbol, CacheEntry>,
    ttl: Duration,
}

impl QuoteCache {
    /// Creates an empty cache with the given time-to-live.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the configured time-to-live.
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the record for `symbol` if it is still fresh.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<QuoteRecord> {
        self.get_at(symbol, Timestamp::now())
    }

    /// Returns the record for `symbol` if it is fresh at `now`.
    #[must_use]
    pub fn get_at(&self, symbol: &Symbol, now: Timestamp) -> Option<QuoteRecord> {
        self.entries
            .get(symbol)
            .filter(|entry| entry.is_fresh_at(&now, self.ttl))
            .map(|entry| entry.record.clone())
    }

    /// Stores `record` under `symbol`, fetched now.
    pub fn put(&self, symbol: Symbol, record: QuoteRecord) {
        self.put_at(symbol, record, Timestamp::now());
    }

    /// Stores `record` under `symbol`, fetched at `fetched_at`.
    ///
    /// Replaces any previous entry for the symbol.
    pub fn put_at(&self, symbol: Symbol, record: QuoteRecord, fetched_at: Timestamp) {
        self.entries.insert(symbol, CacheEntry { record, fetched_at });
    }

    /// Returns the number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::QuoteRecordBuilder;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(15);

    fn symbol(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn record(s: &str, cents: i64) -> QuoteRecord {
        QuoteRecordBuilder::new(symbol(s), Decimal::new(cents, 2))
            .build()
            .unwrap()
    }

    fn t0() -> Timestamp {
        Timestamp::from_secs(1_700_000_000).unwrap()
    }

    mod freshness {
        use super::*;

        #[test]
        fn fresh_entry_is_served() {
            let cache = QuoteCache::new(TTL);
            cache.put_at(symbol("AAPL"), record("AAPL", 18998), t0());

            let hit = cache.get_at(&symbol("AAPL"), t0().add_secs(14));

            assert_eq!(hit.unwrap().price(), Decimal::new(18998, 2));
        }

        #[test]
        fn entry_at_exact_ttl_is_stale() {
            let cache = QuoteCache::new(TTL);
            cache.put_at(symbol("AAPL"), record("AAPL", 18998), t0());

            assert!(cache.get_at(&symbol("AAPL"), t0().add_secs(15)).is_none());
        }

        #[test]
        fn stale_entry_is_kept_but_ignored() {
            let cache = QuoteCache::new(TTL);
            cache.put_at(symbol("AAPL"), record("AAPL", 18998), t0());

            assert!(cache.get_at(&symbol("AAPL"), t0().add_secs(60)).is_none());
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn zero_ttl_never_serves() {
            let cache = QuoteCache::new(Duration::ZERO);
            cache.put(symbol("AAPL"), record("AAPL", 100));

            assert!(cache.get(&symbol("AAPL")).is_none());
        }

        #[test]
        fn put_replaces_and_refreshes() {
            let cache = QuoteCache::new(TTL);
            cache.put_at(symbol("AAPL"), record("AAPL", 100), t0());
            cache.put_at(symbol("AAPL"), record("AAPL", 200), t0().add_secs(30));

            let hit = cache.get_at(&symbol("AAPL"), t0().add_secs(40)).unwrap();

            assert_eq!(hit.price(), Decimal::new(200, 2));
            assert_eq!(cache.len(), 1);
        }
    }

    mod keys {
        use super::*;

        #[test]
        fn lookup_is_case_insensitive_through_symbol() {
            let cache = QuoteCache::new(TTL);
            cache.put(symbol("aapl"), record("AAPL", 100));

            assert!(cache.get(&symbol("AAPL")).is_some());
        }

        #[test]
        fn miss_for_unknown_symbol() {
            let cache = QuoteCache::new(TTL);
            assert!(cache.get(&symbol("MSFT")).is_none());
        }

        #[test]
        fn clear_empties_cache() {
            let cache = QuoteCache::new(TTL);
            cache.put(symbol("AAPL"), record("AAPL", 100));
            cache.put(symbol("MSFT"), record("MSFT", 100));
            assert_eq!(cache.len(), 2);

            cache.clear();

            assert!(cache.is_empty());
        }
    }

    #[tokio::test]
    async fn concurrent_writers() {
        let cache = Arc::new(QuoteCache::new(TTL));
        let handles: Vec<_> = ["AAPL", "MSFT", "NVDA", "META"]
            .into_iter()
            .map(|s| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.put(symbol(s), record(s, 100)) })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 4);
        assert!(cache.get(&symbol("NVDA")).is_some());
    }
}
