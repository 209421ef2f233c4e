// Time-boxed query memoization

use crate::application::query_repository::{QueryError, QueryRepository};
use crate::domain::table::Table;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Clock seam so expiry is testable without wall-clock sleeps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    stored_at: Instant,
    table: Table,
}

/// Memo cache keyed by exact query text. An entry is served for any lookup
/// within `ttl` of when it was stored; the first lookup after expiry misses
/// and the refreshed result replaces it. No capacity bound, no LRU: the
/// key space is the fixed query catalog.
pub struct QueryCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn lookup(&self, key: &str) -> Option<Table> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap();

        match entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Some(entry.table.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn store(&self, key: &str, table: Table) {
        let entry = CacheEntry {
            stored_at: self.clock.now(),
            table,
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
    }
}

/// Repository wrapper applying the memoization window in front of any
/// engine-backed repository.
pub struct CachedRepository {
    inner: Arc<dyn QueryRepository>,
    cache: QueryCache,
}

impl CachedRepository {
    pub fn new(inner: Arc<dyn QueryRepository>, cache: QueryCache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl QueryRepository for CachedRepository {
    async fn fetch_table(&self, sql: &str) -> Result<Table, QueryError> {
        if let Some(table) = self.cache.lookup(sql) {
            tracing::debug!("Cache hit, skipping engine round-trip");
            return Ok(table);
        }

        let table = self.inner.fetch_table(sql).await?;
        self.cache.store(sql, table.clone());
        Ok(table)
    }
}
