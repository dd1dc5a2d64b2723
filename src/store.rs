// src/store.rs
//! Bulletin Store: turns a `BulletinKey` into a validated `Bulletin` through
//! cache-first retrieval, and warms neighboring dates in the background.
//!
//! One store per session/process; clones are cheap handles onto the same
//! cache. The cache is the only mutable state; entries are written once after
//! full validation and never mutated, so a duplicate write from two
//! concurrent misses on the same key is a benign no-op.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::error::ResolveError;
use crate::fetch::{ContentFetch, FetchOutcome};
use crate::types::{Bulletin, BulletinKey};
use crate::validate;

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("bulletin_cache_hits_total", "Resolves served from cache.");
        describe_counter!(
            "bulletin_cache_misses_total",
            "Resolves that went to the provider."
        );
        describe_counter!(
            "bulletin_fetch_errors_total",
            "Provider fetch failures, including not-found."
        );
        describe_counter!(
            "bulletin_schema_rejects_total",
            "Payloads rejected by structural validation."
        );
        describe_counter!(
            "bulletin_prefetch_spawned_total",
            "Background neighbor loads spawned."
        );
    });
}

#[derive(Clone)]
pub struct BulletinStore {
    fetcher: Arc<dyn ContentFetch>,
    inner: Arc<RwLock<CacheInner>>,
    capacity: Option<usize>,
}

struct CacheInner {
    entries: HashMap<BulletinKey, Arc<Bulletin>>,
    order: VecDeque<BulletinKey>,
}

impl BulletinStore {
    /// Unbounded cache. A session touching the full 7-day window across every
    /// region and period tops out at a few dozen entries, so this is the
    /// default.
    pub fn new(fetcher: Arc<dyn ContentFetch>) -> Self {
        Self::build(fetcher, None)
    }

    /// Bounded cache; the oldest-inserted entry is evicted past `cap`.
    pub fn with_capacity(fetcher: Arc<dyn ContentFetch>, cap: usize) -> Self {
        Self::build(fetcher, Some(cap.max(1)))
    }

    fn build(fetcher: Arc<dyn ContentFetch>, capacity: Option<usize>) -> Self {
        ensure_metrics_described();
        Self {
            fetcher,
            inner: Arc::new(RwLock::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
            })),
            capacity,
        }
    }

    /// Cache-first resolution. On a miss, fetches the key's resource, parses
    /// and validates it, and caches only a fully valid bulletin. All four
    /// failure kinds surface to the caller; nothing is retried here.
    pub async fn resolve(&self, key: &BulletinKey) -> Result<Arc<Bulletin>, ResolveError> {
        if let Some(hit) = self.cached(key) {
            counter!("bulletin_cache_hits_total").increment(1);
            tracing::debug!(%key, "bulletin cache hit");
            return Ok(hit);
        }
        counter!("bulletin_cache_misses_total").increment(1);

        let body = match self.fetcher.fetch(&key.resource_path()).await {
            FetchOutcome::Ok(body) => body,
            FetchOutcome::NotFound => {
                counter!("bulletin_fetch_errors_total").increment(1);
                tracing::debug!(%key, "bulletin not yet published");
                return Err(ResolveError::NotFound(*key));
            }
            FetchOutcome::Failed(reason) => {
                counter!("bulletin_fetch_errors_total").increment(1);
                tracing::warn!(%key, %reason, "bulletin fetch failed");
                return Err(ResolveError::FetchFailed(reason));
            }
        };

        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(%key, error = %e, "bulletin body is not json");
            ResolveError::MalformedPayload(e.to_string())
        })?;

        let bulletin = validate::validate(&raw).map_err(|e| {
            counter!("bulletin_schema_rejects_total").increment(1);
            tracing::warn!(%key, error = %e, "bulletin rejected by validation");
            e
        })?;

        let entry = Arc::new(bulletin);
        self.insert(*key, Arc::clone(&entry));
        tracing::info!(%key, articles = entry.articles.len(), "bulletin cached");
        Ok(entry)
    }

    /// Lightweight existence probe. A cached key trivially exists; otherwise
    /// this asks the provider head-only. Never raises; transport trouble is
    /// "does not exist".
    pub async fn exists(&self, key: &BulletinKey) -> bool {
        if self.cached(key).is_some() {
            return true;
        }
        self.fetcher.probe(&key.resource_path()).await
    }

    /// Fire-and-forget warm-up of the dates adjacent to `key`, region and
    /// period held constant. Each neighbor resolves on its own detached task;
    /// results and failures are discarded, and the caller is never slowed.
    /// Re-prefetching a cached or in-flight key is a cheap no-op because the
    /// spawned `resolve` hits the cache check first.
    pub fn prefetch(&self, key: &BulletinKey) {
        let neighbors = [key.date.pred_opt(), key.date.succ_opt()];
        for date in neighbors.into_iter().flatten() {
            let neighbor = BulletinKey::new(key.region, date, key.period);
            let store = self.clone();
            counter!("bulletin_prefetch_spawned_total").increment(1);
            tokio::spawn(async move {
                if let Err(e) = store.resolve(&neighbor).await {
                    tracing::debug!(key = %neighbor, error = %e, "prefetch skipped");
                }
            });
        }
    }

    /// Empties the cache unconditionally. Operator action; there is no
    /// per-key invalidation at this layer.
    pub fn clear(&self) {
        let mut inner = self.inner.write().expect("cache lock poisoned");
        inner.entries.clear();
        inner.order.clear();
        tracing::info!("bulletin cache cleared");
    }

    pub fn contains(&self, key: &BulletinKey) -> bool {
        self.cached(key).is_some()
    }

    pub fn cached_count(&self) -> usize {
        self.inner.read().expect("cache lock poisoned").entries.len()
    }

    fn cached(&self, key: &BulletinKey) -> Option<Arc<Bulletin>> {
        self.inner
            .read()
            .expect("cache lock poisoned")
            .entries
            .get(key)
            .cloned()
    }

    fn insert(&self, key: BulletinKey, value: Arc<Bulletin>) {
        let mut inner = self.inner.write().expect("cache lock poisoned");
        if inner.entries.insert(key, value).is_none() {
            inner.order.push_back(key);
        }
        if let Some(cap) = self.capacity {
            while inner.entries.len() > cap {
                match inner.order.pop_front() {
                    Some(oldest) => {
                        inner.entries.remove(&oldest);
                        tracing::debug!(key = %oldest, "evicted oldest cache entry");
                    }
                    None => break,
                }
            }
        }
    }
}
