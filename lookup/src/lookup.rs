use crate::backend::SearchBackend;
use crate::error::LookupError;
use crate::error::Result;
use lru::LruCache;
use scout_filter_types::Entity;
use scout_filter_types::EntityKind;
use scout_filter_types::SharedNameTable;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tracing::debug;

/// Timing and sizing knobs for [`RemoteLookup`].
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Quiet interval a query must survive before a request is issued.
    pub debounce: Duration,

    /// Minimum query length for location search.
    pub location_min_query: usize,

    /// Minimum query length for handle search.
    pub handle_min_query: usize,

    /// Capacity of the per-`(kind, query)` result cache.
    pub cache_size: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            location_min_query: 2,
            handle_min_query: 3,
            cache_size: 64,
        }
    }
}

impl LookupConfig {
    fn min_query_len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Location => self.location_min_query,
            EntityKind::Handle => self.handle_min_query,
        }
    }
}

/// What a `search` call resolved to.
///
/// `Superseded` is internal bookkeeping, not an error: a newer query
/// took over while this one was debouncing or in flight, and its result
/// must not be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Hits(Vec<Entity>),
    Superseded,
}

impl LookupOutcome {
    pub fn is_superseded(&self) -> bool {
        matches!(self, LookupOutcome::Superseded)
    }

    pub fn hits(&self) -> Option<&[Entity]> {
        match self {
            LookupOutcome::Hits(entities) => Some(entities),
            LookupOutcome::Superseded => None,
        }
    }
}

/// Debounced, supersession-aware search over an external backend.
///
/// One instance serves every search widget in the panel; per-kind
/// bookkeeping keeps location and handle searches from superseding each
/// other. Clone-cheap via internal sharing is deliberately not provided;
/// callers hold it behind an `Arc`.
pub struct RemoteLookup {
    config: LookupConfig,
    backend: Arc<dyn SearchBackend>,
    names: SharedNameTable,
    seq: AtomicU64,
    latest: Mutex<HashMap<EntityKind, u64>>,
    cache: Mutex<LruCache<(EntityKind, String), Vec<Entity>>>,
}

impl RemoteLookup {
    pub fn new(backend: Arc<dyn SearchBackend>, names: SharedNameTable) -> Self {
        Self::with_config(LookupConfig::default(), backend, names)
    }

    pub fn with_config(
        config: LookupConfig,
        backend: Arc<dyn SearchBackend>,
        names: SharedNameTable,
    ) -> Self {
        let capacity = NonZeroUsize::new(config.cache_size.max(1))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            backend,
            names,
            seq: AtomicU64::new(0),
            latest: Mutex::new(HashMap::new()),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Searches for entities matching `query`.
    ///
    /// Short queries resolve to empty hits with no network activity,
    /// but still count as the newest query for their kind. A result is
    /// only returned (and only then merged into the shared name table)
    /// if no newer query for the same kind was issued while this one
    /// was debouncing or awaiting its response.
    pub async fn search(&self, kind: EntityKind, query: &str) -> Result<LookupOutcome> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_len(kind) {
            // The user moved on to this query, so an older in-flight
            // request must be discarded when it lands.
            self.claim_latest(kind);
            return Ok(LookupOutcome::Hits(Vec::new()));
        }

        if let Some(hits) = self.cache_get(kind, query) {
            // A cache hit still moves the caller's interest to this
            // query, so an older in-flight request must be discarded
            // when it lands. Merge before returning: the table may have
            // been cleared since the hits were first cached.
            self.claim_latest(kind);
            self.names.merge_results(kind, &hits);
            debug!(%kind, query, hits = hits.len(), "lookup cache hit");
            return Ok(LookupOutcome::Hits(hits));
        }

        let ticket = self.claim_latest(kind);
        tokio::time::sleep(self.config.debounce).await;
        if self.is_superseded(kind, ticket) {
            debug!(%kind, query, "query superseded during quiet interval");
            return Ok(LookupOutcome::Superseded);
        }

        let response = self.backend.search(kind, query).await;
        if self.is_superseded(kind, ticket) {
            debug!(%kind, query, "stale response discarded");
            return Ok(LookupOutcome::Superseded);
        }

        let hits = response.map_err(|source| LookupError::Backend { kind, source })?;
        self.names.merge_results(kind, &hits);
        self.cache_put(kind, query, hits.clone());
        debug!(%kind, query, hits = hits.len(), "lookup resolved");
        Ok(LookupOutcome::Hits(hits))
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    fn claim_latest(&self, kind: EntityKind) -> u64 {
        let ticket = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, ticket);
        ticket
    }

    fn is_superseded(&self, kind: EntityKind, ticket: u64) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .is_some_and(|latest| *latest != ticket)
    }

    fn cache_get(&self, kind: EntityKind, query: &str) -> Option<Vec<Entity>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(kind, query.to_string()))
            .cloned()
    }

    fn cache_put(&self, kind: EntityKind, query: &str, hits: Vec<Entity>) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put((kind, query.to_string()), hits);
    }
}
