// ── Query cache with key-based invalidation ──
//
// Keyed store of in-flight/resolved query results. Subscribers watch a
// per-key snapshot channel; mutations invalidate keys (or whole resource
// prefixes) to force re-fetch. All bookkeeping sits behind one std mutex
// that is never held across an await, so cache operations are atomic
// with respect to each other; suspension only happens inside spawned
// fetch tasks at the network boundary.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use pulsewatch_api::models::{
    ManualEntry, MonitoringStatus, PostStats, PostsPage, ServiceSettings,
};

use crate::error::CoreError;
use crate::key::{QueryKey, Resource};

const MUTEX_POISONED: &str = "query cache mutex poisoned";

// ── Payloads ─────────────────────────────────────────────────────────

/// Typed payload of a resolved query, one variant per resource.
#[derive(Debug, Clone)]
pub enum QueryData {
    Posts(PostsPage),
    Stats(PostStats),
    Monitoring(MonitoringStatus),
    ManualEntries(Vec<ManualEntry>),
    Settings(ServiceSettings),
}

impl QueryData {
    pub fn as_posts(&self) -> Option<&PostsPage> {
        match self {
            Self::Posts(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_stats(&self) -> Option<&PostStats> {
        match self {
            Self::Stats(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn as_monitoring(&self) -> Option<&MonitoringStatus> {
        match self {
            Self::Monitoring(status) => Some(status),
            _ => None,
        }
    }

    pub fn as_manual_entries(&self) -> Option<&[ManualEntry]> {
        match self {
            Self::ManualEntries(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_settings(&self) -> Option<&ServiceSettings> {
        match self {
            Self::Settings(settings) => Some(settings),
            _ => None,
        }
    }
}

// ── Fetchers ─────────────────────────────────────────────────────────

/// Boxed future produced by a fetcher invocation.
pub type FetchFuture = Pin<Box<dyn Future<Output = Result<QueryData, CoreError>> + Send>>;

/// Async operation that produces a payload or a failure. Stored per key
/// and re-invoked on invalidation and periodic refetch.
pub type Fetcher = Arc<dyn Fn() -> FetchFuture + Send + Sync>;

/// Wrap an async closure as a [`Fetcher`].
pub fn fetch_with<F, Fut>(f: F) -> Fetcher
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<QueryData, CoreError>> + Send + 'static,
{
    Arc::new(move || Box::pin(f()) as FetchFuture)
}

// ── Snapshots ────────────────────────────────────────────────────────

/// Lifecycle state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Cloneable failure descriptor carried by error-state snapshots.
#[derive(Debug, Clone)]
pub struct QueryError {
    pub message: String,
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&CoreError> for QueryError {
    fn from(err: &CoreError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Immutable view of one cache entry, broadcast to subscribers on every
/// change. Invariants: `Success` iff `data` is present and `error`
/// absent; `Error` implies `error` present while `data` may remain as
/// last known good.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub key: QueryKey,
    pub state: QueryState,
    pub data: Option<Arc<QueryData>>,
    pub error: Option<QueryError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl QuerySnapshot {
    fn initial(key: QueryKey) -> Self {
        Self {
            key,
            state: QueryState::Idle,
            data: None,
            error: None,
            last_fetched_at: None,
        }
    }

    /// Whether the first fetch for this key has resolved either way.
    pub fn is_settled(&self) -> bool {
        matches!(self.state, QueryState::Success | QueryState::Error)
    }
}

// ── Entries ──────────────────────────────────────────────────────────

struct Entry {
    fetcher: Fetcher,
    tx: watch::Sender<QuerySnapshot>,
    subscribers: usize,
    in_flight: bool,
    /// Cancellation for the periodic refetch task, if one is running.
    refetch: Option<CancellationToken>,
}

impl Entry {
    /// Mark a fetch as started and return the fetcher to run, or `None`
    /// if one is already in flight (the caller joins that one).
    ///
    /// Entries that already hold data keep showing it while the fetch
    /// is in flight; only data-less entries flip to `Loading`.
    fn begin_fetch(&mut self) -> Option<Fetcher> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.tx.send_if_modified(|snap| {
            if snap.data.is_none() && snap.state != QueryState::Loading {
                snap.state = QueryState::Loading;
                true
            } else {
                false
            }
        });
        Some(Arc::clone(&self.fetcher))
    }

    fn stop_refetch(&mut self) {
        if let Some(cancel) = self.refetch.take() {
            cancel.cancel();
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Keyed query cache with subscription, coalescing, and invalidation.
///
/// Constructed once per process and injected into every component that
/// needs it; cheaply cloneable. [`shutdown`](Self::shutdown) cancels all
/// periodic tasks and clears the store.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Register interest in `key`.
    ///
    /// A fresh key is created in `Loading` state and fetched once. An
    /// existing entry that already resolved is served as-is — the new
    /// subscriber receives the cached snapshot immediately and joins
    /// future notifications without causing a fetch. At most one fetch
    /// is ever in flight per key: a subscribe racing an active fetch
    /// joins its completion.
    pub fn subscribe(&self, key: QueryKey, fetcher: Fetcher) -> Subscription {
        self.subscribe_inner(key, fetcher, None)
    }

    /// Like [`subscribe`](Self::subscribe), but also re-runs the fetcher
    /// every `interval` for as long as at least one subscriber remains.
    /// Stale data stays visible during each in-flight window.
    pub fn subscribe_with_refetch(
        &self,
        key: QueryKey,
        fetcher: Fetcher,
        interval: Duration,
    ) -> Subscription {
        self.subscribe_inner(key, fetcher, Some(interval))
    }

    fn subscribe_inner(
        &self,
        key: QueryKey,
        fetcher: Fetcher,
        refetch_every: Option<Duration>,
    ) -> Subscription {
        let mut to_run: Option<Fetcher> = None;
        let rx = {
            let mut entries = self.inner.entries.lock().expect(MUTEX_POISONED);
            let entry = entries.entry(key.clone()).or_insert_with(|| {
                let (tx, _) = watch::channel(QuerySnapshot::initial(key.clone()));
                Entry {
                    fetcher: Arc::clone(&fetcher),
                    tx,
                    subscribers: 0,
                    in_flight: false,
                    refetch: None,
                }
            });
            entry.subscribers += 1;
            entry.fetcher = fetcher;

            let needs_fetch = {
                let snap = entry.tx.borrow();
                snap.data.is_none() && snap.state != QueryState::Success
            };
            if needs_fetch {
                to_run = entry.begin_fetch();
            }

            if let Some(interval) = refetch_every {
                if entry.refetch.is_none() {
                    let cancel = CancellationToken::new();
                    entry.refetch = Some(cancel.clone());
                    tokio::spawn(periodic_refetch(
                        Arc::downgrade(&self.inner),
                        key.clone(),
                        interval,
                        cancel,
                    ));
                }
            }

            entry.tx.subscribe()
        };

        if let Some(fetcher) = to_run {
            spawn_fetch(&self.inner, key.clone(), fetcher);
        }

        Subscription {
            key,
            rx,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Invalidate a single key: a subscribed entry re-fetches
    /// immediately (joining any fetch already in flight), an
    /// unsubscribed one is removed.
    pub fn invalidate(&self, key: &QueryKey) {
        self.invalidate_where(|k| k == key);
    }

    /// Prefix invalidation: every entry of `resource`, regardless of
    /// parameters, is invalidated as by [`invalidate`](Self::invalidate).
    pub fn invalidate_resource(&self, resource: Resource) {
        self.invalidate_where(|k| k.resource() == resource);
    }

    fn invalidate_where(&self, matches: impl Fn(&QueryKey) -> bool) {
        let mut to_fetch: Vec<(QueryKey, Fetcher)> = Vec::new();
        {
            let mut entries = self.inner.entries.lock().expect(MUTEX_POISONED);
            entries.retain(|key, entry| {
                if !matches(key) {
                    return true;
                }
                if entry.subscribers == 0 {
                    debug!(%key, "evicting invalidated entry with no subscribers");
                    entry.stop_refetch();
                    return false;
                }
                if let Some(fetcher) = entry.begin_fetch() {
                    to_fetch.push((key.clone(), fetcher));
                }
                true
            });
        }
        for (key, fetcher) in to_fetch {
            debug!(%key, "re-fetching invalidated entry");
            spawn_fetch(&self.inner, key, fetcher);
        }
    }

    /// Reclaim unsubscribed entries whose data is older than `max_age`.
    ///
    /// Eviction is lazy by design: recently fetched pages stay cached
    /// after their last subscriber leaves so back-navigation is instant.
    pub fn gc(&self, max_age: chrono::Duration) {
        let cutoff = Utc::now() - max_age;
        let mut entries = self.inner.entries.lock().expect(MUTEX_POISONED);
        entries.retain(|key, entry| {
            if entry.subscribers > 0 {
                return true;
            }
            let fresh = entry
                .tx
                .borrow()
                .last_fetched_at
                .is_some_and(|t| t > cutoff);
            if !fresh {
                debug!(%key, "gc: reclaiming stale unsubscribed entry");
                entry.stop_refetch();
            }
            fresh
        });
    }

    /// Whether an entry exists for `key` (subscribed or cached).
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner
            .entries
            .lock()
            .expect(MUTEX_POISONED)
            .contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.entries.lock().expect(MUTEX_POISONED).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel every periodic task and clear the store. In-flight
    /// fetches are not aborted; their results are discarded when they
    /// find their entry gone.
    pub fn shutdown(&self) {
        let mut entries = self.inner.entries.lock().expect(MUTEX_POISONED);
        for entry in entries.values_mut() {
            entry.stop_refetch();
        }
        entries.clear();
        debug!("query cache shut down");
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── Fetch execution ──────────────────────────────────────────────────

/// Run a fetch whose entry has already been marked in-flight, then
/// apply the result and notify subscribers. Holds only a weak handle so
/// outstanding fetches never keep a shut-down cache alive.
fn spawn_fetch(inner: &Arc<Inner>, key: QueryKey, fetcher: Fetcher) {
    let weak = Arc::downgrade(inner);
    tokio::spawn(async move {
        let result = fetcher().await;

        let Some(inner) = weak.upgrade() else { return };
        let mut entries = inner.entries.lock().expect(MUTEX_POISONED);
        // Entry may have been evicted while the fetch was in flight;
        // the result is simply discarded.
        let Some(entry) = entries.get_mut(&key) else { return };

        entry.in_flight = false;
        entry.tx.send_modify(|snap| match result {
            Ok(data) => {
                snap.state = QueryState::Success;
                snap.data = Some(Arc::new(data));
                snap.error = None;
                snap.last_fetched_at = Some(Utc::now());
            }
            Err(err) => {
                // Last known good data is kept alongside the error.
                warn!(%key, error = %err, "query fetch failed");
                snap.state = QueryState::Error;
                snap.error = Some(QueryError::from(&err));
            }
        });
    });
}

/// Periodic refetch loop for one key. Stops when cancelled (subscriber
/// count reached zero), when the entry disappears, or when the cache
/// itself is dropped.
async fn periodic_refetch(
    inner: Weak<Inner>,
    key: QueryKey,
    every: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let Some(inner) = inner.upgrade() else { break };
                let fetch = {
                    let mut entries = inner.entries.lock().expect(MUTEX_POISONED);
                    match entries.get_mut(&key) {
                        Some(entry) if entry.subscribers > 0 => entry.begin_fetch(),
                        _ => break,
                    }
                };
                if let Some(fetcher) = fetch {
                    spawn_fetch(&inner, key.clone(), fetcher);
                }
            }
        }
    }
}

// ── Subscriptions ────────────────────────────────────────────────────

/// Disposable handle to one key's snapshot stream.
///
/// Dropping the handle releases the subscription immediately: the
/// subscriber count drops, and when it reaches zero the key's periodic
/// refetch (if any) stops. The cached entry itself is kept for lazy
/// reclamation.
pub struct Subscription {
    key: QueryKey,
    rx: watch::Receiver<QuerySnapshot>,
    inner: Weak<Inner>,
}

impl Subscription {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// The current snapshot (cheap clone; data is `Arc`-shared).
    pub fn snapshot(&self) -> QuerySnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot change. Returns `None` once the cache
    /// has shut down.
    pub async fn changed(&mut self) -> Option<QuerySnapshot> {
        if self.rx.changed().await.is_err() {
            return None;
        }
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the entry has resolved at least once (success or
    /// error) and return that snapshot.
    pub async fn settled(&mut self) -> QuerySnapshot {
        loop {
            let snap = self.rx.borrow_and_update().clone();
            if snap.is_settled() {
                return snap;
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else { return };
        let Ok(mut entries) = inner.entries.lock() else { return };
        if let Some(entry) = entries.get_mut(&self.key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers == 0 {
                entry.stop_refetch();
            }
        }
    }
}
