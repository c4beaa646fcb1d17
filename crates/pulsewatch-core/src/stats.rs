// ── Aggregate stats view model ──
//
// Thin read of the single `stats` key. Aggregation is entirely
// server-side; this layer only refreshes on a timer and on demand when
// a mutation invalidates the key.

use std::sync::Arc;
use std::time::Duration;

use pulsewatch_api::ApiClient;

use crate::cache::{QueryClient, QueryData, Subscription, fetch_with};
use crate::key::{QueryKey, Resource};

/// Fixed refresh interval while a stats view is subscribed.
pub const STATS_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Read model for the aggregate statistics panel.
#[derive(Clone)]
pub struct StatsReader {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl StatsReader {
    pub(crate) fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// Cache key of the stats entry.
    pub fn stats_key() -> QueryKey {
        QueryKey::bare(Resource::Stats)
    }

    /// Subscribe to the stats with the fixed 30-second refresh.
    pub fn observe(&self) -> Subscription {
        let api = Arc::clone(&self.api);
        self.queries.subscribe_with_refetch(
            Self::stats_key(),
            fetch_with(move || {
                let api = Arc::clone(&api);
                async move { Ok(QueryData::Stats(api.post_stats().await?)) }
            }),
            STATS_REFRESH_INTERVAL,
        )
    }
}
