// ── Monitoring status poller and control ──
//
// The displayed monitoring state is always last-polled server truth:
// control calls never flip it locally, they invalidate the status key
// and let the next fetch confirm the transition.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use pulsewatch_api::ApiClient;
use pulsewatch_api::models::FetchResults;

use crate::cache::{QueryClient, QueryData, Subscription, fetch_with};
use crate::error::CoreError;
use crate::key::{QueryKey, Resource};

/// Fixed status poll interval while a monitoring view is subscribed.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Valid range for the remote collection interval, in minutes.
pub const INTERVAL_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=1440;

/// Control surface for the remote monitoring process.
#[derive(Clone)]
pub struct MonitoringControl {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl MonitoringControl {
    pub(crate) fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// Cache key of the status entry.
    pub fn status_key() -> QueryKey {
        QueryKey::bare(Resource::MonitoringStatus)
    }

    /// Subscribe to the monitoring status with the fixed 5-second poll.
    /// The poll stops once the last observer drops its subscription.
    pub fn observe(&self) -> Subscription {
        let api = Arc::clone(&self.api);
        self.queries.subscribe_with_refetch(
            Self::status_key(),
            fetch_with(move || {
                let api = Arc::clone(&api);
                async move { Ok(QueryData::Monitoring(api.monitoring_status().await?)) }
            }),
            STATUS_POLL_INTERVAL,
        )
    }

    /// Start the remote monitoring loop.
    ///
    /// Valid from any observed state. On success the status key is
    /// invalidated so the next poll reflects `running` — the local view
    /// is never set optimistically.
    pub async fn start(&self, interval_minutes: u32) -> Result<(), CoreError> {
        if !INTERVAL_MINUTES_RANGE.contains(&interval_minutes) {
            return Err(CoreError::validation(
                "interval_minutes",
                format!("must be between 1 and 1440, got {interval_minutes}"),
            ));
        }
        self.api.start_monitoring(interval_minutes).await?;
        info!(interval_minutes, "monitoring start acknowledged");
        self.queries.invalidate(&Self::status_key());
        Ok(())
    }

    /// Stop the remote monitoring loop. Valid from any observed state.
    pub async fn stop(&self) -> Result<(), CoreError> {
        self.api.stop_monitoring().await?;
        info!("monitoring stop acknowledged");
        self.queries.invalidate(&Self::status_key());
        Ok(())
    }

    /// Trigger an immediate out-of-band collection. Not a state
    /// transition; on success the content keys are invalidated because
    /// new posts may have arrived.
    pub async fn fetch_now(&self) -> Result<FetchResults, CoreError> {
        let results = self.api.fetch_now().await?;
        info!(total = results.total, "on-demand fetch complete");
        self.queries.invalidate_resource(Resource::Posts);
        self.queries.invalidate(&QueryKey::bare(Resource::Stats));
        Ok(results)
    }
}
