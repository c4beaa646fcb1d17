// Monitoring control endpoints
//
// Start/stop the remote collection loop, trigger an out-of-band fetch,
// and read the current status. The status is server-authoritative: the
// client never infers state transitions from its own control calls.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, FetchResults, MonitoringStatus};

impl ApiClient {
    /// `GET /monitoring/status`
    pub async fn monitoring_status(&self) -> Result<MonitoringStatus, Error> {
        self.get(self.url("monitoring/status")).await
    }

    /// `POST /monitoring/start`
    ///
    /// The service validates `interval_minutes` against 1..=1440 as well;
    /// callers are expected to have checked locally first.
    pub async fn start_monitoring(&self, interval_minutes: u32) -> Result<Ack, Error> {
        debug!(interval_minutes, "starting monitoring");
        let body = json!({ "interval_minutes": interval_minutes });
        self.post_json(self.url("monitoring/start"), &body).await
    }

    /// `POST /monitoring/stop`
    pub async fn stop_monitoring(&self) -> Result<Ack, Error> {
        debug!("stopping monitoring");
        self.post(self.url("monitoring/stop")).await
    }

    /// `POST /monitoring/fetch`
    ///
    /// Triggers an immediate collection pass and returns per-platform
    /// counts of what arrived.
    pub async fn fetch_now(&self) -> Result<FetchResults, Error> {
        debug!("triggering immediate fetch");
        self.post(self.url("monitoring/fetch")).await
    }
}
