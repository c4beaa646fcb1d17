// Manual entry endpoints
//
// Manually recorded posts for platforms the collectors can't reach.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, ManualEntry, ManualEntryCreate};

impl ApiClient {
    /// `GET /manual`
    pub async fn list_manual_entries(&self) -> Result<Vec<ManualEntry>, Error> {
        self.get(self.url("manual")).await
    }

    /// `POST /manual`
    pub async fn create_manual_entry(
        &self,
        entry: &ManualEntryCreate,
    ) -> Result<ManualEntry, Error> {
        debug!(platform = %entry.platform, "creating manual entry");
        self.post_json(self.url("manual"), entry).await
    }

    /// `POST /manual/bulk`
    pub async fn create_manual_entries(
        &self,
        entries: &[ManualEntryCreate],
    ) -> Result<Ack, Error> {
        debug!(count = entries.len(), "creating manual entries in bulk");
        self.post_json(self.url("manual/bulk"), &entries).await
    }

    /// `DELETE /manual/{id}`
    pub async fn delete_manual_entry(&self, id: &str) -> Result<Ack, Error> {
        debug!(id, "deleting manual entry");
        self.delete(self.url(&format!("manual/{id}"))).await
    }
}
