// Service configuration endpoints
//
// Reads and updates the keyword/channel/account lists the remote
// collectors monitor. Updates replace the whole list.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Ack, ServiceSettings, YouTubeChannel};

impl ApiClient {
    /// `GET /config`
    pub async fn service_settings(&self) -> Result<ServiceSettings, Error> {
        self.get(self.url("config")).await
    }

    /// `PUT /config/keywords`
    pub async fn update_keywords(&self, keywords: &[String]) -> Result<Ack, Error> {
        debug!(count = keywords.len(), "updating keywords");
        self.put_json(self.url("config/keywords"), &json!({ "keywords": keywords }))
            .await
    }

    /// `PUT /config/channels/youtube`
    pub async fn update_youtube_channels(
        &self,
        channels: &[YouTubeChannel],
    ) -> Result<Ack, Error> {
        debug!(count = channels.len(), "updating YouTube channels");
        self.put_json(
            self.url("config/channels/youtube"),
            &json!({ "channels": channels }),
        )
        .await
    }

    /// `PUT /config/accounts/twitter`
    pub async fn update_twitter_accounts(&self, accounts: &[String]) -> Result<Ack, Error> {
        debug!(count = accounts.len(), "updating Twitter accounts");
        self.put_json(
            self.url("config/accounts/twitter"),
            &json!({ "accounts": accounts }),
        )
        .await
    }
}
