// ── Remote service settings ──
//
// Keyword/channel/account lists live on the service; this layer caches
// the snapshot under the `config` key and invalidates it after every
// successful update, the same Ok-branch discipline as other mutations.

use std::sync::Arc;

use tracing::info;

use pulsewatch_api::ApiClient;
use pulsewatch_api::models::YouTubeChannel;

use crate::cache::{QueryClient, QueryData, Subscription, fetch_with};
use crate::error::CoreError;
use crate::key::{QueryKey, Resource};

/// Read/update surface for the remote collector configuration.
#[derive(Clone)]
pub struct SettingsEditor {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl SettingsEditor {
    pub(crate) fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// Cache key of the settings snapshot.
    pub fn settings_key() -> QueryKey {
        QueryKey::bare(Resource::Config)
    }

    /// Subscribe to the settings snapshot.
    pub fn observe(&self) -> Subscription {
        let api = Arc::clone(&self.api);
        self.queries.subscribe(
            Self::settings_key(),
            fetch_with(move || {
                let api = Arc::clone(&api);
                async move { Ok(QueryData::Settings(api.service_settings().await?)) }
            }),
        )
    }

    /// Replace the monitored keyword list.
    pub async fn update_keywords(&self, keywords: &[String]) -> Result<(), CoreError> {
        if keywords.is_empty() {
            return Err(CoreError::validation("keywords", "must not be empty"));
        }
        self.api.update_keywords(keywords).await?;
        info!(count = keywords.len(), "keywords updated");
        self.queries.invalidate(&Self::settings_key());
        Ok(())
    }

    /// Replace the monitored YouTube channel list.
    pub async fn update_youtube_channels(
        &self,
        channels: &[YouTubeChannel],
    ) -> Result<(), CoreError> {
        self.api.update_youtube_channels(channels).await?;
        info!(count = channels.len(), "YouTube channels updated");
        self.queries.invalidate(&Self::settings_key());
        Ok(())
    }

    /// Replace the monitored Twitter account list.
    pub async fn update_twitter_accounts(&self, accounts: &[String]) -> Result<(), CoreError> {
        self.api.update_twitter_accounts(accounts).await?;
        info!(count = accounts.len(), "Twitter accounts updated");
        self.queries.invalidate(&Self::settings_key());
        Ok(())
    }
}
