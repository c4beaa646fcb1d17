// ── Session root ──
//
// One `Session` per service connection: it owns the API client and the
// query cache and hands out the per-surface view models, all sharing
// the same cache so cross-surface invalidation just works.

use std::sync::Arc;

use tracing::info;

use pulsewatch_api::ApiClient;
use pulsewatch_api::transport::TransportConfig;

use crate::cache::QueryClient;
use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::manual::ManualEntries;
use crate::monitoring::MonitoringControl;
use crate::posts::PostsView;
use crate::settings::SettingsEditor;
use crate::stats::StatsReader;

/// Connected session against one monitoring service.
///
/// Cheaply cloneable; clones share the API client and query cache.
#[derive(Clone)]
pub struct Session {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl Session {
    /// Open a session. No network traffic happens here; the first fetch
    /// is driven by the first subscription.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let api = ApiClient::new(config.base_url.clone(), &transport)?;
        info!(url = %config.base_url, "session opened");
        Ok(Self {
            api: Arc::new(api),
            queries: QueryClient::new(),
        })
    }

    /// The shared query cache.
    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    /// The underlying API client, for callers that need raw access.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    // ── View models ──────────────────────────────────────────────────

    pub fn posts(&self) -> PostsView {
        PostsView::new(Arc::clone(&self.api), self.queries.clone())
    }

    pub fn stats(&self) -> StatsReader {
        StatsReader::new(Arc::clone(&self.api), self.queries.clone())
    }

    pub fn monitoring(&self) -> MonitoringControl {
        MonitoringControl::new(Arc::clone(&self.api), self.queries.clone())
    }

    pub fn manual(&self) -> ManualEntries {
        ManualEntries::new(Arc::clone(&self.api), self.queries.clone())
    }

    pub fn settings(&self) -> SettingsEditor {
        SettingsEditor::new(Arc::clone(&self.api), self.queries.clone())
    }

    /// Stop periodic polling and clear the cache. Outstanding fetches
    /// resolve into the void.
    pub fn shutdown(&self) {
        self.queries.shutdown();
    }
}
