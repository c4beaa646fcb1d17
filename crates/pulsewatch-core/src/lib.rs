// pulsewatch-core: Reactive sync layer between pulsewatch-api and consumers.

pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod manual;
pub mod monitoring;
pub mod posts;
pub mod session;
pub mod settings;
pub mod stats;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{
    Fetcher, QueryClient, QueryData, QueryError, QuerySnapshot, QueryState, Subscription,
    fetch_with,
};
pub use config::SessionConfig;
pub use error::CoreError;
pub use key::{QueryKey, Resource};
pub use session::Session;

// View models and their tunables.
pub use manual::{ManualEntries, ManualEntryDraft};
pub use monitoring::{INTERVAL_MINUTES_RANGE, MonitoringControl, STATUS_POLL_INTERVAL};
pub use posts::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PostsView, posts_key};
pub use settings::SettingsEditor;
pub use stats::{STATS_REFRESH_INTERVAL, StatsReader};
