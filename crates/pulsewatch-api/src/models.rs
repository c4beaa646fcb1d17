// Wire models for the monitoring service API
//
// Explicit records validated at the transport boundary: required fields
// fail deserialization when absent, optional fields use `#[serde(default)]`
// liberally because collected posts vary wildly by platform. Undocumented
// fields land in the flattened `extra` map instead of being dropped.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Posts ────────────────────────────────────────────────────────────

/// A single collected post, from any platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub platform: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub retweets: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Catch-all for platform-specific fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One page of filtered posts from `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// Server-side aggregate statistics from `GET /posts/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostStats {
    pub total_posts: u64,
    #[serde(default)]
    pub by_platform: HashMap<String, u64>,
    #[serde(default)]
    pub by_type: HashMap<String, u64>,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_shares: u64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Query parameters for `GET /posts`.
///
/// `platform` values are server-defined source groupings (youtube,
/// twitter, meta, linkedin, manual) and are passed through as opaque
/// strings. Every distinct field combination is an independent query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            platform: None,
            post_type: None,
            author: None,
            limit: 50,
            offset: 0,
        }
    }
}

// ── Monitoring ───────────────────────────────────────────────────────

/// The remote monitoring process is either running or stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringState {
    Running,
    Stopped,
}

impl fmt::Display for MonitoringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Status snapshot from `GET /monitoring/status`.
///
/// `next_check_in` is computed by the server at response time; the
/// client never ticks it down locally between polls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringStatus {
    pub status: MonitoringState,
    #[serde(default)]
    pub last_check: Option<String>,
    #[serde(default)]
    pub interval_minutes: u32,
    #[serde(default)]
    pub next_check_in: Option<u64>,
}

/// Per-platform results of an on-demand collection (`POST /monitoring/fetch`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResults {
    #[serde(default)]
    pub results: HashMap<String, u64>,
    pub total: u64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ── Manual entries ───────────────────────────────────────────────────

/// Platforms accepted for manually entered posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Youtube,
        Platform::Tiktok,
        Platform::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Request body for `POST /manual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualEntryCreate {
    pub platform: Platform,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
}

/// A stored manual entry, as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualEntry {
    pub id: String,
    pub platform: String,
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
}

// ── Service configuration ────────────────────────────────────────────

/// A monitored YouTube channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YouTubeChannel {
    pub name: String,
    pub channel_id: String,
}

/// Remote service configuration snapshot from `GET /config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub youtube_channels: Vec<YouTubeChannel>,
    #[serde(default)]
    pub twitter_accounts: Vec<String>,
    #[serde(default)]
    pub grok_x_accounts: Vec<String>,
    #[serde(default)]
    pub meta_pages: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub linkedin_companies: Vec<HashMap<String, String>>,
    #[serde(default)]
    pub check_interval: u64,
    #[serde(default)]
    pub max_posts_per_platform: u32,
    #[serde(default)]
    pub api_configured: HashMap<String, bool>,
}

// ── Reports ──────────────────────────────────────────────────────────

/// Reference to a generated report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRef {
    pub message: String,
    pub path: String,
}

/// Pre-aggregated dashboard payload from `GET /reports/dashboard/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: PostStats,
    #[serde(default)]
    pub platform_distribution: HashMap<String, u64>,
    /// Post counts per day, sorted by date.
    #[serde(default)]
    pub timeline: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub last_updated: Option<String>,
}

// ── Generic acknowledgement ──────────────────────────────────────────

/// `{"message": ...}` acknowledgement returned by control and mutation
/// endpoints. Endpoint-specific companions (echoed ids, counts) land in
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
