// Post listing and statistics endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{PostFilter, PostStats, PostsPage};

impl ApiClient {
    /// `GET /posts`
    ///
    /// Filter fields serialize straight to query parameters; `None`
    /// fields are omitted entirely rather than sent empty.
    pub async fn list_posts(&self, filter: &PostFilter) -> Result<PostsPage, Error> {
        debug!(?filter, "listing posts");
        self.get_query(self.url("posts"), filter).await
    }

    /// `GET /posts/stats`
    pub async fn post_stats(&self) -> Result<PostStats, Error> {
        self.get(self.url("posts/stats")).await
    }

    /// `GET /posts/recent`
    pub async fn recent_posts(&self, days: u32, limit: u32) -> Result<PostsPage, Error> {
        debug!(days, limit, "listing recent posts");
        self.get_query(self.url("posts/recent"), &[("days", days), ("limit", limit)])
            .await
    }
}
