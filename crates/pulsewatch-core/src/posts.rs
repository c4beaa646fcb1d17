// ── Paginated posts query model ──
//
// Derives a canonical cache key from filter + pagination parameters and
// reads through the query cache. Every distinct filter/offset
// combination is an independent entry; there is no cross-page merging.
// Pagination itself is pure arithmetic over (offset, limit, total).

use std::sync::Arc;

use pulsewatch_api::ApiClient;
use pulsewatch_api::models::PostFilter;

use crate::cache::{QueryClient, QueryData, Subscription, fetch_with};
use crate::key::{QueryKey, Resource};

/// Default page size when the caller doesn't specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Client-side cap on page size. The service accepts larger pages; the
/// views never ask for them.
pub const MAX_PAGE_SIZE: u32 = 100;

// ── Key derivation ───────────────────────────────────────────────────

/// Canonical cache key for a filter. Absent fields contribute nothing,
/// so `{platform: None}` and an omitted platform produce the same key.
pub fn posts_key(filter: &PostFilter) -> QueryKey {
    let mut params: Vec<(String, String)> = Vec::with_capacity(5);
    if let Some(platform) = &filter.platform {
        params.push(("platform".into(), platform.clone()));
    }
    if let Some(post_type) = &filter.post_type {
        params.push(("type".into(), post_type.clone()));
    }
    if let Some(author) = &filter.author {
        params.push(("author".into(), author.clone()));
    }
    params.push(("limit".into(), filter.limit.to_string()));
    params.push(("offset".into(), filter.offset.to_string()));
    QueryKey::with_params(Resource::Posts, params)
}

// ── Pagination (pure functions over offset/limit/total) ──────────────

pub fn has_previous(offset: u32) -> bool {
    offset > 0
}

pub fn has_next(offset: u32, limit: u32, total: u64) -> bool {
    u64::from(offset) + u64::from(limit) < total
}

pub fn previous_offset(offset: u32, limit: u32) -> u32 {
    offset.saturating_sub(limit)
}

pub fn next_offset(offset: u32, limit: u32, total: u64) -> Option<u32> {
    has_next(offset, limit, total).then(|| offset + limit)
}

// ── Filter transitions ───────────────────────────────────────────────
//
// Changing platform or page size invalidates the reader's *position*,
// not the cached content: the old key stays cached for back-navigation.

/// New filter with a different platform, back at offset 0.
pub fn with_platform(filter: &PostFilter, platform: Option<String>) -> PostFilter {
    PostFilter {
        platform,
        offset: 0,
        ..filter.clone()
    }
}

/// New filter with a different page size (clamped to 1..=[`MAX_PAGE_SIZE`]),
/// back at offset 0.
pub fn with_limit(filter: &PostFilter, limit: u32) -> PostFilter {
    PostFilter {
        limit: limit.clamp(1, MAX_PAGE_SIZE),
        offset: 0,
        ..filter.clone()
    }
}

/// The next page, if one exists given `total`.
pub fn next_page(filter: &PostFilter, total: u64) -> Option<PostFilter> {
    next_offset(filter.offset, filter.limit, total).map(|offset| PostFilter {
        offset,
        ..filter.clone()
    })
}

/// The previous page, if not already at the first.
pub fn previous_page(filter: &PostFilter) -> Option<PostFilter> {
    has_previous(filter.offset).then(|| PostFilter {
        offset: previous_offset(filter.offset, filter.limit),
        ..filter.clone()
    })
}

// ── View ─────────────────────────────────────────────────────────────

/// Read model for the filtered, paginated post list.
#[derive(Clone)]
pub struct PostsView {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl PostsView {
    pub(crate) fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// Subscribe to one page of posts. Cached pages are served without
    /// a fetch until something invalidates the `posts` prefix.
    pub fn list(&self, filter: &PostFilter) -> Subscription {
        let key = posts_key(filter);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        self.queries.subscribe(
            key,
            fetch_with(move || {
                let api = Arc::clone(&api);
                let filter = filter.clone();
                async move { Ok(QueryData::Posts(api.list_posts(&filter).await?)) }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_field_population_order() {
        let a = PostFilter {
            platform: Some("youtube".into()),
            limit: 25,
            offset: 0,
            ..PostFilter::default()
        };
        // Same field values assembled differently.
        let b = with_limit(&with_platform(&PostFilter::default(), Some("youtube".into())), 25);
        assert_eq!(posts_key(&a), posts_key(&b));
    }

    #[test]
    fn pagination_bounds_at_total_120_limit_50() {
        assert!(has_next(0, 50, 120));
        assert!(has_next(50, 50, 120));
        assert!(!has_next(100, 50, 120));

        assert!(!has_previous(0));
        assert!(has_previous(50));
        assert!(has_previous(100));

        assert_eq!(next_offset(50, 50, 120), Some(100));
        assert_eq!(next_offset(100, 50, 120), None);
        assert_eq!(previous_offset(50, 50), 0);
        assert_eq!(previous_offset(30, 50), 0);
    }

    #[test]
    fn platform_change_resets_offset() {
        let filter = PostFilter {
            platform: Some("youtube".into()),
            offset: 75,
            limit: 25,
            ..PostFilter::default()
        };
        let switched = with_platform(&filter, Some("twitter".into()));
        assert_eq!(switched.offset, 0);
        assert_eq!(switched.limit, 25);
        assert_eq!(switched.platform.as_deref(), Some("twitter"));
    }

    #[test]
    fn limit_change_resets_offset_and_clamps() {
        let filter = PostFilter {
            offset: 200,
            ..PostFilter::default()
        };
        let resized = with_limit(&filter, 500);
        assert_eq!(resized.offset, 0);
        assert_eq!(resized.limit, MAX_PAGE_SIZE);
        assert_eq!(with_limit(&filter, 0).limit, 1);
    }

    #[test]
    fn adjacent_pages_have_distinct_keys() {
        let first = PostFilter {
            platform: Some("youtube".into()),
            limit: 25,
            offset: 0,
            ..PostFilter::default()
        };
        let second = next_page(&first, 140).unwrap();
        assert_eq!(second.offset, 25);
        assert_ne!(posts_key(&first), posts_key(&second));
    }
}
