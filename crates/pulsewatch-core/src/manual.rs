// ── Manual entry mutations ──
//
// Writes are confirmed by re-fetch, never predicted: a successful
// create/delete invalidates every cached posts page plus the stats and
// manual-entries keys, and the affected subscribers re-read through the
// cache. Failures leave the draft intact so the user can retry without
// re-entering data.

use std::sync::Arc;

use tracing::info;

use pulsewatch_api::ApiClient;
use pulsewatch_api::models::{ManualEntry, ManualEntryCreate, Platform};

use crate::cache::{QueryClient, QueryData, Subscription, fetch_with};
use crate::error::CoreError;
use crate::key::{QueryKey, Resource};

// ── Draft ────────────────────────────────────────────────────────────

/// Form state for a manual entry, held client-side until submission.
///
/// `tags` is the raw comma-separated input; it is parsed on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntryDraft {
    pub platform: Platform,
    pub text: String,
    pub author: String,
    pub url: String,
    pub tags: String,
}

impl Default for ManualEntryDraft {
    fn default() -> Self {
        Self {
            platform: Platform::Other,
            text: String::new(),
            author: String::new(),
            url: String::new(),
            tags: String::new(),
        }
    }
}

impl ManualEntryDraft {
    /// The only client-side validation rule: text must be non-blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.text.trim().is_empty() {
            return Err(CoreError::validation("text", "must not be blank"));
        }
        Ok(())
    }

    fn to_request(&self) -> ManualEntryCreate {
        ManualEntryCreate {
            platform: self.platform,
            text: self.text.trim().to_string(),
            author: non_blank(&self.author),
            url: non_blank(&self.url),
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ── Submitter ────────────────────────────────────────────────────────

/// Mutation surface for manual entries.
#[derive(Clone)]
pub struct ManualEntries {
    api: Arc<ApiClient>,
    queries: QueryClient,
}

impl ManualEntries {
    pub(crate) fn new(api: Arc<ApiClient>, queries: QueryClient) -> Self {
        Self { api, queries }
    }

    /// Cache key of the entry list.
    pub fn entries_key() -> QueryKey {
        QueryKey::bare(Resource::ManualEntries)
    }

    /// Subscribe to the full list of manual entries.
    pub fn entries(&self) -> Subscription {
        let api = Arc::clone(&self.api);
        self.queries.subscribe(
            Self::entries_key(),
            fetch_with(move || {
                let api = Arc::clone(&api);
                async move { Ok(QueryData::ManualEntries(api.list_manual_entries().await?)) }
            }),
        )
    }

    /// Submit a draft.
    ///
    /// Validation happens before any network call. On success the
    /// dependent keys are invalidated and the draft resets to defaults;
    /// on failure the draft is left untouched.
    pub async fn submit(&self, draft: &mut ManualEntryDraft) -> Result<ManualEntry, CoreError> {
        draft.validate()?;
        let created = self.api.create_manual_entry(&draft.to_request()).await?;
        info!(id = %created.id, platform = %created.platform, "manual entry created");
        self.invalidate_after_write();
        *draft = ManualEntryDraft::default();
        Ok(created)
    }

    /// Submit several drafts in one request. All drafts are validated
    /// up front; nothing is sent if any fails.
    pub async fn submit_bulk(&self, drafts: &[ManualEntryDraft]) -> Result<(), CoreError> {
        for draft in drafts {
            draft.validate()?;
        }
        let requests: Vec<ManualEntryCreate> =
            drafts.iter().map(ManualEntryDraft::to_request).collect();
        let ack = self.api.create_manual_entries(&requests).await?;
        info!(message = %ack.message, "bulk manual entries created");
        self.invalidate_after_write();
        Ok(())
    }

    /// Delete an entry by id. Displayed pages are never trimmed
    /// optimistically; the invalidation-driven re-fetch removes it.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_manual_entry(id).await?;
        info!(id, "manual entry deleted");
        self.invalidate_after_write();
        Ok(())
    }

    fn invalidate_after_write(&self) {
        self.queries.invalidate_resource(Resource::Posts);
        self.queries.invalidate(&QueryKey::bare(Resource::Stats));
        self.queries.invalidate(&Self::entries_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_is_blank_other() {
        let draft = ManualEntryDraft::default();
        assert_eq!(draft.platform, Platform::Other);
        assert_eq!(draft.text, "");
        assert_eq!(draft.author, "");
        assert_eq!(draft.url, "");
        assert_eq!(draft.tags, "");
    }

    #[test]
    fn blank_text_fails_validation() {
        let draft = ManualEntryDraft {
            text: "   ".into(),
            ..ManualEntryDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn tags_parse_from_comma_separated_input() {
        let draft = ManualEntryDraft {
            text: "hello".into(),
            tags: "a, b,,  c ".into(),
            ..ManualEntryDraft::default()
        };
        let request = draft.to_request();
        assert_eq!(request.tags, vec!["a", "b", "c"]);
        assert_eq!(request.author, None);
    }
}
