// End-to-end session tests against a wiremock service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pulsewatch_api::models::PostFilter;
use pulsewatch_core::{
    CoreError, QueryState, Session, SessionConfig, posts, posts_key,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn open(server: &MockServer) -> Session {
    Session::new(SessionConfig {
        base_url: server.uri().parse().unwrap(),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn posts_body(offset: u32, total: u64) -> serde_json::Value {
    json!({
        "posts": [{ "platform": "youtube", "type": "video", "id": format!("p{offset}") }],
        "total": total,
        "limit": 50,
        "offset": offset,
    })
}

fn stats_body(total: u64) -> serde_json::Value {
    json!({ "total_posts": total })
}

fn entry_body() -> serde_json::Value {
    json!({ "id": "m1", "platform": "other", "text": "hello" })
}

// ── Mutation fan-out ────────────────────────────────────────────────

#[tokio::test]
async fn manual_submit_refetches_every_posts_page_and_stats() {
    let server = MockServer::start().await;

    // Two subscribed pages plus stats: each fetched once up front and
    // once after the mutation invalidates them.
    Mock::given(method("GET"))
        .and(path("/posts/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body(9)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(0, 120)))
        .expect(4)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/manual"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_body()))
        .expect(1)
        .mount(&server)
        .await;

    let session = open(&server);
    let posts_view = session.posts();
    let first_filter = PostFilter::default();
    let second_filter = PostFilter {
        offset: 50,
        ..PostFilter::default()
    };

    let mut first = posts_view.list(&first_filter);
    let mut second = posts_view.list(&second_filter);
    let mut stats = session.stats().observe();
    assert_eq!(first.settled().await.state, QueryState::Success);
    assert_eq!(second.settled().await.state, QueryState::Success);
    assert_eq!(stats.settled().await.state, QueryState::Success);

    let mut draft = pulsewatch_core::ManualEntryDraft {
        text: "hello".into(),
        ..Default::default()
    };
    session.manual().submit(&mut draft).await.unwrap();
    assert_eq!(draft, pulsewatch_core::ManualEntryDraft::default());

    // All three subscriptions converge on fresh server truth.
    assert_eq!(first.changed().await.unwrap().state, QueryState::Success);
    assert_eq!(second.changed().await.unwrap().state, QueryState::Success);
    assert_eq!(stats.changed().await.unwrap().state, QueryState::Success);

    session.shutdown();
}

#[tokio::test]
async fn failed_submit_preserves_the_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manual"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "detail": "text too long" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = open(&server);
    let mut draft = pulsewatch_core::ManualEntryDraft {
        text: "hello".into(),
        author: "ada".into(),
        ..Default::default()
    };
    let before = draft.clone();

    let err = session.manual().submit(&mut draft).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(422), .. }));
    assert_eq!(draft, before);
}

#[tokio::test]
async fn bulk_submit_validates_every_draft_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manual/bulk"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "2 entries created" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = open(&server);
    let good = pulsewatch_core::ManualEntryDraft {
        text: "hello".into(),
        ..Default::default()
    };
    let blank = pulsewatch_core::ManualEntryDraft::default();

    // One blank draft fails the whole batch with no request sent.
    let err = session
        .manual()
        .submit_bulk(&[good.clone(), blank])
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));

    session
        .manual()
        .submit_bulk(&[good.clone(), good])
        .await
        .unwrap();
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manual"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry_body()))
        .expect(0)
        .mount(&server)
        .await;

    let session = open(&server);
    let mut draft = pulsewatch_core::ManualEntryDraft::default();
    let err = session.manual().submit(&mut draft).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
}

// ── Monitoring control ──────────────────────────────────────────────

#[tokio::test]
async fn start_never_flips_the_displayed_status_optimistically() {
    let server = MockServer::start().await;

    // First poll sees the pre-start truth; the post-invalidation
    // re-fetch sees the transition.
    Mock::given(method("GET"))
        .and(path("/monitoring/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "stopped" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/monitoring/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "status": "running", "interval_minutes": 30, "next_check_in": 1800 }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/monitoring/start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Monitoring started" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = open(&server);
    let control = session.monitoring();
    let mut status = control.observe();

    let snap = status.settled().await;
    let observed = snap.data.unwrap();
    assert_eq!(observed.as_monitoring().unwrap().status.to_string(), "stopped");

    control.start(30).await.unwrap();
    // Synchronously after the acknowledgement: still the last-polled
    // truth, not an assumed transition.
    let observed = status.snapshot().data.unwrap();
    assert_eq!(observed.as_monitoring().unwrap().status.to_string(), "stopped");

    let snap = status.changed().await.unwrap();
    let observed = snap.data.unwrap();
    assert_eq!(observed.as_monitoring().unwrap().status.to_string(), "running");

    session.shutdown();
}

#[tokio::test]
async fn out_of_range_interval_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/monitoring/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(0)
        .mount(&server)
        .await;

    let session = open(&server);
    let control = session.monitoring();
    assert!(matches!(
        control.start(0).await,
        Err(CoreError::ValidationFailed { .. })
    ));
    assert!(matches!(
        control.start(2000).await,
        Err(CoreError::ValidationFailed { .. })
    ));
}

#[tokio::test]
async fn fetch_now_refetches_posts_and_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(0, 3)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_body(3)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/monitoring/fetch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "results": { "youtube": 2, "twitter": 1 }, "total": 3 }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let session = open(&server);
    let mut page = session.posts().list(&PostFilter::default());
    let mut stats = session.stats().observe();
    page.settled().await;
    stats.settled().await;

    let results = session.monitoring().fetch_now().await.unwrap();
    assert_eq!(results.total, 3);
    assert_eq!(page.changed().await.unwrap().state, QueryState::Success);
    assert_eq!(stats.changed().await.unwrap().state, QueryState::Success);

    session.shutdown();
}

// ── Pagination caching ──────────────────────────────────────────────

#[tokio::test]
async fn adjacent_pages_stay_cached_side_by_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts_body(0, 120)))
        .expect(2)
        .mount(&server)
        .await;

    let session = open(&server);
    let view = session.posts();
    let first_filter = PostFilter::default();

    let mut first = view.list(&first_filter);
    let total = first
        .settled()
        .await
        .data
        .unwrap()
        .as_posts()
        .unwrap()
        .total;

    let second_filter = posts::next_page(&first_filter, total).unwrap();
    let mut second = view.list(&second_filter);
    second.settled().await;

    let queries = session.queries();
    assert!(queries.contains(&posts_key(&first_filter)));
    assert!(queries.contains(&posts_key(&second_filter)));

    // Back-navigation hits the cache, even after the reader moved on.
    drop(first);
    assert!(queries.contains(&posts_key(&first_filter)));
    let back = view.list(&first_filter);
    assert_eq!(back.snapshot().state, QueryState::Success);

    session.shutdown();
}

// ── Settings ────────────────────────────────────────────────────────

#[tokio::test]
async fn keyword_update_refetches_the_settings_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "keywords": ["rust"], "check_interval": 30 }),
        ))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/config/keywords"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Keywords updated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = open(&server);
    let editor = session.settings();
    let mut settings = editor.observe();
    settings.settled().await;

    editor.update_keywords(&["rust".into(), "tokio".into()]).await.unwrap();
    assert_eq!(settings.changed().await.unwrap().state, QueryState::Success);

    assert!(matches!(
        editor.update_keywords(&[]).await,
        Err(CoreError::ValidationFailed { .. })
    ));

    session.shutdown();
}
