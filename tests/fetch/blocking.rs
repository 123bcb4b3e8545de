use httpmock::Method::GET;
use maimainet_rs::fetch::{fetch_records, run_with_progress};
use maimainet_rs::{FetchRequest, MaiError, ProgressState, Region};

use crate::common;

#[tokio::test]
async fn blocking_fetch_returns_both_record_lists() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    let _pages = common::mock_record_pages(&server);

    let client = common::jp_client(&server);
    let response = fetch_records(&client, &FetchRequest::new("player", "hunter2", Region::Jp))
        .await
        .unwrap();

    assert_eq!(response.recent_records.len(), common::RECENT_LEN);
    assert_eq!(response.music_records.len(), common::CATALOG_LEN);

    let json = serde_json::to_value(&response).unwrap();
    let first = &json["recentRecords"][0];
    assert_eq!(first["sheet"]["songId"], "BREaK! BREaK! BREaK!");
    assert_eq!(first["sheet"]["type"], "dx");
    assert_eq!(first["sheet"]["difficulty"], "master");
    assert_eq!(first["achievement"]["rate"], 1_007_012);
    assert_eq!(first["achievement"]["dxScore"]["achieved"], 2387);
    assert_eq!(first["achievement"]["flags"][1], "fullSync");
    assert_eq!(first["play"]["track"], 4);
    assert_eq!(first["play"]["timestamp"], "2024-03-01T21:05:00+09:00");
}

#[tokio::test]
async fn blocking_fetch_returns_nothing_on_partial_failure() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/record/");
        then.status(200).body(common::fixture("record_recent"));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/maimai-mobile/record/musicGenre/search/")
            .query_param("diff", "0");
        then.status(200).body(common::tier_body("0"));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/maimai-mobile/record/musicGenre/search/")
            .query_param("diff", "1");
        then.status(302).header("location", "/maimai-mobile/error/");
    });

    let client = common::jp_client(&server);
    let (progress, seen) = common::recorder();
    let err = run_with_progress(
        &client,
        &FetchRequest::new("player", "hunter2", Region::Jp),
        Some(progress),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, MaiError::Session(_)), "got {err:?}");
    let seen = seen.lock().unwrap();
    assert_eq!(seen.last(), Some(&ProgressState::MusicBasic));
    assert!(!seen.contains(&ProgressState::Concluded));
}

#[tokio::test]
async fn invalid_request_makes_no_upstream_call() {
    let server = common::setup_server();
    let login = common::mock_jp_login(&server);

    let client = common::jp_client(&server);
    let err = fetch_records(&client, &FetchRequest::new("", "hunter2", Region::Jp))
        .await
        .unwrap_err();

    assert!(matches!(err, MaiError::InvalidRequest(_)), "got {err:?}");
    assert_eq!(login.page.hits(), 0);
}
