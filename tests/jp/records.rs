use chrono::{FixedOffset, TimeZone};
use httpmock::Method::GET;
use maimainet_rs::{
    AchievementRate, AuthParams, ChartType, Difficulty, DxScore, Flag, JpClient, MaiError,
    ProgressState, RecordSource,
};

use crate::common;

#[tokio::test]
async fn full_run_reports_every_state_in_order() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    let (recent_mock, tier_mocks) = common::mock_record_pages(&server);

    let client = common::jp_client(&server);
    let (progress, seen) = common::recorder();
    let mut jp = JpClient::new(&client, Some(progress));

    jp.login(&AuthParams::new("player", "hunter2")).await.unwrap();
    let recent = jp.fetch_recent_records().await.unwrap();
    let music = jp.fetch_music_records().await.unwrap();

    recent_mock.assert();
    for mock in &tier_mocks {
        mock.assert();
    }
    assert_eq!(recent.len(), common::RECENT_LEN);
    assert_eq!(music.len(), common::CATALOG_LEN);
    assert_eq!(*seen.lock().unwrap(), ProgressState::CLIENT_SEQUENCE.to_vec());
}

#[tokio::test]
async fn recent_page_yields_structured_plays() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    let _pages = common::mock_record_pages(&server);

    let client = common::jp_client(&server);
    let mut jp = JpClient::new(&client, None);
    jp.login(&AuthParams::new("player", "hunter2")).await.unwrap();
    let recent = jp.fetch_recent_records().await.unwrap();

    let jst = FixedOffset::east_opt(9 * 3600).unwrap();

    let first = &recent[0];
    assert_eq!(first.sheet.song_id, "BREaK! BREaK! BREaK!");
    assert_eq!(first.sheet.kind, ChartType::Dx);
    assert_eq!(first.sheet.difficulty, Difficulty::Master);
    assert_eq!(
        first.achievement.rate,
        AchievementRate::from_ten_thousandths(1_007_012)
    );
    assert_eq!(
        first.achievement.dx_score,
        DxScore {
            achieved: 2387,
            total: 2631
        }
    );
    assert_eq!(first.achievement.flags, vec![Flag::FullCombo, Flag::FullSync]);
    assert_eq!(first.play.track, 4);
    assert_eq!(
        first.play.timestamp,
        Some(jst.with_ymd_and_hms(2024, 3, 1, 21, 5, 0).unwrap())
    );

    let second = &recent[1];
    assert_eq!(second.sheet.song_id, "[宴] ジングルベル");
    assert_eq!(second.sheet.kind, ChartType::Utage);
    assert_eq!(second.sheet.difficulty, Difficulty::Utage);
    assert_eq!(second.achievement.flags, vec![Flag::AllPerfect]);
    assert_eq!(second.play.track, 3);
}

#[tokio::test]
async fn catalog_fetch_is_repeatable() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    let (_recent, tier_mocks) = common::mock_record_pages(&server);

    let client = common::jp_client(&server);
    let mut jp = JpClient::new(&client, None);
    jp.login(&AuthParams::new("player", "hunter2")).await.unwrap();

    let first = jp.fetch_music_records().await.unwrap();
    let second = jp.fetch_music_records().await.unwrap();

    assert_eq!(first, second);
    for mock in &tier_mocks {
        mock.assert_hits(2);
    }

    let charles = first
        .iter()
        .find(|r| r.sheet.song_id == "シャルル")
        .unwrap();
    assert_eq!(charles.sheet.kind, ChartType::Dx);
    assert_eq!(
        charles.achievement.flags,
        vec![Flag::FullComboPlus, Flag::FullSyncDx]
    );
    let bad_apple = first
        .iter()
        .find(|r| r.sheet.song_id == "Bad Apple!! feat nomico")
        .unwrap();
    assert_eq!(bad_apple.sheet.kind, ChartType::Dx);
    assert!(bad_apple.achievement.flags.is_empty());
}

#[tokio::test]
async fn error_page_redirect_mid_sweep_is_a_session_error() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/record/");
        then.status(302)
            .header("location", "/maimai-mobile/error/?code=200004");
    });

    let client = common::jp_client(&server);
    let (progress, seen) = common::recorder();
    let mut jp = JpClient::new(&client, Some(progress));
    jp.login(&AuthParams::new("player", "hunter2")).await.unwrap();
    let err = jp.fetch_recent_records().await.unwrap_err();

    assert!(matches!(err, MaiError::Session(_)), "got {err:?}");
    assert_eq!(
        seen.lock().unwrap().last(),
        Some(&ProgressState::RecentInProgress)
    );
}

#[tokio::test]
async fn maintenance_mid_sweep_is_reported_as_maintenance() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/record/musicGenre/search/");
        then.status(503).body(common::fixture("maintenance"));
    });

    let client = common::jp_client(&server);
    let mut jp = JpClient::new(&client, None);
    jp.login(&AuthParams::new("player", "hunter2")).await.unwrap();
    let err = jp.fetch_music_records().await.unwrap_err();

    assert!(matches!(err, MaiError::Maintenance), "got {err:?}");
}

#[tokio::test]
async fn plain_server_error_keeps_its_status() {
    let server = common::setup_server();
    let _login = common::mock_jp_login(&server);
    server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/record/");
        then.status(500).body("oops");
    });

    let client = common::jp_client(&server);
    let mut jp = JpClient::new(&client, None);
    jp.login(&AuthParams::new("player", "hunter2")).await.unwrap();
    let err = jp.fetch_recent_records().await.unwrap_err();

    assert!(
        matches!(err, MaiError::Status { status: 500, .. }),
        "got {err:?}"
    );
}
