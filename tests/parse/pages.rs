use maimainet_rs::records::{parse_music_page, parse_recent_page};
use maimainet_rs::{AchievementRate, AchievementRecord, DxScore, MusicRecord};
use scraper::Html;

use crate::common;

#[test]
fn recent_fixture_skips_the_unscored_play() {
    let doc = Html::parse_document(&common::fixture("record_recent"));
    let sweep = parse_recent_page(&doc);

    assert_eq!(sweep.records.len(), common::RECENT_LEN);
    assert_eq!(sweep.dropped, 1);
    assert_eq!(
        sweep.records[1].achievement.rate,
        AchievementRate::from_ten_thousandths(981_234)
    );
    assert_eq!(
        sweep.records[1].achievement.dx_score,
        DxScore {
            achieved: 1020,
            total: 1100
        }
    );
}

#[test]
fn music_fixture_skips_the_unplayed_chart() {
    let doc = Html::parse_document(&common::fixture("music_master"));
    let sweep = parse_music_page(&doc);

    assert_eq!(sweep.records.len(), 2);
    assert_eq!(sweep.dropped, 1);
    assert_eq!(sweep.records[0].achievement.rate.to_string(), "100.2345%");
    assert_eq!(
        sweep.records[1].achievement.rate,
        AchievementRate::from_ten_thousandths(995_000)
    );
}

#[test]
fn page_without_record_nodes_is_empty() {
    let doc = Html::parse_document(&common::fixture("jp_login"));
    assert!(parse_music_page(&doc).records.is_empty());
    assert_eq!(parse_recent_page(&doc).dropped, 0);
}

#[test]
fn untagged_record_tells_plays_from_bests() {
    let doc = Html::parse_document(&common::fixture("record_recent"));
    let play = parse_recent_page(&doc).records.remove(0);
    let best = MusicRecord::from(play.clone());

    let as_play: AchievementRecord =
        serde_json::from_value(serde_json::to_value(&play).unwrap()).unwrap();
    let as_best: AchievementRecord =
        serde_json::from_value(serde_json::to_value(&best).unwrap()).unwrap();

    assert_eq!(as_play.play().map(|p| p.track), Some(4));
    assert!(as_best.play().is_none());
    assert_eq!(as_play.sheet(), as_best.sheet());
}
