//! Pure extraction of records from the portal's record pages.
//!
//! Every node parser returns `Option`, so a page is processed with `filter_map` and a node that
//! fails extraction is skipped without affecting its neighbours. Page-level helpers count the
//! skipped nodes in [`Sweep::dropped`].

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use chrono_tz::Asia::Tokyo;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::flags::Flag;
use super::model::{
    Achievement, AchievementRate, ChartType, Difficulty, DxScore, MusicRecord, Play, RecentRecord,
    SheetRef,
};

/// Where the fields of one record node live.
struct Layout {
    name: Selector,
    kind_icon: Selector,
    achievement: Selector,
    dx_score: Selector,
    flag_icons: Selector,
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector `{css}`: {e}"))
}

static MUSIC_LAYOUT: LazyLock<Layout> = LazyLock::new(|| Layout {
    name: selector(".music_name_block"),
    kind_icon: selector("img.music_kind_icon"),
    achievement: selector(".music_score_block.w_112"),
    dx_score: selector(".music_score_block.w_190"),
    flag_icons: selector("img.h_30.f_r"),
});

static RECENT_LAYOUT: LazyLock<Layout> = LazyLock::new(|| Layout {
    name: selector(".basic_block"),
    kind_icon: selector("img.playlog_music_kind_icon"),
    achievement: selector(".playlog_achievement_txt"),
    dx_score: selector(".playlog_score_block .white"),
    flag_icons: selector(".playlog_result_innerblock img"),
});

static MUSIC_NODE: LazyLock<Selector> = LazyLock::new(|| selector(".main_wrapper .w_450.m_15.p_r.f_0"));
static RECENT_NODE: LazyLock<Selector> =
    LazyLock::new(|| selector(".main_wrapper .p_10.t_l.f_0.v_b"));

static KIND_ICON_DX: LazyLock<Selector> = LazyLock::new(|| selector("img.music_kind_icon_dx"));
static KIND_ICON_STANDARD: LazyLock<Selector> =
    LazyLock::new(|| selector("img.music_kind_icon_standard"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static SUB_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".sub_title span"));

static RE_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"music_(dx|standard)\.png").expect("invalid regex: kind icon")
});
static RE_DIFFICULTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"diff_([a-z]+)\.png").expect("invalid regex: difficulty icon"));
static RE_TRACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TRACK\s*0*(\d+)").expect("invalid regex: track"));
static RE_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})/(\d{2})/(\d{2})\s+(\d{1,2}):(\d{2})").expect("invalid regex: timestamp")
});

/// Result of parsing one page: the records that parsed and how many nodes did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sweep<T> {
    pub records: Vec<T>,
    pub dropped: usize,
}

/// Parse one catalog node (`.w_450.m_15.p_r.f_0`) into a best-score record.
#[must_use]
pub fn parse_music_record(node: ElementRef<'_>) -> Option<MusicRecord> {
    let (sheet, achievement) = parse_common(node, &MUSIC_LAYOUT)?;
    Some(MusicRecord { sheet, achievement })
}

/// Parse one recent-play node (`.p_10.t_l.f_0.v_b`).
#[must_use]
pub fn parse_recent_record(node: ElementRef<'_>) -> Option<RecentRecord> {
    let (sheet, achievement) = parse_common(node, &RECENT_LAYOUT)?;

    let mut track = None;
    let mut timestamp = None;
    for label in node.select(&SUB_TITLE) {
        let text = text_of(label);
        if track.is_none() {
            track = RE_TRACK
                .captures(&text)
                .and_then(|c| c[1].parse::<u8>().ok());
        }
        if timestamp.is_none() {
            timestamp = parse_jst_timestamp(&text);
        }
    }

    Some(RecentRecord {
        sheet,
        achievement,
        play: Play {
            track: track?,
            timestamp,
        },
    })
}

/// Every catalog node on a music genre page.
#[must_use]
pub fn parse_music_page(doc: &Html) -> Sweep<MusicRecord> {
    sweep(doc, &MUSIC_NODE, parse_music_record)
}

/// Every play on the recent-plays page, newest first as rendered.
#[must_use]
pub fn parse_recent_page(doc: &Html) -> Sweep<RecentRecord> {
    sweep(doc, &RECENT_NODE, parse_recent_record)
}

/// `2024/03/01 21:05` read as Japan Standard Time.
#[must_use]
pub fn parse_jst_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let c = RE_TIMESTAMP.captures(text)?;
    let date = NaiveDate::from_ymd_opt(c[1].parse().ok()?, c[2].parse().ok()?, c[3].parse().ok()?)?;
    let naive = date.and_hms_opt(c[4].parse().ok()?, c[5].parse().ok()?, 0)?;
    Tokyo
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.fixed_offset())
}

fn sweep<T>(doc: &Html, nodes: &Selector, parse: fn(ElementRef<'_>) -> Option<T>) -> Sweep<T> {
    let mut records = Vec::new();
    let mut dropped = 0;
    for node in doc.select(nodes) {
        match parse(node) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            parsed = records.len(),
            dropped,
            "skipped record nodes that failed extraction"
        );
    }
    Sweep { records, dropped }
}

fn parse_common(node: ElementRef<'_>, layout: &Layout) -> Option<(SheetRef, Achievement)> {
    let song_id = node
        .select(&layout.name)
        .next()
        .map(text_of)
        .filter(|s| !s.is_empty())?;

    let difficulty = node
        .select(&IMG)
        .filter_map(|img| img.value().attr("src"))
        .find_map(|src| RE_DIFFICULTY.captures(src))
        .and_then(|c| c[1].parse::<Difficulty>().ok())?;

    let kind = if difficulty == Difficulty::Utage {
        ChartType::Utage
    } else {
        chart_type(node, layout)?
    };

    let dx_score = node
        .select(&layout.dx_score)
        .next()
        .and_then(|el| DxScore::parse(&text_of(el)))?;
    let rate = node
        .select(&layout.achievement)
        .next()
        .and_then(|el| AchievementRate::parse(&text_of(el)))?;

    let flags = node
        .select(&layout.flag_icons)
        .filter_map(|img| img.value().attr("src"))
        .filter_map(Flag::from_icon_src)
        .collect();

    Some((
        SheetRef {
            song_id,
            kind,
            difficulty,
        },
        Achievement {
            rate,
            dx_score,
            flags,
        },
    ))
}

/// A dedicated DX/Standard icon wins over the generic kind icon.
fn chart_type(node: ElementRef<'_>, layout: &Layout) -> Option<ChartType> {
    if node.select(&KIND_ICON_DX).next().is_some() {
        return Some(ChartType::Dx);
    }
    if node.select(&KIND_ICON_STANDARD).next().is_some() {
        return Some(ChartType::Standard);
    }
    node.select(&layout.kind_icon)
        .filter_map(|img| img.value().attr("src"))
        .find_map(|src| RE_KIND.captures(src))
        .and_then(|c| c[1].parse::<ChartType>().ok())
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
