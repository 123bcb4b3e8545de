//! Structured play records and the parsers that extract them from portal pages.

pub mod flags;
mod model;
pub mod parse;

pub use flags::{FLAG_MARKERS, Flag};
pub use model::{
    Achievement, AchievementRate, AchievementRecord, ChartType, Difficulty, DxScore, FetchResult,
    MusicRecord, Play, RecentRecord, SheetRef,
};
pub use parse::{Sweep, parse_music_page, parse_music_record, parse_recent_page, parse_recent_record};
