use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::flags::Flag;

/// Chart flavour. Utage charts have no standard/DX icon and are always `Utage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Standard,
    Dx,
    Utage,
}

impl ChartType {
    /// Wire name (`standard`, `dx`, `utage`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Dx => "dx",
            Self::Utage => "utage",
        }
    }
}

impl FromStr for ChartType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "dx" => Ok(Self::Dx),
            "utage" => Ok(Self::Utage),
            _ => Err(()),
        }
    }
}

/// Chart difficulty as named by the portal's `diff_<name>.png` icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Advanced,
    Expert,
    Master,
    Remaster,
    Utage,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
            Self::Master => "master",
            Self::Remaster => "remaster",
            Self::Utage => "utage",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            "master" => Ok(Self::Master),
            "remaster" => Ok(Self::Remaster),
            "utage" => Ok(Self::Utage),
            _ => Err(()),
        }
    }
}

/// Identity of one chart. Consumers match records against their catalog by this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRef {
    /// Song title exactly as rendered by the portal.
    pub song_id: String,
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub difficulty: Difficulty,
}

/// Achievement rate in ten-thousandths of a percent: `100.5000%` is `1_005_000`.
///
/// The portal renders four decimals, so the integer is exact for every value it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementRate(u32);

impl AchievementRate {
    /// Units per percent.
    pub const SCALE: u32 = 10_000;

    #[must_use]
    pub const fn from_ten_thousandths(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn ten_thousandths(self) -> u32 {
        self.0
    }

    /// The rate as a percentage, e.g. `100.5000`.
    #[must_use]
    pub fn as_percent(self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Parse a rendered rate such as `"100.5000%"` or `"99.5%"`.
    ///
    /// Digits past the fourth decimal are truncated. Negative or non-numeric text yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '%')
            .collect();
        let percent = Decimal::from_str(&cleaned).ok()?;
        if percent.is_sign_negative() {
            return None;
        }
        let scaled = percent.checked_mul(Decimal::from(Self::SCALE))?.trunc();
        scaled.to_u32().map(Self)
    }
}

impl fmt::Display for AchievementRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}%", self.as_percent())
    }
}

/// DX score: points achieved out of the chart's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DxScore {
    pub achieved: u32,
    pub total: u32,
}

impl DxScore {
    /// Parse `"1,234 / 1,500"`. Both sides must be integers or the whole pair is rejected.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (achieved, total) = text.trim().split_once(" / ")?;
        Some(Self {
            achieved: parse_grouped(achieved)?,
            total: parse_grouped(total)?,
        })
    }
}

fn parse_grouped(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub rate: AchievementRate,
    pub dx_score: DxScore,
    /// Badges in the order the page shows them.
    pub flags: Vec<Flag>,
}

/// Best result for one chart, from the catalog pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicRecord {
    pub sheet: SheetRef,
    pub achievement: Achievement,
}

/// Where a recent play sits in its credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub track: u8,
    /// Play time in JST, minute precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

/// One entry of the recent-plays page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRecord {
    pub sheet: SheetRef,
    pub achievement: Achievement,
    pub play: Play,
}

impl From<RecentRecord> for MusicRecord {
    fn from(r: RecentRecord) -> Self {
        Self {
            sheet: r.sheet,
            achievement: r.achievement,
        }
    }
}

/// Either kind of record; a record with `play` is a recent play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AchievementRecord {
    Recent(RecentRecord),
    Music(MusicRecord),
}

impl AchievementRecord {
    pub fn sheet(&self) -> &SheetRef {
        match self {
            Self::Recent(r) => &r.sheet,
            Self::Music(m) => &m.sheet,
        }
    }

    pub fn achievement(&self) -> &Achievement {
        match self {
            Self::Recent(r) => &r.achievement,
            Self::Music(m) => &m.achievement,
        }
    }

    pub fn play(&self) -> Option<&Play> {
        match self {
            Self::Recent(r) => Some(&r.play),
            Self::Music(_) => None,
        }
    }
}

/// Terminal payload of a complete fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub music: Vec<MusicRecord>,
    pub recent: Vec<RecentRecord>,
}
