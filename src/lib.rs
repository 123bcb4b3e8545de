//! maimainet-rs: session-emulating scraper for MaimaiNET play records.
//!
//! Logs into the Japanese or International portal with a player's credentials, walks the
//! recent-plays page and the six catalog tiers, and returns structured records. Progress is
//! reported as a fixed sequence of [`ProgressState`]s, either through a callback or as a stream
//! of [`FetchEvent`]s.
//!
//! ```no_run
//! # use maimainet_rs::{FetchRequest, MaiClient, Region, fetch::fetch_records};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MaiClient::builder().build()?;
//! let request = FetchRequest::new("sega-id", "password", Region::Jp);
//! let response = fetch_records(&client, &request).await?;
//! println!("{} charts played", response.music_records.len());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod fetch;
pub mod progress;
pub mod records;
pub mod region;
pub mod stream;

pub use crate::core::{MaiClient, MaiClientBuilder, MaiError, Session};
pub use fetch::{FetchRequest, FetchResponse};
pub use progress::{ProgressFn, ProgressState, Tier};
pub use records::{
    Achievement, AchievementRate, AchievementRecord, ChartType, Difficulty, DxScore, FetchResult,
    Flag, MusicRecord, Play, RecentRecord, SheetRef,
};
pub use region::{AuthParams, IntlClient, JpClient, RecordSource, Region, RegionalClient};
pub use stream::{FetchEvent, FetchStream, StreamHandle};
