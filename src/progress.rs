//! Progress vocabulary of a fetch operation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Every state a fetch reports, in the order a successful fetch reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProgressState {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "auth:in-progress")]
    AuthInProgress,
    #[serde(rename = "auth:succeeded")]
    AuthSucceeded,
    #[serde(rename = "fetch:recent:in-progress")]
    RecentInProgress,
    #[serde(rename = "fetch:recent:completed")]
    RecentCompleted,
    #[serde(rename = "fetch:music:in-progress:basic")]
    MusicBasic,
    #[serde(rename = "fetch:music:in-progress:advanced")]
    MusicAdvanced,
    #[serde(rename = "fetch:music:in-progress:expert")]
    MusicExpert,
    #[serde(rename = "fetch:music:in-progress:master")]
    MusicMaster,
    #[serde(rename = "fetch:music:in-progress:remaster")]
    MusicRemaster,
    #[serde(rename = "fetch:music:in-progress:utage")]
    MusicUtage,
    #[serde(rename = "fetch:music:completed")]
    MusicCompleted,
    #[serde(rename = "concluded")]
    Concluded,
}

impl ProgressState {
    /// What a regional client reports over one successful login + recent + music run.
    pub const CLIENT_SEQUENCE: [Self; 12] = [
        Self::Ready,
        Self::AuthInProgress,
        Self::AuthSucceeded,
        Self::RecentInProgress,
        Self::RecentCompleted,
        Self::MusicBasic,
        Self::MusicAdvanced,
        Self::MusicExpert,
        Self::MusicMaster,
        Self::MusicRemaster,
        Self::MusicUtage,
        Self::MusicCompleted,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::AuthInProgress => "auth:in-progress",
            Self::AuthSucceeded => "auth:succeeded",
            Self::RecentInProgress => "fetch:recent:in-progress",
            Self::RecentCompleted => "fetch:recent:completed",
            Self::MusicBasic => "fetch:music:in-progress:basic",
            Self::MusicAdvanced => "fetch:music:in-progress:advanced",
            Self::MusicExpert => "fetch:music:in-progress:expert",
            Self::MusicMaster => "fetch:music:in-progress:master",
            Self::MusicRemaster => "fetch:music:in-progress:remaster",
            Self::MusicUtage => "fetch:music:in-progress:utage",
            Self::MusicCompleted => "fetch:music:completed",
            Self::Concluded => "concluded",
        }
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One partition of the score catalog, fetched as its own page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Basic,
    Advanced,
    Expert,
    Master,
    Remaster,
    Utage,
}

impl Tier {
    /// Catalog sweep order.
    pub const ALL: [Self; 6] = [
        Self::Basic,
        Self::Advanced,
        Self::Expert,
        Self::Master,
        Self::Remaster,
        Self::Utage,
    ];

    /// Value of the catalog page's `diff` query parameter.
    #[must_use]
    pub const fn query_value(self) -> &'static str {
        match self {
            Self::Basic => "0",
            Self::Advanced => "1",
            Self::Expert => "2",
            Self::Master => "3",
            Self::Remaster => "4",
            Self::Utage => "10",
        }
    }

    /// The state reported once this tier's page has been fetched.
    #[must_use]
    pub const fn progress_state(self) -> ProgressState {
        match self {
            Self::Basic => ProgressState::MusicBasic,
            Self::Advanced => ProgressState::MusicAdvanced,
            Self::Expert => ProgressState::MusicExpert,
            Self::Master => ProgressState::MusicMaster,
            Self::Remaster => ProgressState::MusicRemaster,
            Self::Utage => ProgressState::MusicUtage,
        }
    }
}

/// Callback receiving progress states as they happen.
///
/// Shared so the orchestrator can report `concluded` through the same callback it handed to the
/// regional client.
pub type ProgressFn = Arc<dyn Fn(ProgressState) + Send + Sync>;

/// Optional progress sink owned by a regional client.
#[derive(Default)]
pub struct Progress(Option<ProgressFn>);

impl Progress {
    pub fn new(callback: Option<ProgressFn>) -> Self {
        Self(callback)
    }

    /// Report one state; a no-op without a callback.
    pub fn emit(&self, state: ProgressState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(state = state.as_str(), "progress");
        if let Some(cb) = &self.0 {
            cb(state);
        }
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Progress")
            .field(&self.0.as_ref().map(|_| "callback"))
            .finish()
    }
}
