//! Regional portal clients.
//!
//! Both deployments serve the same record pages but log in differently, so each region has its
//! own client implementing [`RecordSource`]. The clients share only the [`Session`] mechanics and
//! the record sweeps in `pages`.

mod intl;
mod jp;
mod pages;

pub use intl::IntlClient;
pub use jp::JpClient;

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{MaiClient, MaiError, Session};
use crate::progress::ProgressFn;
use crate::records::{MusicRecord, RecentRecord};

/// Account credentials for one login. Never persisted by this crate.
#[derive(Clone, Deserialize)]
pub struct AuthParams {
    pub id: String,
    pub password: String,
}

impl AuthParams {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AuthParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthParams")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The operations every regional client offers.
///
/// Call order is `login`, then any number of record fetches. Each call is a sequential chain of
/// round trips on the client's own session.
pub trait RecordSource: Send {
    /// Run the region's login choreography.
    fn login(&mut self, auth: &AuthParams) -> impl Future<Output = Result<(), MaiError>> + Send;

    /// Fetch the recent-plays page.
    fn fetch_recent_records(
        &mut self,
    ) -> impl Future<Output = Result<Vec<RecentRecord>, MaiError>> + Send;

    /// Fetch every catalog tier, Basic through Utage.
    fn fetch_music_records(
        &mut self,
    ) -> impl Future<Output = Result<Vec<MusicRecord>, MaiError>> + Send;
}

/// Portal deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Jp,
    Intl,
}

impl Region {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jp => "jp",
            Self::Intl => "intl",
        }
    }

    /// Build this region's client with a fresh session.
    pub fn client(self, client: &MaiClient, progress: Option<ProgressFn>) -> RegionalClient {
        match self {
            Self::Jp => RegionalClient::Jp(JpClient::new(client, progress)),
            Self::Intl => RegionalClient::Intl(IntlClient::new(client, progress)),
        }
    }
}

impl FromStr for Region {
    type Err = MaiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jp" => Ok(Self::Jp),
            "intl" => Ok(Self::Intl),
            other => Err(MaiError::InvalidRequest(format!(
                "unsupported region `{other}`"
            ))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client for either region, chosen at runtime.
#[derive(Debug)]
pub enum RegionalClient {
    Jp(JpClient),
    Intl(IntlClient),
}

impl RegionalClient {
    pub fn region(&self) -> Region {
        match self {
            Self::Jp(_) => Region::Jp,
            Self::Intl(_) => Region::Intl,
        }
    }

    pub fn session(&self) -> &Session {
        match self {
            Self::Jp(c) => c.session(),
            Self::Intl(c) => c.session(),
        }
    }
}

impl RecordSource for RegionalClient {
    async fn login(&mut self, auth: &AuthParams) -> Result<(), MaiError> {
        match self {
            Self::Jp(c) => c.login(auth).await,
            Self::Intl(c) => c.login(auth).await,
        }
    }

    async fn fetch_recent_records(&mut self) -> Result<Vec<RecentRecord>, MaiError> {
        match self {
            Self::Jp(c) => c.fetch_recent_records().await,
            Self::Intl(c) => c.fetch_recent_records().await,
        }
    }

    async fn fetch_music_records(&mut self) -> Result<Vec<MusicRecord>, MaiError> {
        match self {
            Self::Jp(c) => c.fetch_music_records().await,
            Self::Intl(c) => c.fetch_music_records().await,
        }
    }
}
