//! Blocking-mode orchestration: one call in, one complete result (or one fault) out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{MaiClient, MaiError};
use crate::progress::{Progress, ProgressFn, ProgressState};
use crate::records::{FetchResult, MusicRecord, RecentRecord};
use crate::region::{AuthParams, RecordSource, Region};

/// What an outer request layer hands to this crate.
#[derive(Clone, Deserialize)]
pub struct FetchRequest {
    pub id: String,
    pub password: String,
    pub region: Region,
}

impl FetchRequest {
    pub fn new(id: impl Into<String>, password: impl Into<String>, region: Region) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
            region,
        }
    }

    /// Reject requests that cannot possibly log in.
    ///
    /// # Errors
    ///
    /// [`MaiError::InvalidRequest`] if the id or password is blank.
    pub fn validate(&self) -> Result<(), MaiError> {
        if self.id.trim().is_empty() {
            return Err(MaiError::InvalidRequest("id is required".into()));
        }
        if self.password.is_empty() {
            return Err(MaiError::InvalidRequest("password is required".into()));
        }
        Ok(())
    }

    pub fn auth(&self) -> AuthParams {
        AuthParams::new(self.id.clone(), self.password.clone())
    }
}

impl fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchRequest")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

/// Blocking-mode response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub recent_records: Vec<RecentRecord>,
    pub music_records: Vec<MusicRecord>,
}

impl From<FetchResult> for FetchResponse {
    fn from(r: FetchResult) -> Self {
        Self {
            recent_records: r.recent,
            music_records: r.music,
        }
    }
}

/// Log in, then fetch recent plays and the full catalog, in that order.
///
/// Nothing is returned unless every step succeeds.
///
/// # Errors
///
/// The first fault of any step.
pub async fn collect<S: RecordSource>(
    source: &mut S,
    auth: &AuthParams,
) -> Result<FetchResult, MaiError> {
    source.login(auth).await?;
    let recent = source.fetch_recent_records().await?;
    let music = source.fetch_music_records().await?;
    Ok(FetchResult { music, recent })
}

/// Run a whole fetch for `request`, reporting every state through `progress` and finishing
/// with `concluded`.
///
/// # Errors
///
/// [`MaiError::InvalidRequest`] before any network traffic, otherwise the first upstream fault.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client, progress), err, fields(region = %request.region)))]
pub async fn run_with_progress(
    client: &MaiClient,
    request: &FetchRequest,
    progress: Option<ProgressFn>,
) -> Result<FetchResult, MaiError> {
    request.validate()?;
    let mut source = request.region.client(client, progress.clone());
    let result = collect(&mut source, &request.auth()).await?;

    #[cfg(feature = "tracing")]
    tracing::info!(
        recent = result.recent.len(),
        music = result.music.len(),
        "fetch concluded"
    );

    Progress::new(progress).emit(ProgressState::Concluded);
    Ok(result)
}

/// Blocking mode: the full result or the first fault, without progress reporting.
///
/// # Errors
///
/// See [`run_with_progress`].
pub async fn fetch_records(
    client: &MaiClient,
    request: &FetchRequest,
) -> Result<FetchResponse, MaiError> {
    run_with_progress(client, request, None).await.map(Into::into)
}
