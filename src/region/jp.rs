//! Japanese portal (`maimaidx.jp`).
//!
//! Login is a token-protected form post followed by an account ("Aime") selection that must be
//! submitted before any record page is served.

use url::Url;

use super::pages::{ERROR_PATH, input_value, is_error_page, sweep_music, sweep_recent};
use super::{AuthParams, RecordSource};
use crate::core::session::{location, read_text};
use crate::core::{MaiClient, MaiError, Session};
use crate::progress::{Progress, ProgressFn, ProgressState};
use crate::records::{MusicRecord, RecentRecord};

const SUBMIT_PATH: &str = "submit/";
/// Pages that finish establishing the session, in order.
const SESSION_STEPS: &[&str] = &["aimeList/", "aimeList/submit/?idx=0", "home/"];

#[derive(Debug)]
pub struct JpClient {
    session: Session,
    progress: Progress,
    portal: Url,
}

impl JpClient {
    /// Create a client with a fresh session. Reports `ready` immediately.
    pub fn new(client: &MaiClient, progress: Option<ProgressFn>) -> Self {
        let progress = Progress::new(progress);
        progress.emit(ProgressState::Ready);
        Self {
            session: Session::new(client),
            progress,
            portal: client.jp_base().clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn establish_session(&mut self, error_page: &Url) -> Result<(), MaiError> {
        for step in SESSION_STEPS {
            let url = self.portal.join(step)?;
            let resp = self.session.get(&url).await?;
            if location(&resp).is_some_and(|target| is_error_page(&target, error_page)) {
                return Err(MaiError::Credential(format!(
                    "account selection rejected at {url}"
                )));
            }
            read_text(resp).await?;
        }
        Ok(())
    }
}

impl RecordSource for JpClient {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, auth), err, fields(region = "jp")))]
    async fn login(&mut self, auth: &AuthParams) -> Result<(), MaiError> {
        self.progress.emit(ProgressState::AuthInProgress);

        let login_page = self.portal.clone();
        let body = self.session.fetch_text(&login_page).await?;
        let token = input_value(&body, "token")
            .ok_or_else(|| MaiError::Data("login page has no token field".into()))?;

        let submit = self.portal.join(SUBMIT_PATH)?;
        let resp = self
            .session
            .post_form(
                &submit,
                &[
                    ("segaId", auth.id.as_str()),
                    ("password", auth.password.as_str()),
                    ("save_cookie", "on"),
                    ("token", token.as_str()),
                ],
            )
            .await?;

        let error_page = self.portal.join(ERROR_PATH)?;
        if location(&resp).is_some_and(|target| is_error_page(&target, &error_page)) {
            return Err(MaiError::Credential("invalid SEGA ID or password".into()));
        }
        read_text(resp).await?;

        self.establish_session(&error_page).await?;

        self.progress.emit(ProgressState::AuthSucceeded);
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(region = "jp")))]
    async fn fetch_recent_records(&mut self) -> Result<Vec<RecentRecord>, MaiError> {
        sweep_recent(&mut self.session, &self.progress, &self.portal).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(region = "jp")))]
    async fn fetch_music_records(&mut self) -> Result<Vec<MusicRecord>, MaiError> {
        sweep_music(&mut self.session, &self.progress, &self.portal).await
    }
}
