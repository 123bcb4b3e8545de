//! International portal (`maimaidx-eng.com`).
//!
//! Login goes through a separate identity provider. A good password is answered with a redirect
//! into the portal; a bad one with a redirect back to the provider's own login page, which shows
//! the reason in `#error`.

use url::Url;

use super::pages::{ERROR_PATH, element_text, is_error_page, sweep_music, sweep_recent};
use super::{AuthParams, RecordSource};
use crate::core::client::{INTL_BACK_URL, INTL_SITE_ID};
use crate::core::session::{location, read_text};
use crate::core::{MaiClient, MaiError, Session};
use crate::progress::{Progress, ProgressFn, ProgressState};
use crate::records::{MusicRecord, RecentRecord};

const LOGIN_PATH: &str = "login";
const SUBMIT_PATH: &str = "login/sid/";
/// Portal hops (ssid handoff, then home) followed after the provider's redirect.
const MAX_HOPS: usize = 5;

#[derive(Debug)]
pub struct IntlClient {
    session: Session,
    progress: Progress,
    portal: Url,
    auth_base: Url,
}

impl IntlClient {
    /// Create a client with a fresh session. Reports `ready` immediately.
    pub fn new(client: &MaiClient, progress: Option<ProgressFn>) -> Self {
        let progress = Progress::new(progress);
        progress.emit(ProgressState::Ready);
        Self {
            session: Session::new(client),
            progress,
            portal: client.intl_base().clone(),
            auth_base: client.intl_auth_base().clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn login_page(&self) -> Result<Url, MaiError> {
        let mut url = self.auth_base.join(LOGIN_PATH)?;
        url.query_pairs_mut()
            .append_pair("site_id", INTL_SITE_ID)
            .append_pair("redirect_url", self.portal.as_str())
            .append_pair("back_url", INTL_BACK_URL);
        Ok(url)
    }
}

impl RecordSource for IntlClient {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, auth), err, fields(region = "intl")))]
    async fn login(&mut self, auth: &AuthParams) -> Result<(), MaiError> {
        self.progress.emit(ProgressState::AuthInProgress);

        // Sets the provider's initial cookies.
        let login_page = self.login_page()?;
        self.session.fetch_text(&login_page).await?;

        let submit = self.auth_base.join(SUBMIT_PATH)?;
        let resp = self
            .session
            .post_form(
                &submit,
                &[
                    ("sid", auth.id.as_str()),
                    ("password", auth.password.as_str()),
                    ("retention", "1"),
                ],
            )
            .await?;
        let mut target = location(&resp).ok_or_else(|| {
            MaiError::Credential("identity provider did not redirect after login".into())
        })?;

        let error_page = self.portal.join(ERROR_PATH)?;
        for _ in 0..MAX_HOPS {
            let resp = self.session.get(&target).await?;
            let next = location(&resp).filter(|_| resp.status().is_redirection());
            let body = read_text(resp).await?;

            if target.origin() == self.auth_base.origin() {
                let reason = element_text(&body, "#error")
                    .unwrap_or_else(|| "login rejected by identity provider".into());
                return Err(MaiError::Credential(reason));
            }
            if is_error_page(&target, &error_page) {
                return Err(MaiError::Credential(
                    "portal rejected the login handoff".into(),
                ));
            }

            match next {
                Some(url) => target = url,
                None => {
                    self.progress.emit(ProgressState::AuthSucceeded);
                    return Ok(());
                }
            }
        }

        Err(MaiError::Data(format!(
            "login did not settle within {MAX_HOPS} redirects"
        )))
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(region = "intl")))]
    async fn fetch_recent_records(&mut self) -> Result<Vec<RecentRecord>, MaiError> {
        sweep_recent(&mut self.session, &self.progress, &self.portal).await
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(region = "intl")))]
    async fn fetch_music_records(&mut self) -> Result<Vec<MusicRecord>, MaiError> {
        sweep_music(&mut self.session, &self.progress, &self.portal).await
    }
}
