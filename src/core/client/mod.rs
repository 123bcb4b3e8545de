//! Public client surface + builder.
//! Defaults (UA, browser headers, portal roots) live in `constants`.

mod constants;

pub(crate) use constants::{BROWSER_HEADERS, INTL_BACK_URL, INTL_SITE_ID};

use crate::core::MaiError;
use constants::{
    DEFAULT_INTL_AUTH_BASE, DEFAULT_INTL_BASE, DEFAULT_JP_BASE, ENV_EXTRA_CA_PEM, USER_AGENT,
};
use reqwest::{Certificate, Client, redirect};
use std::time::Duration;
use url::Url;

/// Shared transport and endpoint configuration.
///
/// A `MaiClient` holds no cookies and no credentials. It is cheap to clone and may be shared by
/// any number of concurrent fetch operations; each operation builds its own
/// [`Session`](crate::core::Session) on top of it.
#[derive(Debug, Clone)]
pub struct MaiClient {
    http: Client,
    user_agent: String,
    jp_base: Url,
    intl_base: Url,
    intl_auth_base: Url,
}

impl MaiClient {
    /// Create a new builder.
    pub fn builder() -> MaiClientBuilder {
        MaiClientBuilder::default()
    }

    /// Build a client with default endpoints.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, MaiError> {
        Self::builder().build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn user_agent(&self) -> &str {
        &self.user_agent
    }
    pub(crate) fn jp_base(&self) -> &Url {
        &self.jp_base
    }
    pub(crate) fn intl_base(&self) -> &Url {
        &self.intl_base
    }
    pub(crate) fn intl_auth_base(&self) -> &Url {
        &self.intl_auth_base
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct MaiClientBuilder {
    user_agent: Option<String>,
    jp_base: Option<Url>,
    intl_base: Option<Url>,
    intl_auth_base: Option<Url>,
    extra_certificates: Vec<Vec<u8>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl MaiClientBuilder {
    /// Start from defaults plus whatever the environment configures.
    ///
    /// Reads a PEM file from `MAINET_EXTRA_CA_PEM` if set. Some runtime trust stores do not
    /// recognise the portal's certificate chain; pointing this at the missing intermediate
    /// fixes it without hard-coding the certificate.
    ///
    /// # Errors
    ///
    /// Fails if the variable is set but the file cannot be read.
    pub fn from_env() -> Result<Self, MaiError> {
        let mut builder = Self::default();
        if let Ok(path) = std::env::var(ENV_EXTRA_CA_PEM) {
            let pem = std::fs::read(&path)
                .map_err(|e| MaiError::Certificate(format!("{ENV_EXTRA_CA_PEM}={path}: {e}")))?;
            builder = builder.extra_root_certificate(pem);
        }
        Ok(builder)
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the Japanese portal root (e.g., `https://maimaidx.jp/maimai-mobile/`).
    pub fn jp_base(mut self, url: Url) -> Self {
        self.jp_base = Some(url);
        self
    }

    /// Override the International portal root (e.g., `https://maimaidx-eng.com/maimai-mobile/`).
    pub fn intl_base(mut self, url: Url) -> Self {
        self.intl_base = Some(url);
        self
    }

    /// Override the International identity provider root
    /// (e.g., `https://lng-tgk-aime-gw.am-all.net/common_auth/`).
    pub fn intl_auth_base(mut self, url: Url) -> Self {
        self.intl_auth_base = Some(url);
        self
    }

    /// Trust one more PEM-encoded certificate in addition to the default roots.
    /// May be called repeatedly.
    pub fn extra_root_certificate(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.extra_certificates.push(pem.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Fails on a malformed extra certificate or if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<MaiClient, MaiError> {
        let jp_base = self.jp_base.unwrap_or(Url::parse(DEFAULT_JP_BASE)?);
        let intl_base = self.intl_base.unwrap_or(Url::parse(DEFAULT_INTL_BASE)?);
        let intl_auth_base = self
            .intl_auth_base
            .unwrap_or(Url::parse(DEFAULT_INTL_AUTH_BASE)?);
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_string());

        // Redirects are followed by hand so the login flows can inspect each Location.
        let mut httpb = reqwest::Client::builder()
            .user_agent(user_agent.as_str())
            .redirect(redirect::Policy::none());

        for pem in &self.extra_certificates {
            let cert =
                Certificate::from_pem(pem).map_err(|e| MaiError::Certificate(e.to_string()))?;
            httpb = httpb.add_root_certificate(cert);
        }
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(MaiClient {
            http,
            user_agent,
            jp_base,
            intl_base,
            intl_auth_base,
        })
    }
}
