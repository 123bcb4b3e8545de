//! Browser-emulating HTTP session with a per-hostname cookie jar.
//!
//! The portals set and rotate cookies on nearly every response of the login choreography, and
//! several of those responses are redirects. The shared `reqwest::Client` therefore runs with
//! redirects disabled and without a cookie store; this type tracks cookies itself so that each
//! hop can be inspected before it is followed.

use std::collections::HashMap;

use reqwest::header::{COOKIE, LOCATION, SET_COOKIE, USER_AGENT};
use reqwest::{Method, Response};
use scraper::Html;
use url::Url;

use crate::core::client::BROWSER_HEADERS;
use crate::core::{MaiClient, MaiError, maintenance};

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredCookie {
    name: String,
    value: String,
}

/// One fetch operation's view of the upstream hosts.
///
/// Created together with a regional client and dropped with it; never shared between
/// operations.
#[derive(Debug)]
pub struct Session {
    client: MaiClient,
    jar: HashMap<String, Vec<StoredCookie>>,
}

impl Session {
    /// Start an empty session on top of a shared client.
    pub fn new(client: &MaiClient) -> Self {
        Self {
            client: client.clone(),
            jar: HashMap::new(),
        }
    }

    /// The shared client this session was created from.
    pub fn client(&self) -> &MaiClient {
        &self.client
    }

    /// Issue one request without following redirects.
    ///
    /// Stored cookies for the URL's host are attached, the browser header set is merged in, and
    /// every `Set-Cookie` on the response replaces any earlier cookie of the same name for that
    /// host.
    ///
    /// # Errors
    ///
    /// Returns [`MaiError::Http`] if the request cannot be sent.
    pub async fn fetch(
        &mut self,
        method: Method,
        url: &Url,
        form: Option<&[(&str, &str)]>,
    ) -> Result<Response, MaiError> {
        let mut req = self.client.http().request(method.clone(), url.clone());
        for (name, value) in BROWSER_HEADERS {
            req = req.header(*name, *value);
        }
        req = req.header(USER_AGENT, self.client.user_agent());
        if let Some(cookies) = self.cookie_header(url) {
            req = req.header(COOKIE, cookies);
        }
        if let Some(form) = form {
            req = req.form(form);
        }

        let resp = req.send().await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            method = %method,
            url = %url,
            status = resp.status().as_u16(),
            "upstream round trip"
        );

        self.store_cookies(url, &resp);
        Ok(resp)
    }

    /// `GET` shorthand for [`Session::fetch`].
    ///
    /// # Errors
    ///
    /// See [`Session::fetch`].
    pub async fn get(&mut self, url: &Url) -> Result<Response, MaiError> {
        self.fetch(Method::GET, url, None).await
    }

    /// `POST` an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// See [`Session::fetch`].
    pub async fn post_form(
        &mut self,
        url: &Url,
        form: &[(&str, &str)],
    ) -> Result<Response, MaiError> {
        self.fetch(Method::POST, url, Some(form)).await
    }

    /// `GET` a page and return its body after the maintenance check.
    ///
    /// # Errors
    ///
    /// [`MaiError::Http`] on transport failure, [`MaiError::Maintenance`] on the maintenance page.
    pub async fn fetch_text(&mut self, url: &Url) -> Result<String, MaiError> {
        let resp = self.get(url).await?;
        read_text(resp).await
    }

    /// `GET` a page, run the maintenance check and parse it as an HTML document.
    ///
    /// The returned document is not `Send`; drop it before the next `.await` in async code.
    ///
    /// # Errors
    ///
    /// See [`Session::fetch_text`].
    pub async fn fetch_as_dom(&mut self, url: &Url) -> Result<Html, MaiError> {
        let body = self.fetch_text(url).await?;
        Ok(Html::parse_document(&body))
    }

    /// The `Cookie` header value that would be sent to `url`'s host, if any cookie is stored.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        let cookies = self.jar.get(url.host_str()?)?;
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// The stored value of one cookie for `host`.
    pub fn cookie(&self, host: &str, name: &str) -> Option<&str> {
        self.jar
            .get(host)?
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    fn store_cookies(&mut self, url: &Url, resp: &Response) {
        let Some(host) = url.host_str() else {
            return;
        };
        for raw in resp.headers().get_all(SET_COOKIE) {
            let Some((name, value)) = raw.to_str().ok().and_then(parse_set_cookie) else {
                continue;
            };
            let cookies = self.jar.entry(host.to_string()).or_default();
            match cookies.iter_mut().find(|c| c.name == name) {
                Some(existing) => existing.value = value,
                None => cookies.push(StoredCookie { name, value }),
            }
        }
    }
}

/// Read a response body and reject the maintenance page.
///
/// # Errors
///
/// [`MaiError::Http`] if the body cannot be read, [`MaiError::Maintenance`] on the maintenance
/// page.
pub async fn read_text(resp: Response) -> Result<String, MaiError> {
    let text = crate::core::net::get_text(resp).await?;
    maintenance::check(&text)?;
    Ok(text)
}

/// Resolve a redirect response's `Location` header against the URL that produced it.
pub fn location(resp: &Response) -> Option<Url> {
    let raw = resp.headers().get(LOCATION)?.to_str().ok()?;
    resp.url().join(raw).ok()
}

/// `name=value; Path=/; ...` → `(name, value)`.
fn parse_set_cookie(raw: &str) -> Option<(String, String)> {
    let pair = raw.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
