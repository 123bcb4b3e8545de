use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Variants are split so that callers can tell "check your credentials" apart from
/// "try again later": see [`MaiError::is_retryable`].
#[derive(Debug, Error)]
pub enum MaiError {
    /// The upstream portal rejected the supplied id/password.
    ///
    /// For the International region this carries the identity provider's own message verbatim.
    #[error("login rejected: {0}")]
    Credential(String),

    /// The portal redirected to its generic error page outside of login, which means the
    /// session was invalidated mid-operation.
    #[error("session invalidated: {0}")]
    Session(String),

    /// The portal is serving its scheduled maintenance page.
    #[error("MaimaiNET is under maintenance")]
    Maintenance,

    /// A network-level failure reaching the upstream host.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A page was missing a structural element the login choreography depends on.
    #[error("Page layout unexpected or missing element: {0}")]
    Data(String),

    /// The fetch request was rejected before any upstream call was made.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A configured extra certificate could not be loaded.
    #[error("invalid certificate: {0}")]
    Certificate(String),
}

impl MaiError {
    /// Whether repeating the same operation later may succeed without user action.
    ///
    /// Maintenance windows and transport faults are transient; credential, session and
    /// configuration faults are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Maintenance | Self::Http(_) | Self::Status { .. })
    }
}
