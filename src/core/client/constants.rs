//! Centralized constants for default endpoints and the emulated browser.

/// Mobile Safari UA; the portal is a smartphone site and serves a reduced page to desktops.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) ",
    "AppleWebKit/605.1.15 (KHTML, like Gecko) ",
    "Version/17.5 Mobile/15E148 Safari/604.1"
);

/// Headers a navigating browser sends with every document request.
pub(crate) const BROWSER_HEADERS: &[(&str, &str)] = &[
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("accept-language", "ja,en-US;q=0.9,en;q=0.8"),
    ("cache-control", "no-cache"),
    ("pragma", "no-cache"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "same-origin"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
];

/// Japanese portal root; every JP page is joined onto it.
pub(crate) const DEFAULT_JP_BASE: &str = "https://maimaidx.jp/maimai-mobile/";

/// International portal root.
pub(crate) const DEFAULT_INTL_BASE: &str = "https://maimaidx-eng.com/maimai-mobile/";

/// Identity provider used by the International portal.
pub(crate) const DEFAULT_INTL_AUTH_BASE: &str = "https://lng-tgk-aime-gw.am-all.net/common_auth/";

/// Where the identity provider sends the user after "back".
pub(crate) const INTL_BACK_URL: &str = "https://maimai.sega.com/";

/// Site identifier the identity provider expects for the International portal.
pub(crate) const INTL_SITE_ID: &str = "maimaidxex";

/// Environment variable naming a PEM file with extra trusted certificates.
pub(crate) const ENV_EXTRA_CA_PEM: &str = "MAINET_EXTRA_CA_PEM";
