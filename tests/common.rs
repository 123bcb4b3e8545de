#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::{fs, path::Path};

use httpmock::{
    Method::{GET, POST},
    Mock, MockServer,
};
use maimainet_rs::{MaiClient, ProgressFn, ProgressState};
use url::Url;

pub const PORTAL: &str = "/maimai-mobile/";
pub const AUTH: &str = "/common_auth/";

pub fn setup_server() -> MockServer {
    init_tracing();
    MockServer::start()
}

#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_tracing() {}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.html"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn portal_url(server: &MockServer) -> Url {
    Url::parse(&server.url(PORTAL)).unwrap()
}

/// Client whose JP portal is `server`.
pub fn jp_client(server: &MockServer) -> MaiClient {
    MaiClient::builder()
        .jp_base(portal_url(server))
        .build()
        .unwrap()
}

/// Client whose INTL portal is `portal` and identity provider is `idp`.
pub fn intl_client(portal: &MockServer, idp: &MockServer) -> MaiClient {
    MaiClient::builder()
        .intl_base(portal_url(portal))
        .intl_auth_base(Url::parse(&idp.url(AUTH)).unwrap())
        .build()
        .unwrap()
}

/// Progress callback that records every state it sees.
pub fn recorder() -> (ProgressFn, Arc<Mutex<Vec<ProgressState>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let progress: ProgressFn = Arc::new(move |state| sink.lock().unwrap().push(state));
    (progress, seen)
}

/// A catalog page with one played chart per title.
pub fn music_page(diff: &str, titles: &[&str]) -> String {
    let nodes: String = titles
        .iter()
        .map(|title| {
            format!(
                r#"<div class="w_450 m_15 p_r f_0">
  <div class="music_{diff}_score_back pointer p_3">
    <img src="https://maimaidx.jp/maimai-mobile/img/diff_{diff}.png" class="h_20 f_l">
    <div class="music_name_block t_l f_13 break">{title}</div>
    <div class="music_score_block w_112 t_r f_l f_12">97.0000%</div>
    <div class="music_score_block w_190 t_r f_l f_12">900 / 1,200</div>
  </div>
  <img src="https://maimaidx.jp/maimai-mobile/img/music_standard.png" class="music_kind_icon">
</div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="main_wrapper t_c">{nodes}</div></body></html>"#)
}

/// Catalog body served for each `diff` query value.
pub fn tier_body(diff: &str) -> String {
    match diff {
        "0" => music_page("basic", &["First Love"]),
        "1" => music_page("advanced", &["First Love"]),
        "2" => music_page("expert", &[]),
        "3" => fixture("music_master"),
        "4" => music_page("remaster", &["Lunatic Vibes"]),
        _ => music_page("utage", &["[宴] Oshama Scramble!"]),
    }
}

pub const TIERS: [&str; 6] = ["0", "1", "2", "3", "4", "10"];

/// Records a full sweep of [`tier_body`] yields.
pub const CATALOG_LEN: usize = 1 + 1 + 0 + 2 + 1 + 1;
/// Records [`fixture`]`("record_recent")` yields.
pub const RECENT_LEN: usize = 2;

/// Mocks for the JP login choreography, ending on the home page.
pub struct JpLogin<'a> {
    pub page: Mock<'a>,
    pub submit: Mock<'a>,
    pub aime_list: Mock<'a>,
    pub aime_submit: Mock<'a>,
    pub home: Mock<'a>,
}

pub fn mock_jp_login(server: &MockServer) -> JpLogin<'_> {
    let page = server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/");
        then.status(200)
            .header("content-type", "text/html")
            .header("set-cookie", "_t=4f2a9c1e7b0d; Path=/; Secure")
            .body(fixture("jp_login"));
    });
    let submit = server.mock(|when, then| {
        when.method(POST).path("/maimai-mobile/submit/");
        then.status(302)
            .header("set-cookie", "userId=7310; Path=/; Secure; HttpOnly")
            .header("location", server.url("/maimai-mobile/aimeList/"));
    });
    let aime_list = server.mock(|when, then| {
        when.method(GET)
            .path("/maimai-mobile/aimeList/")
            .header("cookie", "_t=4f2a9c1e7b0d; userId=7310");
        then.status(200).body("<html><body>aime</body></html>");
    });
    let aime_submit = server.mock(|when, then| {
        when.method(GET)
            .path("/maimai-mobile/aimeList/submit/")
            .query_param("idx", "0");
        then.status(302)
            .header("location", "/maimai-mobile/home/");
    });
    let home = server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/home/");
        then.status(200).body("<html><body>home</body></html>");
    });
    JpLogin {
        page,
        submit,
        aime_list,
        aime_submit,
        home,
    }
}

/// Mocks for the recent page and all six catalog tiers of a portal at `server`.
pub fn mock_record_pages(server: &MockServer) -> (Mock<'_>, Vec<Mock<'_>>) {
    let recent = server.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/record/");
        then.status(200)
            .header("content-type", "text/html")
            .body(fixture("record_recent"));
    });
    let tiers = TIERS
        .iter()
        .map(|diff| {
            server.mock(|when, then| {
                when.method(GET)
                    .path("/maimai-mobile/record/musicGenre/search/")
                    .query_param("genre", "99")
                    .query_param("diff", *diff);
                then.status(200)
                    .header("content-type", "text/html")
                    .body(tier_body(diff));
            })
        })
        .collect();
    (recent, tiers)
}

/// Identity provider pages for a successful INTL login handing off to `portal`.
pub fn mock_intl_login<'a>(idp: &'a MockServer, portal: &'a MockServer) -> Vec<Mock<'a>> {
    let page = idp.mock(|when, then| {
        when.method(GET)
            .path("/common_auth/login")
            .query_param("site_id", "maimaidxex");
        then.status(200)
            .header("set-cookie", "JSESSIONID=idp-1; Path=/common_auth")
            .body("<html><body><form></form></body></html>");
    });
    let submit = idp.mock(|when, then| {
        when.method(POST).path("/common_auth/login/sid/");
        then.status(302)
            .header("location", format!("{}?ssid=f00d", portal.url(PORTAL)));
    });
    let handoff = portal.mock(|when, then| {
        when.method(GET)
            .path("/maimai-mobile/")
            .query_param("ssid", "f00d");
        then.status(302)
            .header("set-cookie", "userId=9001; Path=/; Secure")
            .header("location", "/maimai-mobile/home/");
    });
    let home = portal.mock(|when, then| {
        when.method(GET).path("/maimai-mobile/home/");
        then.status(200).body("<html><body>home</body></html>");
    });
    vec![page, submit, handoff, home]
}
