//! Record pages shared by both portals, and small page helpers for the login flows.

use scraper::{Html, Selector};
use url::Url;

use crate::core::session::{location, read_text};
use crate::core::{MaiError, Session};
use crate::progress::{Progress, ProgressState, Tier};
use crate::records::{MusicRecord, RecentRecord, parse_music_page, parse_recent_page};

/// Paths below a portal root (`.../maimai-mobile/`).
pub(super) const ERROR_PATH: &str = "error/";
pub(super) const RECENT_PATH: &str = "record/";
pub(super) const MUSIC_SEARCH_PATH: &str = "record/musicGenre/search/";
/// Catalog genre covering every song.
const ALL_GENRES: &str = "99";

/// `target` is `error_page`, ignoring query and fragment.
pub(super) fn is_error_page(target: &Url, error_page: &Url) -> bool {
    target.origin() == error_page.origin() && target.path() == error_page.path()
}

/// `GET` a record page of a logged-in session.
///
/// A redirect to the portal's error page means the session was dropped upstream.
pub(super) async fn fetch_record_page(
    session: &mut Session,
    url: &Url,
    error_page: &Url,
) -> Result<String, MaiError> {
    let resp = session.get(url).await?;
    let status = resp.status();
    if status.is_redirection() {
        if location(&resp).is_some_and(|target| is_error_page(&target, error_page)) {
            return Err(MaiError::Session(format!(
                "redirected to the error page while loading {url}"
            )));
        }
        return Err(MaiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    if !status.is_success() {
        // Maintenance pages are served with error statuses too.
        read_text(resp).await?;
        return Err(MaiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    read_text(resp).await
}

pub(super) async fn sweep_recent(
    session: &mut Session,
    progress: &Progress,
    portal: &Url,
) -> Result<Vec<RecentRecord>, MaiError> {
    progress.emit(ProgressState::RecentInProgress);

    let url = portal.join(RECENT_PATH)?;
    let error_page = portal.join(ERROR_PATH)?;
    let body = fetch_record_page(session, &url, &error_page).await?;
    let sweep = parse_recent_page(&Html::parse_document(&body));

    #[cfg(feature = "tracing")]
    tracing::info!(
        parsed = sweep.records.len(),
        dropped = sweep.dropped,
        "recent plays fetched"
    );

    progress.emit(ProgressState::RecentCompleted);
    Ok(sweep.records)
}

/// Walk the six catalog tiers one page at a time, never concurrently.
pub(super) async fn sweep_music(
    session: &mut Session,
    progress: &Progress,
    portal: &Url,
) -> Result<Vec<MusicRecord>, MaiError> {
    let error_page = portal.join(ERROR_PATH)?;
    let mut records = Vec::new();

    for tier in Tier::ALL {
        let mut url = portal.join(MUSIC_SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("genre", ALL_GENRES)
            .append_pair("diff", tier.query_value());

        let body = fetch_record_page(session, &url, &error_page).await?;
        let sweep = parse_music_page(&Html::parse_document(&body));

        #[cfg(feature = "tracing")]
        tracing::info!(
            tier = ?tier,
            parsed = sweep.records.len(),
            dropped = sweep.dropped,
            "catalog tier fetched"
        );

        records.extend(sweep.records);
        progress.emit(tier.progress_state());
    }

    progress.emit(ProgressState::MusicCompleted);
    Ok(records)
}

/// `value` attribute of the first `<input name="...">`.
pub(super) fn input_value(body: &str, name: &str) -> Option<String> {
    let sel = Selector::parse(&format!(r#"input[name="{name}"]"#)).ok()?;
    Html::parse_document(body)
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::to_string)
}

/// Trimmed text of the first element matching `css`, if non-empty.
pub(super) fn element_text(body: &str, css: &str) -> Option<String> {
    let sel = Selector::parse(css).ok()?;
    Html::parse_document(body)
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
