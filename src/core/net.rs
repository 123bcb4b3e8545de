#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `MAINET_RECORD=1`, the body is saved as a fixture via `fixtures`.
pub(crate) async fn get_text(resp: reqwest::Response) -> Result<String, reqwest::Error> {
    #[cfg(feature = "test-mode")]
    let page = crate::core::fixtures::fixture_name(resp.url());

    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("MAINET_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = crate::core::fixtures::record_fixture(&page, &text)
        {
            eprintln!("MAINET_RECORD: failed to write fixture {page}: {e}");
        }
    }

    Ok(text)
}
