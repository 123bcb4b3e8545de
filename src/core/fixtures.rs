//! Recording helpers for persisting fetched pages as HTML fixtures.
//! Compiled only when the `test-mode` feature is enabled.
//!
//! Recorded pages contain the account's play history; keep them out of version control unless
//! they have been scrubbed.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use url::Url;

pub(crate) fn get_fixture_dir() -> PathBuf {
    env::var("MAINET_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// `/maimai-mobile/record/musicGenre/search/?genre=99&diff=3` → `record_musicGenre_search_diff3`.
pub(crate) fn fixture_name(url: &Url) -> String {
    let mut name = url
        .path_segments()
        .map(|segs| {
            segs.filter(|s| !s.is_empty() && *s != "maimai-mobile")
                .collect::<Vec<_>>()
                .join("_")
        })
        .unwrap_or_default();
    if let Some((_, diff)) = url.query_pairs().find(|(k, _)| k == "diff") {
        name.push_str("_diff");
        name.push_str(&diff);
    }
    if name.is_empty() {
        name.push_str("index");
    }
    name
}

pub(crate) fn record_fixture(page: &str, body: &str) -> Result<(), std::io::Error> {
    let dir = get_fixture_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let path = dir.join(format!("{page}.html"));

    let mut file = fs::File::create(&path)?;
    file.write_all(body.as_bytes())?;

    if env::var("MAINET_DEBUG").ok().as_deref() == Some("1") {
        eprintln!("MAINET_RECORD: wrote fixture to {}", path.display());
    }
    Ok(())
}
