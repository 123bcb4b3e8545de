//! Detection of the upstream maintenance page.
//!
//! MaimaiNET answers every page with a static notice while it is down for scheduled
//! maintenance. The body has to be checked before any parsing so that the outage is reported
//! as [`MaiError::Maintenance`] instead of a missing element or a rejected login.

use crate::core::MaiError;

/// Marker substrings emitted on the maintenance page, one per display language.
pub const MAINTENANCE_MARKERS: &[&str] = &[
    "メンテナンス中です",
    "Sorry, servers are under maintenance.",
];

/// Returns `true` if `body` is the maintenance page.
#[must_use]
pub fn is_maintenance(body: &str) -> bool {
    MAINTENANCE_MARKERS.iter().any(|m| body.contains(m))
}

/// Fails with [`MaiError::Maintenance`] if `body` is the maintenance page.
///
/// # Errors
///
/// Returns [`MaiError::Maintenance`] when either marker is present.
pub fn check(body: &str) -> Result<(), MaiError> {
    if is_maintenance(body) {
        #[cfg(feature = "tracing")]
        tracing::warn!("upstream maintenance page detected");
        return Err(MaiError::Maintenance);
    }
    Ok(())
}
