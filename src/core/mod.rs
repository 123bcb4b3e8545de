//! Core components of the `maimainet-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The shared [`MaiClient`] and its builder.
//! - The primary [`MaiError`] type.
//! - The browser-emulating [`Session`] with its per-host cookie jar.
//! - The maintenance page detector.

/// The shared client (`MaiClient`), builder, and configuration.
pub mod client;
/// The primary error type (`MaiError`) for the crate.
pub mod error;
/// Upstream maintenance page detection.
pub mod maintenance;
/// Per-operation HTTP session and cookie jar.
pub mod session;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::MaiClient`
pub use client::{MaiClient, MaiClientBuilder};
pub use error::MaiError;
pub use session::Session;
