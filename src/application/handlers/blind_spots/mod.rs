//! Blind spot query handlers.
//!
//! Read-only: analysis, gated views, teaser, status and weekly history.

mod service;

pub use service::{BlindSpotService, DEFAULT_HISTORY_WEEKS, MAX_HISTORY_WEEKS};
