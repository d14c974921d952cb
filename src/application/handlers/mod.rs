//! Application handlers.
//!
//! Query handlers that orchestrate domain operations over ports.

pub mod blind_spots;

pub use blind_spots::{BlindSpotService, DEFAULT_HISTORY_WEEKS, MAX_HISTORY_WEEKS};
