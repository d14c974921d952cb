//! Application layer - Query handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{BlindSpotService, DEFAULT_HISTORY_WEEKS, MAX_HISTORY_WEEKS};
