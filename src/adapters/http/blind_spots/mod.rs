//! HTTP adapter for blind spot insights.
//!
//! - `GET /api/insights/blind-spots` - Gated analysis for the current user
//! - `GET /api/insights/blind-spots/status` - Data and access summary
//! - `GET /api/insights/blind-spots/teaser` - Counts-only preview
//! - `GET /api/insights/blind-spots/history?weeks=N` - Weekly failure rates

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, HistoryQuery};
pub use handlers::{AuthenticatedUser, BlindSpotsAppState, InsightsApiError};
pub use routes::{blind_spot_routes, blind_spots_router};
