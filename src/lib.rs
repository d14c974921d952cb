//! Practice Coach - Blind spot analysis for communication practice.
//!
//! Turns per-response rubric scores from practice sessions into longitudinal
//! coaching insights: failure rates per skill, trend direction over time
//! windows, headline picks (biggest gap, biggest win, growth edge) and a
//! weekly history, gated by data sufficiency and membership tier.
//!
//! Layout follows a ports-and-adapters split:
//!
//! - [`domain`] - pure analysis, no I/O
//! - [`ports`] - traits the application needs from the outside world
//! - [`adapters`] - PostgreSQL, in-memory and HTTP implementations
//! - [`application`] - `BlindSpotService`, the query entry point
//! - [`config`] - environment settings and the YAML skill catalog

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
