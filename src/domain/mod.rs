//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `membership` - Subscription tiers and what they unlock
//! - `blind_spots` - Failure rates, trends and gated insights per skill

pub mod blind_spots;
pub mod foundation;
pub mod membership;
