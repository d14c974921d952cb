//! Membership domain module.
//!
//! Subscription tiers and the access they grant to coaching insights.
//!
//! # Module Structure
//!
//! - `status` - MembershipStatus and whether it grants access
//! - `tier` - MembershipTier subscription levels
//! - `tier_limits` - Feature limits per tier

mod status;
mod tier;
mod tier_limits;

pub use status::MembershipStatus;
pub use tier::MembershipTier;
pub use tier_limits::TierLimits;
