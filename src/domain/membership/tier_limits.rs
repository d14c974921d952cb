//! Tier-based feature limits configuration.
//!
//! Defines which insight features are available for each membership tier.

use super::MembershipTier;
use serde::{Deserialize, Serialize};

/// Feature limits for a membership tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub tier: MembershipTier,
    /// Whether the full blind spot report (criteria, tips, context) is visible.
    pub full_insights: bool,
}

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// | Tier | Full insights |
    /// |------|---------------|
    /// | Free | No (teaser) |
    /// | Monthly | Yes |
    /// | Annual | Yes |
    pub fn for_tier(tier: MembershipTier) -> Self {
        Self {
            tier,
            full_insights: tier.has_pro_access(),
        }
    }
}
