//! Access control port for membership-gated insights.
//!
//! The blind spot service asks this port whether a user may see the full
//! per-skill analysis. Users without a membership get the free view only.
//!
//! # Example
//!
//! ```ignore
//! use practice_coach::ports::{AccessChecker, AccessResult};
//!
//! async fn has_pro(checker: &dyn AccessChecker, user_id: &UserId) -> bool {
//!     matches!(
//!         checker.can_access_full_insights(user_id).await,
//!         Ok(AccessResult::Allowed)
//!     )
//! }
//! ```

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::{MembershipTier, TierLimits};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Feature name reported when full insights are denied.
pub const FULL_INSIGHTS_FEATURE: &str = "Full blind spot insights";

/// Port for checking user access based on membership.
#[async_trait]
pub trait AccessChecker: Send + Sync {
    /// Tier of the user's active membership, `None` without one.
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<MembershipTier>, DomainError>;

    /// Check if user can see per-skill blind spot detail.
    ///
    /// Only paid tiers (Monthly, Annual) with access-granting status qualify.
    async fn can_access_full_insights(&self, user_id: &UserId) -> Result<AccessResult, DomainError>;
}

/// Maps an active tier (or its absence) to a full-insights decision.
pub fn full_insights_access(tier: Option<MembershipTier>) -> AccessResult {
    match tier {
        None => AccessResult::Denied(AccessDeniedReason::NoMembership),
        Some(tier) if TierLimits::for_tier(tier).full_insights => AccessResult::Allowed,
        Some(_) => AccessResult::Denied(AccessDeniedReason::FeatureNotIncluded {
            feature: FULL_INSIGHTS_FEATURE.to_string(),
            required_tier: MembershipTier::Monthly,
        }),
    }
}

/// Result of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessResult {
    /// Access is granted.
    Allowed,
    /// Access is denied with a specific reason.
    Denied(AccessDeniedReason),
}

impl AccessResult {
    /// Returns true if access is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessResult::Allowed)
    }

    /// User-facing explanation of a denial, `None` when allowed.
    pub fn denial_message(&self) -> Option<String> {
        match self {
            AccessResult::Allowed => None,
            AccessResult::Denied(reason) => Some(reason.to_string()),
        }
    }
}

/// Reason why access was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessDeniedReason {
    /// User has no membership record.
    NoMembership,

    /// User's membership has expired.
    MembershipExpired,

    /// Feature requires a higher tier.
    FeatureNotIncluded {
        /// Name of the feature requested.
        feature: String,
        /// Tier required for this feature.
        required_tier: MembershipTier,
    },
}

impl AccessDeniedReason {
    /// Get a user-facing message for the denial reason.
    pub fn user_message(&self) -> String {
        match self {
            AccessDeniedReason::NoMembership => {
                "A Pro membership unlocks your full blind spot breakdown.".to_string()
            }
            AccessDeniedReason::MembershipExpired => {
                "Your membership has expired. Renew to see your full insights.".to_string()
            }
            AccessDeniedReason::FeatureNotIncluded {
                feature,
                required_tier,
            } => format!(
                "{} requires a {} membership or higher.",
                feature,
                required_tier.display_name()
            ),
        }
    }
}

impl std::fmt::Display for AccessDeniedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}
