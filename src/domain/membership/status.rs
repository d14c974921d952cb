//! Membership status.
//!
//! Only the access-relevant part of the subscription lifecycle lives here;
//! billing transitions are owned by the payment service.

use serde::{Deserialize, Serialize};

/// Membership subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Awaiting first payment. No paid access.
    Pending,

    /// Fully paid subscription.
    Active,

    /// Payment failed but within grace period.
    PastDue,

    /// User requested cancellation. Access continues until period end.
    Cancelled,

    /// Subscription ended.
    Expired,
}

impl MembershipStatus {
    /// Returns true if this status can grant access at all.
    ///
    /// `Cancelled` additionally requires the period end to lie in the future,
    /// which callers check against the stored period.
    pub fn has_access(&self) -> bool {
        matches!(
            self,
            MembershipStatus::Active | MembershipStatus::PastDue | MembershipStatus::Cancelled
        )
    }

    /// Parses the snake_case storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(MembershipStatus::Pending),
            "active" => Some(MembershipStatus::Active),
            "past_due" => Some(MembershipStatus::PastDue),
            "cancelled" => Some(MembershipStatus::Cancelled),
            "expired" => Some(MembershipStatus::Expired),
            _ => None,
        }
    }
}
