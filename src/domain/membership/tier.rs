//! Membership tier definitions.
//!
//! Represents the subscription tier levels of the practice coach.

use serde::{Deserialize, Serialize};

/// Membership subscription tier.
///
/// Determines whether the full blind spot report is visible or only the teaser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    /// Free tier - drills and scored feedback, blind spot teaser only.
    Free,

    /// Monthly Pro subscription - full blind spot insights.
    Monthly,

    /// Annual Pro subscription - full blind spot insights.
    Annual,
}

impl MembershipTier {
    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, MembershipTier::Free)
    }

    /// Returns true if this tier carries Pro access.
    ///
    /// Every paid tier is a Pro tier.
    pub fn has_pro_access(&self) -> bool {
        self.is_paid()
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipTier::Free => "Free",
            MembershipTier::Monthly => "Pro Monthly",
            MembershipTier::Annual => "Pro Annual",
        }
    }

    /// Parses the lowercase storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(MembershipTier::Free),
            "monthly" => Some(MembershipTier::Monthly),
            "annual" => Some(MembershipTier::Annual),
            _ => None,
        }
    }
}

impl std::fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_has_no_pro_access() {
        assert!(!MembershipTier::Free.is_paid());
        assert!(!MembershipTier::Free.has_pro_access());
    }

    #[test]
    fn paid_tiers_have_pro_access() {
        assert!(MembershipTier::Monthly.has_pro_access());
        assert!(MembershipTier::Annual.has_pro_access());
    }

    #[test]
    fn parse_accepts_storage_values() {
        assert_eq!(MembershipTier::parse("free"), Some(MembershipTier::Free));
        assert_eq!(MembershipTier::parse("Monthly"), Some(MembershipTier::Monthly));
        assert_eq!(MembershipTier::parse(" annual "), Some(MembershipTier::Annual));
        assert_eq!(MembershipTier::parse("platinum"), None);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&MembershipTier::Monthly).unwrap();
        assert_eq!(json, "\"monthly\"");
    }

    #[test]
    fn tier_deserializes_from_lowercase() {
        let tier: MembershipTier = serde_json::from_str("\"annual\"").unwrap();
        assert_eq!(tier, MembershipTier::Annual);
    }
}
