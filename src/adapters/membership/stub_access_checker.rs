//! Stub implementation of AccessChecker for development and testing.
//!
//! Reports the same tier for every user. Replace with `PostgresAccessChecker`
//! for production.
//!
//! # Usage
//!
//! ```ignore
//! use practice_coach::adapters::membership::StubAccessChecker;
//!
//! let checker = StubAccessChecker::new();
//! // Or with a specific tier:
//! let checker = StubAccessChecker::with_tier(MembershipTier::Free);
//! ```

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::MembershipTier;
use crate::ports::{full_insights_access, AccessChecker, AccessDeniedReason, AccessResult};
use async_trait::async_trait;

/// Stub AccessChecker with a fixed tier.
///
/// For development and testing purposes only.
#[derive(Debug, Clone)]
pub struct StubAccessChecker {
    /// The tier to simulate for all users.
    tier: MembershipTier,
    /// Whether to simulate users without a membership.
    deny_access: bool,
    /// Whether to simulate a failing membership store.
    fail: bool,
}

impl Default for StubAccessChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl StubAccessChecker {
    /// Create a new stub that grants Annual tier access.
    pub fn new() -> Self {
        Self::with_tier(MembershipTier::Annual)
    }

    /// Create a stub with a specific tier.
    pub fn with_tier(tier: MembershipTier) -> Self {
        Self {
            tier,
            deny_access: false,
            fail: false,
        }
    }

    /// Create a stub that reports no membership for anyone.
    pub fn denying() -> Self {
        Self {
            tier: MembershipTier::Free,
            deny_access: true,
            fail: false,
        }
    }

    /// Create a stub whose every lookup errors (for fail-secure flows).
    pub fn failing() -> Self {
        Self {
            tier: MembershipTier::Annual,
            deny_access: false,
            fail: true,
        }
    }

    /// Set the tier for this stub.
    pub fn set_tier(&mut self, tier: MembershipTier) {
        self.tier = tier;
    }

    /// Set whether to deny access.
    pub fn set_deny_access(&mut self, deny: bool) {
        self.deny_access = deny;
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::database("membership store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccessChecker for StubAccessChecker {
    async fn get_tier(&self, _user_id: &UserId) -> Result<Option<MembershipTier>, DomainError> {
        self.check_available()?;
        if self.deny_access {
            return Ok(None);
        }
        Ok(Some(self.tier))
    }

    async fn can_access_full_insights(&self, user_id: &UserId) -> Result<AccessResult, DomainError> {
        if self.deny_access {
            self.check_available()?;
            return Ok(AccessResult::Denied(AccessDeniedReason::NoMembership));
        }
        Ok(full_insights_access(self.get_tier(user_id).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    #[test]
    fn default_uses_annual_tier() {
        let checker = StubAccessChecker::new();
        assert_eq!(checker.tier, MembershipTier::Annual);
    }

    #[test]
    fn denying_creates_deny_mode() {
        let checker = StubAccessChecker::denying();
        assert!(checker.deny_access);
    }

    #[tokio::test]
    async fn annual_gets_full_insights() {
        let checker = StubAccessChecker::new();
        let result = checker.can_access_full_insights(&test_user_id()).await.unwrap();
        assert!(result.is_allowed());
    }

    #[tokio::test]
    async fn free_is_denied_full_insights() {
        let checker = StubAccessChecker::with_tier(MembershipTier::Free);
        let result = checker.can_access_full_insights(&test_user_id()).await.unwrap();
        assert!(matches!(
            result,
            AccessResult::Denied(AccessDeniedReason::FeatureNotIncluded { .. })
        ));
    }

    #[tokio::test]
    async fn denying_reports_no_membership() {
        let checker = StubAccessChecker::denying();
        assert_eq!(checker.get_tier(&test_user_id()).await.unwrap(), None);
        assert_eq!(
            checker.can_access_full_insights(&test_user_id()).await.unwrap(),
            AccessResult::Denied(AccessDeniedReason::NoMembership)
        );
    }

    #[tokio::test]
    async fn failing_returns_database_error() {
        let checker = StubAccessChecker::failing();
        let err = checker.can_access_full_insights(&test_user_id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn set_tier_changes_access() {
        let mut checker = StubAccessChecker::new();
        checker.set_tier(MembershipTier::Free);
        assert_eq!(
            checker.get_tier(&test_user_id()).await.unwrap(),
            Some(MembershipTier::Free)
        );
        checker.set_deny_access(true);
        assert_eq!(checker.get_tier(&test_user_id()).await.unwrap(), None);
    }
}
