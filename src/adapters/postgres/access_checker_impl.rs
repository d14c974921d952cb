//! PostgreSQL implementation of AccessChecker.
//!
//! Provides database-backed access control based on membership tier and status.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::membership::{MembershipStatus, MembershipTier};
use crate::ports::{full_insights_access, AccessChecker, AccessDeniedReason, AccessResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of the AccessChecker port.
///
/// Reads the `memberships` table (one row per user).
pub struct PostgresAccessChecker {
    pool: PgPool,
}

impl PostgresAccessChecker {
    /// Creates a new PostgresAccessChecker with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Result of membership access query.
#[derive(Debug)]
struct MembershipAccess {
    tier: MembershipTier,
    status: MembershipStatus,
    has_access: bool,
}

fn parse_tier(s: &str) -> Result<MembershipTier, DomainError> {
    MembershipTier::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid tier value: {}", s))
    })
}

fn parse_status(s: &str) -> Result<MembershipStatus, DomainError> {
    MembershipStatus::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid status value: {}", s))
    })
}

/// Cancelled memberships keep access until the paid period ends.
fn grants_access(status: MembershipStatus, period_end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    if !status.has_access() {
        false
    } else if status == MembershipStatus::Cancelled {
        period_end.is_some_and(|end| now <= end)
    } else {
        true
    }
}

impl PostgresAccessChecker {
    /// Get membership access info for a user.
    async fn get_membership_access(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MembershipAccess>, DomainError> {
        let row: Option<(String, String, Option<DateTime<Utc>>)> = sqlx::query_as(
            r#"
            SELECT tier, status, current_period_end
            FROM memberships
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to check membership: {}", e)))?;

        let Some((tier_str, status_str, period_end)) = row else {
            return Ok(None);
        };

        let tier = parse_tier(&tier_str)?;
        let status = parse_status(&status_str)?;

        Ok(Some(MembershipAccess {
            tier,
            status,
            has_access: grants_access(status, period_end, Utc::now()),
        }))
    }
}

#[async_trait]
impl AccessChecker for PostgresAccessChecker {
    async fn get_tier(&self, user_id: &UserId) -> Result<Option<MembershipTier>, DomainError> {
        let membership = self.get_membership_access(user_id).await?;
        Ok(membership.filter(|m| m.has_access).map(|m| m.tier))
    }

    async fn can_access_full_insights(&self, user_id: &UserId) -> Result<AccessResult, DomainError> {
        let Some(membership) = self.get_membership_access(user_id).await? else {
            return Ok(AccessResult::Denied(AccessDeniedReason::NoMembership));
        };

        if !membership.has_access {
            return Ok(match membership.status {
                MembershipStatus::Expired | MembershipStatus::Cancelled => {
                    AccessResult::Denied(AccessDeniedReason::MembershipExpired)
                }
                _ => AccessResult::Denied(AccessDeniedReason::NoMembership),
            });
        }

        Ok(full_insights_access(Some(membership.tier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn parse_tier_case_insensitive() {
        assert_eq!(parse_tier("FREE").unwrap(), MembershipTier::Free);
        assert_eq!(parse_tier("Monthly").unwrap(), MembershipTier::Monthly);
        assert_eq!(parse_tier("annual").unwrap(), MembershipTier::Annual);
    }

    #[test]
    fn parse_tier_rejects_invalid() {
        let err = parse_tier("premium").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(parse_tier("").is_err());
    }

    #[test]
    fn parse_status_all_values() {
        assert_eq!(parse_status("pending").unwrap(), MembershipStatus::Pending);
        assert_eq!(parse_status("past_due").unwrap(), MembershipStatus::PastDue);
        assert_eq!(parse_status("EXPIRED").unwrap(), MembershipStatus::Expired);
        assert!(parse_status("unknown").is_err());
    }

    #[test]
    fn active_membership_grants_access() {
        assert!(grants_access(MembershipStatus::Active, None, Utc::now()));
        assert!(grants_access(MembershipStatus::PastDue, None, Utc::now()));
    }

    #[test]
    fn cancelled_membership_keeps_access_until_period_end() {
        let now = Utc::now();
        assert!(grants_access(MembershipStatus::Cancelled, Some(now + Duration::days(3)), now));
        assert!(!grants_access(MembershipStatus::Cancelled, Some(now - Duration::days(1)), now));
        assert!(!grants_access(MembershipStatus::Cancelled, None, now));
    }

    #[test]
    fn pending_and_expired_grant_nothing() {
        assert!(!grants_access(MembershipStatus::Pending, None, Utc::now()));
        assert!(!grants_access(MembershipStatus::Expired, None, Utc::now()));
    }

    #[test]
    fn membership_access_derives_debug() {
        let access = MembershipAccess {
            tier: MembershipTier::Monthly,
            status: MembershipStatus::Active,
            has_access: true,
        };
        let debug_str = format!("{:?}", access);
        assert!(debug_str.contains("Monthly"));
        assert!(debug_str.contains("Active"));
    }
}
