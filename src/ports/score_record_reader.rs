//! Read-only port over stored response scores.

use async_trait::async_trait;

use crate::domain::blind_spots::ScoreRecord;
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Query side of the score record store.
///
/// Records are append-only, so every query sees a consistent snapshot.
/// Implementations return records ordered by `created_at` ascending.
#[async_trait]
pub trait ScoreRecordReader: Send + Sync {
    /// Records with `created_at >= cutoff`.
    async fn find_since(&self, user_id: &UserId, cutoff: Timestamp) -> Result<Vec<ScoreRecord>, DomainError>;

    /// Records with `start <= created_at < end`.
    async fn find_between(
        &self,
        user_id: &UserId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ScoreRecord>, DomainError>;

    /// Practice sessions the user has completed.
    async fn count_completed_sessions(&self, user_id: &UserId) -> Result<u32, DomainError>;

    /// Every scored response the user has, regardless of age.
    async fn count_responses(&self, user_id: &UserId) -> Result<u32, DomainError>;
}
