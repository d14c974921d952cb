//! In-memory score record store.
//!
//! Implements the `ScoreRecordReader` port over a lock-guarded vector.
//! Useful for:
//! - Unit and integration tests with hand-written fixtures
//! - Running the server locally without PostgreSQL
//!
//! Data does not survive a restart.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use crate::domain::blind_spots::ScoreRecord;
use crate::domain::foundation::{DomainError, SessionId, Timestamp, UserId};
use crate::ports::ScoreRecordReader;

/// Append-only in-memory store of score records.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryScoreStore::new();
/// store.append(record);
/// store.complete_session(&user_id, session_id);
///
/// let service = BlindSpotService::new(Arc::new(store), access_checker, config);
/// ```
#[derive(Default)]
pub struct InMemoryScoreStore {
    records: RwLock<Vec<ScoreRecord>>,
    completed: RwLock<HashMap<UserId, HashSet<SessionId>>>,
}

impl InMemoryScoreStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Records are never modified afterwards.
    pub fn append(&self, record: ScoreRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Appends every record in order.
    pub fn extend<I>(&self, records: I)
    where
        I: IntoIterator<Item = ScoreRecord>,
    {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(records);
    }

    /// Marks a practice session as completed. Completing twice has no effect.
    pub fn complete_session(&self, user_id: &UserId, session_id: SessionId) {
        self.completed
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.clone())
            .or_default()
            .insert(session_id);
    }

    /// Returns the total number of records across all users.
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if no records exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The user's records matching `keep`, oldest first.
    fn select<F>(&self, user_id: &UserId, keep: F) -> Vec<ScoreRecord>
    where
        F: Fn(&Timestamp) -> bool,
    {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut selected: Vec<ScoreRecord> = records
            .iter()
            .filter(|r| &r.user_id == user_id && keep(&r.created_at))
            .cloned()
            .collect();
        selected.sort_by_key(|r| r.created_at);
        selected
    }
}

#[async_trait]
impl ScoreRecordReader for InMemoryScoreStore {
    async fn find_since(&self, user_id: &UserId, cutoff: Timestamp) -> Result<Vec<ScoreRecord>, DomainError> {
        Ok(self.select(user_id, |at| *at >= cutoff))
    }

    async fn find_between(
        &self,
        user_id: &UserId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        Ok(self.select(user_id, |at| *at >= start && *at < end))
    }

    async fn count_completed_sessions(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let completed = self.completed.read().unwrap_or_else(PoisonError::into_inner);
        let count = completed.get(user_id).map_or(0, HashSet::len);
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn count_responses(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let count = records.iter().filter(|r| &r.user_id == user_id).count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}
