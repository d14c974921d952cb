//! PostgreSQL implementation of ScoreRecordReader.
//!
//! Reads `response_scores` (written by the scoring pipeline) and
//! `practice_sessions`.

use crate::domain::blind_spots::{ScoreRecord, ScoreSheet};
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp, UserId};
use crate::ports::ScoreRecordReader;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the ScoreRecordReader port.
pub struct PostgresScoreRecordReader {
    pool: PgPool,
}

impl PostgresScoreRecordReader {
    /// Creates a new PostgresScoreRecordReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for score record queries.
#[derive(Debug, sqlx::FromRow)]
struct ScoreRecordRow {
    user_id: String,
    session_id: Uuid,
    drill_phase: Option<String>,
    is_iteration: bool,
    scores: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<ScoreRecordRow> for ScoreRecord {
    type Error = DomainError;

    fn try_from(row: ScoreRecordRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?;

        // A non-object payload is a malformed record; it stays in the set
        // with an empty sheet so it counts as a response but never as a criterion.
        let scores = ScoreSheet::parse(row.scores).unwrap_or_else(|| {
            tracing::debug!(
                session_id = %row.session_id,
                "Score payload is not an object, treating record as unscored"
            );
            ScoreSheet::default()
        });

        let mut record = ScoreRecord::new(
            user_id,
            SessionId::from_uuid(row.session_id),
            Timestamp::from_datetime(row.created_at),
        )
        .with_iteration(row.is_iteration)
        .with_scores(scores);
        if let Some(phase) = row.drill_phase {
            record = record.with_phase(phase);
        }
        Ok(record)
    }
}

fn to_records(rows: Vec<ScoreRecordRow>) -> Result<Vec<ScoreRecord>, DomainError> {
    rows.into_iter().map(ScoreRecord::try_from).collect()
}

fn to_count(count: i64) -> u32 {
    u32::try_from(count.max(0)).unwrap_or(u32::MAX)
}

#[async_trait]
impl ScoreRecordReader for PostgresScoreRecordReader {
    async fn find_since(&self, user_id: &UserId, cutoff: Timestamp) -> Result<Vec<ScoreRecord>, DomainError> {
        let rows: Vec<ScoreRecordRow> = sqlx::query_as(
            r#"
            SELECT user_id, session_id, drill_phase, is_iteration, scores, created_at
            FROM response_scores
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(*cutoff.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch score records: {}", e)))?;

        to_records(rows)
    }

    async fn find_between(
        &self,
        user_id: &UserId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        let rows: Vec<ScoreRecordRow> = sqlx::query_as(
            r#"
            SELECT user_id, session_id, drill_phase, is_iteration, scores, created_at
            FROM response_scores
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(*start.as_datetime())
        .bind(*end.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch score records: {}", e)))?;

        to_records(rows)
    }

    async fn count_completed_sessions(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM practice_sessions
            WHERE user_id = $1 AND status = 'completed'
            "#,
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count sessions: {}", e)))?;

        Ok(to_count(count))
    }

    async fn count_responses(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM response_scores
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count responses: {}", e)))?;

        Ok(to_count(count))
    }
}
