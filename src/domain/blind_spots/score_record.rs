//! Scored responses as produced by the evaluation pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::ScoreValue;
use crate::domain::foundation::{SessionId, Timestamp, UserId};

/// One evaluated user response. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub user_id: UserId,
    pub session_id: SessionId,
    /// Drill step that produced the response.
    pub drill_phase: Option<String>,
    /// True for a required second attempt at the same drill.
    #[serde(default)]
    pub is_iteration: bool,
    #[serde(default)]
    pub scores: ScoreSheet,
    pub created_at: Timestamp,
}

impl ScoreRecord {
    /// Creates a record with no phase and an empty score sheet.
    pub fn new(user_id: UserId, session_id: SessionId, created_at: Timestamp) -> Self {
        Self {
            user_id,
            session_id,
            drill_phase: None,
            is_iteration: false,
            scores: ScoreSheet::default(),
            created_at,
        }
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.drill_phase = Some(phase.into());
        self
    }

    pub fn with_iteration(mut self, is_iteration: bool) -> Self {
        self.is_iteration = is_iteration;
        self
    }

    pub fn with_score(mut self, criterion: impl Into<String>, value: impl Into<ScoreValue>) -> Self {
        self.scores.insert(criterion, value);
        self
    }

    pub fn with_scores(mut self, scores: ScoreSheet) -> Self {
        self.scores = scores;
        self
    }

    /// Drill phase, ignoring blank values.
    pub fn phase(&self) -> Option<&str> {
        self.drill_phase
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Criterion results of a single response.
///
/// A payload that is not a JSON object is malformed and reads as an empty
/// sheet, so the record contributes no criteria to any skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoreSheet(HashMap<String, ScoreValue>);

impl ScoreSheet {
    /// Parses a JSON payload, returning `None` when it is not an object.
    pub fn parse(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(map) => Some(Self(
                map.into_iter()
                    .map(|(key, raw)| (key, ScoreValue::from_json(raw)))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Parses a JSON payload, treating malformed payloads as empty.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn insert(&mut self, criterion: impl Into<String>, value: impl Into<ScoreValue>) {
        self.0.insert(criterion.into(), value.into());
    }

    pub fn get(&self, criterion: &str) -> Option<&ScoreValue> {
        self.0.get(criterion)
    }

    pub fn contains(&self, criterion: &str) -> bool {
        self.0.contains_key(criterion)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ScoreSheet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(raw))
    }
}

impl<K: Into<String>, V: Into<ScoreValue>> FromIterator<(K, V)> for ScoreSheet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn parse_object_payload() {
        let sheet = ScoreSheet::parse(json!({"clear_ask": true, "hedging": "0", "filler_count": 3}))
            .expect("object payload");
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.get("clear_ask"), Some(&ScoreValue::Bool(true)));
        assert_eq!(sheet.get("hedging"), Some(&ScoreValue::Text("0".to_string())));
        assert_eq!(sheet.get("filler_count"), Some(&ScoreValue::Int(3)));
    }

    #[test]
    fn non_object_payloads_are_malformed() {
        for raw in [json!("clear_ask"), json!([true, false]), json!(null), json!(7)] {
            assert!(ScoreSheet::parse(raw.clone()).is_none());
            assert!(ScoreSheet::from_json(raw).is_empty());
        }
    }

    #[test]
    fn record_deserializes_with_malformed_scores() {
        let raw = json!({
            "userId": "user-1",
            "sessionId": "550e8400-e29b-41d4-a716-446655440000",
            "drillPhase": "opening",
            "scores": "not a map",
            "createdAt": "2026-10-01T09:00:00Z"
        });
        let record: ScoreRecord = serde_json::from_value(raw).unwrap();
        assert!(record.scores.is_empty());
        assert!(!record.is_iteration);
        assert_eq!(record.phase(), Some("opening"));
    }

    #[test]
    fn builder_sets_fields() {
        let record = ScoreRecord::new(user(), SessionId::new(), Timestamp::now())
            .with_phase("pushback")
            .with_iteration(true)
            .with_score("clear_ask", 1)
            .with_score("hedging", false);

        assert_eq!(record.phase(), Some("pushback"));
        assert!(record.is_iteration);
        assert!(record.scores.contains("clear_ask"));
        assert!(!record.scores.contains("missing"));
    }

    #[test]
    fn blank_phase_reads_as_absent() {
        let record = ScoreRecord::new(user(), SessionId::new(), Timestamp::now()).with_phase("  ");
        assert_eq!(record.phase(), None);
    }

    #[test]
    fn sheet_collects_from_pairs() {
        let sheet: ScoreSheet = vec![("a", ScoreValue::from(true)), ("b", ScoreValue::from(0))]
            .into_iter()
            .collect();
        assert_eq!(sheet.len(), 2);
    }
}
