//! Rubric score values and their truthiness.
//!
//! The scoring pipeline writes criterion results as booleans, integers or
//! numeric strings depending on which prompt produced them. All of them are
//! read through [`ScoreValue::is_truthy`] and nothing else.

use serde::{Deserialize, Serialize};

/// A single criterion value from a score sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Bool(bool),
    Int(i64),
    Text(String),
    /// Anything else the pipeline produced (null, floats, nested JSON).
    Other(serde_json::Value),
}

impl ScoreValue {
    /// Returns true only for `true`, `1` and `"1"`.
    ///
    /// `0`, `"0"`, `""`, `null`, `2`, `"yes"`, `1.0` and every other value are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ScoreValue::Bool(b) => *b,
            ScoreValue::Int(i) => *i == 1,
            ScoreValue::Text(s) => s == "1",
            ScoreValue::Other(_) => false,
        }
    }

    /// Converts a raw JSON value without failing.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => ScoreValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ScoreValue::Int(i),
                None => ScoreValue::Other(serde_json::Value::Number(n)),
            },
            serde_json::Value::String(s) => ScoreValue::Text(s),
            other => ScoreValue::Other(other),
        }
    }
}

/// Truthiness of an optional value; a missing value is falsy.
pub fn is_truthy(value: Option<&ScoreValue>) -> bool {
    value.is_some_and(ScoreValue::is_truthy)
}

impl From<bool> for ScoreValue {
    fn from(b: bool) -> Self {
        ScoreValue::Bool(b)
    }
}

impl From<i32> for ScoreValue {
    fn from(i: i32) -> Self {
        ScoreValue::Int(i64::from(i))
    }
}

impl From<i64> for ScoreValue {
    fn from(i: i64) -> Self {
        ScoreValue::Int(i)
    }
}

impl From<&str> for ScoreValue {
    fn from(s: &str) -> Self {
        ScoreValue::Text(s.to_string())
    }
}
