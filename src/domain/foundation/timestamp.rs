//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn minus_days(&self, days: i64) -> Self {
        self.plus_days(days.saturating_neg())
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn plus_days(&self, days: i64) -> Self {
        match Duration::try_days(days).and_then(|d| self.0.checked_add_signed(d)) {
            Some(dt) => Self(dt),
            None if days < 0 => Self(DateTime::<Utc>::MIN_UTC),
            None => Self(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Returns midnight UTC on the Monday of the ISO week containing this timestamp.
    pub fn start_of_week(&self) -> Self {
        let date = self.0.date_naive();
        let days_since_monday = date.weekday().num_days_from_monday() as i64;
        let monday = date - Duration::days(days_since_monday);
        Self::start_of_day(monday)
    }

    /// ISO-8601 week label such as `2026-W42`.
    pub fn iso_week_label(&self) -> String {
        let week = self.0.iso_week();
        format!("{}-W{:02}", week.year(), week.week())
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Out-of-range inputs clamp to the Unix epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    fn start_of_day(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
