//! Journal entry model.
//!
//! The streak engine only ever looks at when an entry was recorded, so it
//! reads entries through the [`Timestamped`] trait. [`JournalEntry`] is the
//! concrete record kept by the entry store.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Anything that carries the moment it was recorded.
pub trait Timestamped {
    fn recorded_at(&self) -> DateTime<Utc>;
}

impl Timestamped for DateTime<Utc> {
    fn recorded_at(&self) -> DateTime<Utc> {
        *self
    }
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn recorded_at(&self) -> DateTime<Utc> {
        (**self).recorded_at()
    }
}

/// A recorded dream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub title: String,
    /// Transcribed narration. Opaque to the streak engine.
    #[serde(default)]
    pub transcript: String,
}

impl JournalEntry {
    /// Create an entry with a fresh v4 id.
    pub fn new(
        title: impl Into<String>,
        transcript: impl Into<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            recorded_at,
            title: title.into(),
            transcript: transcript.into(),
        }
    }
}

impl Timestamped for JournalEntry {
    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Parse a user-supplied timestamp.
///
/// Accepts RFC 3339 (`2026-10-17T07:30:00+02:00`) or a bare date
/// (`2026-10-17`, read as local noon so it lands on that calendar day in
/// the local zone). Anything else is rejected rather than silently dropped.
pub fn parse_recorded_at(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_recorded_at_in(value, &Local)
}

/// Like [`parse_recorded_at`], reading a bare date in `zone`.
///
/// Noon is never inside a DST gap, so the local time always exists.
pub fn parse_recorded_at_in<Tz: TimeZone>(
    value: &str,
    zone: &Tz,
) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .and_then(|naive| zone.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            value: value.to_string(),
        })
}
