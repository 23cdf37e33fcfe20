//! Opening hours model and normalization
//!
//! Older menu records store hours as `{"days": [...], "hours": "HH:MM-HH:MM"}`
//! (one range applied uniformly to the listed days). Current records store a
//! per-day map. Everything normalizes to the per-day shape for internal use.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Day of week, ordered Monday first
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }

    /// Parse a day tag, case-insensitive (legacy records were not strict)
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "MONDAY" => Some(Self::Monday),
            "TUESDAY" => Some(Self::Tuesday),
            "WEDNESDAY" => Some(Self::Wednesday),
            "THURSDAY" => Some(Self::Thursday),
            "FRIDAY" => Some(Self::Friday),
            "SATURDAY" => Some(Self::Saturday),
            "SUNDAY" => Some(Self::Sunday),
            _ => None,
        }
    }
}

/// Validate a `"HH:MM-HH:MM"` opening range
pub fn is_valid_time_range(range: &str) -> bool {
    fn valid_hhmm(s: &str) -> bool {
        if s.len() != 5 || !s.is_ascii() || s.as_bytes()[2] != b':' {
            return false;
        }
        let (h, m) = (&s[0..2], &s[3..5]);
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return false;
        }
        matches!((h.parse::<u8>(), m.parse::<u8>()), (Ok(h), Ok(m)) if h < 24 && m < 60)
    }
    match range.split_once('-') {
        Some((open, close)) => valid_hhmm(open) && valid_hhmm(close),
        None => false,
    }
}

/// Per-day opening hours, always carrying all seven days.
///
/// `Some("HH:MM-HH:MM")` is an open range, `None` is closed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WeekHours(pub BTreeMap<WeekDay, Option<String>>);

impl Default for WeekHours {
    fn default() -> Self {
        Self::closed()
    }
}

impl WeekHours {
    /// All seven days closed
    pub fn closed() -> Self {
        Self(WeekDay::ALL.iter().map(|d| (*d, None)).collect())
    }

    pub fn get(&self, day: WeekDay) -> Option<&str> {
        self.0.get(&day).and_then(|r| r.as_deref())
    }

    pub fn set(&mut self, day: WeekDay, range: Option<String>) {
        self.0.insert(day, range);
    }

    /// Normalize a raw persisted `hours` value into the per-day shape.
    ///
    /// Accepts the legacy `{days, hours}` shape and the current per-day map;
    /// anything else (including null) yields all-closed. Invalid ranges are
    /// dropped to closed.
    pub fn normalize(raw: &Value) -> Self {
        let mut hours = Self::closed();

        let Value::Object(map) = raw else {
            return hours;
        };

        // Legacy shape: one range applied to every listed day
        if let (Some(Value::Array(days)), Some(Value::String(range))) =
            (map.get("days"), map.get("hours"))
        {
            if !is_valid_time_range(range) {
                tracing::warn!(range = %range, "dropping invalid legacy hours range");
                return hours;
            }
            for tag in days {
                if let Some(day) = tag.as_str().and_then(WeekDay::parse) {
                    hours.set(day, Some(range.clone()));
                }
            }
            return hours;
        }

        // Current shape: per-day map, null/missing = closed
        for day in WeekDay::ALL {
            match map.get(day.as_str()) {
                Some(Value::String(range)) if is_valid_time_range(range) => {
                    hours.set(day, Some(range.clone()));
                }
                Some(Value::String(range)) => {
                    tracing::warn!(day = day.as_str(), range = %range, "dropping invalid hours range");
                }
                _ => {}
            }
        }
        hours
    }
}
