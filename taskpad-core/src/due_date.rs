//! Due dates as entered by the user.
//!
//! Due dates are local ("floating") date-times with no timezone attached,
//! the same way a `datetime-local` form field or a `DTSTART` without `TZID`
//! behaves. Values that fail to parse are kept verbatim so that nothing the
//! user typed is lost on a round trip through storage.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    At(NaiveDateTime),
    /// Stored text that could not be read as a date-time.
    Malformed(String),
}

impl DueDate {
    /// Parse stored or user-entered text. Blank input means "no due date".
    pub fn parse(input: &str) -> Option<DueDate> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        Some(match parse_datetime(input) {
            Some(dt) => DueDate::At(dt),
            None => DueDate::Malformed(input.to_string()),
        })
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DueDate::At(dt) => Some(*dt),
            DueDate::Malformed(_) => None,
        }
    }

    /// Calendar day of the due date, ignoring time of day.
    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime().map(|dt| dt.date())
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, DueDate::Malformed(_))
    }
}

impl From<NaiveDateTime> for DueDate {
    fn from(dt: NaiveDateTime) -> Self {
        DueDate::At(dt)
    }
}

fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    // Timestamps with an offset are shown in the local timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DueDate::At(dt) if dt.second() == 0 => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
            DueDate::At(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            DueDate::Malformed(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DueDate::parse(&raw).unwrap_or(DueDate::Malformed(raw)))
    }
}

/// Deserialize an optional due date where `null` and `""` both mean none.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DueDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(DueDate::parse))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_datetime_local_input() {
        assert_eq!(
            DueDate::parse("2025-03-20T15:00"),
            Some(DueDate::At(dt(2025, 3, 20, 15, 0)))
        );
    }

    #[test]
    fn parses_seconds_and_space_separator() {
        assert_eq!(
            DueDate::parse("2025-03-20T15:00:30").and_then(|d| d.datetime()),
            Some(dt(2025, 3, 20, 15, 0) + chrono::Duration::seconds(30))
        );
        assert_eq!(
            DueDate::parse("2025-03-20 09:15"),
            Some(DueDate::At(dt(2025, 3, 20, 9, 15)))
        );
    }

    #[test]
    fn bare_date_is_start_of_day() {
        assert_eq!(
            DueDate::parse("2025-03-20"),
            Some(DueDate::At(dt(2025, 3, 20, 0, 0)))
        );
    }

    #[test]
    fn blank_is_no_due_date() {
        assert_eq!(DueDate::parse(""), None);
        assert_eq!(DueDate::parse("   "), None);
    }

    #[test]
    fn garbage_is_kept_as_malformed() {
        let due = DueDate::parse("next blursday").unwrap();
        assert!(due.is_malformed());
        assert_eq!(due.date(), None);
        assert_eq!(due.to_string(), "next blursday");
    }

    #[test]
    fn displays_in_input_format() {
        assert_eq!(DueDate::At(dt(2025, 3, 20, 15, 0)).to_string(), "2025-03-20T15:00");
    }

    #[test]
    fn deserialize_optional_treats_empty_string_as_none() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "deserialize_optional")]
            due: Option<DueDate>,
        }

        let empty: Wrapper = serde_json::from_str(r#"{"due": ""}"#).unwrap();
        assert_eq!(empty.due, None);

        let null: Wrapper = serde_json::from_str(r#"{"due": null}"#).unwrap();
        assert_eq!(null.due, None);

        let missing: Wrapper = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.due, None);

        let set: Wrapper = serde_json::from_str(r#"{"due": "2025-03-20T15:00"}"#).unwrap();
        assert_eq!(set.due, Some(DueDate::At(dt(2025, 3, 20, 15, 0))));
    }
}
