//! Parsing of user-entered due dates and reminder lead times.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use taskpad_core::DueDate;

/// Parse a due date. Accepts the stored formats (`2025-03-20T15:00`,
/// `2025-03-20`) and natural language ("tomorrow 3pm", "fri noon").
/// Inputs without a time of day are due at the start of that day.
pub fn parse_due(input: &str) -> Result<DueDate> {
    if let Some(due @ DueDate::At(_)) = DueDate::parse(input) {
        return Ok(due);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse due date: \"{}\"", input))?;

    if has_time_component(input) {
        Ok(DueDate::At(dt))
    } else {
        Ok(DueDate::At(dt.date().and_time(NaiveTime::MIN)))
    }
}

/// Parse a reminder lead time in minutes: "30", "45m", "1h", "0".
pub fn parse_lead_time(input: &str) -> Result<u32> {
    let input = input.trim();

    if let Ok(minutes) = input.parse::<u32>() {
        return Ok(minutes);
    }

    let duration = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse reminder lead time: \"{}\"", input))?;

    if duration.as_secs() % 60 != 0 {
        anyhow::bail!("Reminder lead time must be whole minutes: \"{}\"", input);
    }

    u32::try_from(duration.as_secs() / 60).context("Reminder lead time too large")
}

const CALENDAR_WORDS: [&str; 19] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "january",
    "february",
    "march",
    "april",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
    "may",
];

/// fuzzydate only knows full weekday and month names, so "fri" and
/// "sept" are widened to the name they start.
fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            if word.len() < 3 {
                return word.to_string();
            }
            CALENDAR_WORDS
                .iter()
                .find(|full| full.starts_with(word))
                .map_or_else(|| word.to_string(), |full| full.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the user gave a time of day rather than just a day:
/// "noon", "midnight", "6pm", "6 pm", "15:00", "at 9".
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    words.iter().enumerate().any(|(i, word)| {
        let previous = i.checked_sub(1).map(|p| words[p]);
        let starts_with_digit = word.starts_with(|c: char| c.is_ascii_digit());

        match *word {
            "noon" | "midnight" => true,
            "am" | "pm" => previous.is_some_and(|p| p.ends_with(|c: char| c.is_ascii_digit())),
            _ if previous == Some("at") && starts_with_digit => true,
            _ if starts_with_digit && (word.ends_with("am") || word.ends_with("pm")) => true,
            _ => word.split_once(':').is_some_and(|(h, m)| {
                h.ends_with(|c: char| c.is_ascii_digit())
                    && m.starts_with(|c: char| c.is_ascii_digit())
            }),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    // --- has_time_component ---

    #[test]
    fn time_component_am_pm() {
        assert!(has_time_component("tomorrow 6pm"));
        assert!(has_time_component("friday 11am"));
        assert!(has_time_component("sat 3 pm"));
        assert!(has_time_component("9AM"));
    }

    #[test]
    fn time_component_colon_and_keywords() {
        assert!(has_time_component("tomorrow 15:00"));
        assert!(has_time_component("tomorrow noon"));
        assert!(has_time_component("at 9"));
        assert!(has_time_component("friday at 15"));
    }

    #[test]
    fn no_time_component() {
        assert!(!has_time_component("tomorrow"));
        assert!(!has_time_component("march 20"));
        assert!(!has_time_component("december"));
        assert!(!has_time_component("camp"));
    }

    // --- expand_abbreviations ---

    #[test]
    fn expands_days_and_months() {
        assert_eq!(expand_abbreviations("sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("Sept 5"), "september 5");
        assert_eq!(expand_abbreviations("tomorrow 6pm"), "tomorrow 6pm");
        assert_eq!(expand_abbreviations("thurs noon"), "thursday noon");
        assert_eq!(expand_abbreviations("next tues"), "next tuesday");
    }

    #[test]
    fn leaves_other_words_alone() {
        assert_eq!(expand_abbreviations("in 2 weeks"), "in 2 weeks");
        assert_eq!(expand_abbreviations("May 3"), "may 3");
        assert_eq!(expand_abbreviations("monthly"), "monthly");
    }

    // --- parse_due ---

    #[test]
    fn stored_format_is_taken_verbatim() {
        let due = parse_due("2025-03-20T15:00").unwrap();
        assert_eq!(
            due.datetime(),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap().and_hms_opt(15, 0, 0)
        );
    }

    #[test]
    fn natural_language_with_time() {
        let due = parse_due("tomorrow 3pm").unwrap();
        assert_eq!(due.datetime().unwrap().hour(), 15);
    }

    #[test]
    fn date_only_is_start_of_day() {
        let due = parse_due("march 20").unwrap();
        let dt = due.datetime().unwrap();
        assert_eq!((dt.month(), dt.day()), (3, 20));
        assert_eq!(dt.time(), NaiveTime::MIN);
    }

    #[test]
    fn rejects_gibberish() {
        assert!(parse_due("not a date at all xyz").is_err());
    }

    // --- parse_lead_time ---

    #[test]
    fn lead_time_forms() {
        assert_eq!(parse_lead_time("30").unwrap(), 30);
        assert_eq!(parse_lead_time("0").unwrap(), 0);
        assert_eq!(parse_lead_time("45m").unwrap(), 45);
        assert_eq!(parse_lead_time("1h").unwrap(), 60);
        assert_eq!(parse_lead_time("1h 30m").unwrap(), 90);
    }

    #[test]
    fn lead_time_must_be_whole_minutes() {
        assert!(parse_lead_time("90s").is_err());
        assert!(parse_lead_time("soon").is_err());
    }
}
