//! Parsing of structured contest fields out of a generative-text reply.
//!
//! The completion API is asked to answer with a JSON object, but replies
//! routinely arrive wrapped in prose or markdown fences, truncated, or with
//! fields missing. The parser brace-matches the first top-level JSON object
//! out of the reply and then degrades field by field: every absent string
//! field becomes `""` (never absent from the result), and an absent or
//! unparseable deadline defaults to 30 days from `now`.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Applied when no deadline can be extracted from the text.
pub const DEFAULT_DEADLINE_DAYS: i64 = 30;

/// Contest fields recovered from scraped or pasted text.
///
/// Every string field is always present (possibly empty) so callers never
/// have to distinguish "missing" from "blank".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContest {
    pub title: String,
    pub organization: String,
    pub category: String,
    pub description: String,
    pub theme: String,
    pub submission_format: String,
    pub schedule_note: String,
    pub prize: String,
    pub precautions: String,
    pub result_announcement: String,
    pub url: String,
    pub deadline: Timestamp,
}

/// Parse a completion reply into a full contest field set.
///
/// Never fails: a reply with no recoverable JSON yields a record of empty
/// strings and the default deadline.
pub fn parse_extraction(reply: &str, now: Timestamp) -> ExtractedContest {
    let object = first_json_object(reply)
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .unwrap_or(serde_json::Value::Null);

    let field = |name: &str| -> String {
        object
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    let deadline = object
        .get("deadline")
        .and_then(|v| v.as_str())
        .and_then(parse_deadline)
        .unwrap_or_else(|| now + Duration::days(DEFAULT_DEADLINE_DAYS));

    ExtractedContest {
        title: field("title"),
        organization: field("organization"),
        category: field("category"),
        description: field("description"),
        theme: field("theme"),
        submission_format: field("submission_format"),
        schedule_note: field("schedule_note"),
        prize: field("prize"),
        precautions: field("precautions"),
        result_announcement: field("result_announcement"),
        url: field("url"),
        deadline,
    }
}

/// Find the first balanced top-level `{ ... }` in `text`.
///
/// Tracks JSON string literals and escapes so braces inside string values
/// do not break the match. Returns `None` when the object never closes
/// (truncated replies).
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Best-effort date parsing for the extracted deadline value.
///
/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates, and dates of that
/// shape embedded in longer text ("마감: 2026-09-01 18:00"). Dates resolve
/// to end of day UTC so "due today" still counts as one day left.
fn parse_deadline(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    let date_pattern = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").ok()?;
    let caps = date_pattern.captures(value)?;
    let date = NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )?;
    let end_of_day = date.and_hms_opt(23, 59, 59)?;
    Utc.from_local_datetime(&end_of_day).single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn finds_the_first_balanced_object() {
        let reply = "Sure! Here is the data:\n```json\n{\"title\": \"Spring Design Award\"}\n``` hope it helps";
        assert_eq!(
            first_json_object(reply),
            Some("{\"title\": \"Spring Design Award\"}")
        );
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_matcher() {
        let reply = r#"{"description": "use {curly} braces", "title": "x"}"#;
        assert_eq!(first_json_object(reply), Some(reply));
    }

    #[test]
    fn truncated_objects_yield_none() {
        assert_eq!(first_json_object("{\"title\": \"cut off"), None);
        assert_eq!(first_json_object("no json here"), None);
    }

    #[test]
    fn missing_fields_become_empty_strings() {
        let now = Utc::now();
        let parsed = parse_extraction(r#"{"title": "Photo Contest"}"#, now);
        assert_eq!(parsed.title, "Photo Contest");
        assert_eq!(parsed.organization, "");
        assert_eq!(parsed.prize, "");
        assert_eq!(parsed.url, "");
    }

    #[test]
    fn missing_deadline_defaults_to_thirty_days_out() {
        let now = Utc::now();
        let parsed = parse_extraction(r#"{"title": "x"}"#, now);
        assert_eq!(parsed.deadline, now + Duration::days(DEFAULT_DEADLINE_DAYS));
    }

    #[test]
    fn garbage_reply_degrades_to_all_defaults() {
        let now = Utc::now();
        let parsed = parse_extraction("I could not find any contest details.", now);
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.deadline, now + Duration::days(DEFAULT_DEADLINE_DAYS));
    }

    #[test]
    fn rfc3339_deadline_is_honored() {
        let now = Utc::now();
        let parsed = parse_extraction(
            r#"{"deadline": "2026-09-01T09:00:00Z"}"#,
            now,
        );
        assert_eq!(parsed.deadline.to_rfc3339(), "2026-09-01T09:00:00+00:00");
    }

    #[test]
    fn bare_date_deadline_resolves_to_end_of_day() {
        let now = Utc::now();
        let parsed = parse_extraction(r#"{"deadline": "2026-09-01"}"#, now);
        assert_eq!(
            parsed.deadline.to_rfc3339(),
            "2026-09-01T23:59:59+00:00"
        );
    }

    #[test]
    fn date_embedded_in_text_is_still_recovered() {
        let now = Utc::now();
        let parsed = parse_extraction(r#"{"deadline": "마감: 2026-09-01 18:00"}"#, now);
        assert_eq!(parsed.deadline.date_naive().to_string(), "2026-09-01");
    }

    #[test]
    fn non_string_field_values_are_treated_as_missing() {
        let now = Utc::now();
        let parsed = parse_extraction(r#"{"title": 42, "prize": null}"#, now);
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.prize, "");
    }
}
