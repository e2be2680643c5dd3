use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Placeholder for missing or unparsable values
const NOT_AVAILABLE: &str = "N/A";

/// Format a backend timestamp for display.
///
/// Missing, empty, and unparsable inputs all render as `"N/A"`. Accepts
/// RFC 3339 as well as the bare `LocalDateTime` shapes the backend emits
/// (with or without seconds) and plain dates.
pub fn format_date(value: Option<&str>, date_only: bool) -> String {
    let raw = match value {
        Some(v) => v.trim(),
        None => return NOT_AVAILABLE.to_string(),
    };
    if raw.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        });

    match parsed {
        Ok(dt) if date_only => dt.format("%b %d, %Y").to_string(),
        Ok(dt) => dt.format("%b %d, %Y %-I:%M %p").to_string(),
        Err(_) => NOT_AVAILABLE.to_string(),
    }
}

/// Format an optional string, returning a default if unset or empty
pub fn format_optional(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
