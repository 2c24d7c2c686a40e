//! Parsing of user-supplied visit dates

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use validator::ValidationError;

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS` or a plain
/// `YYYY-MM-DD` date (read as midnight UTC).
pub fn parse_visit_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Visit date given on a visited place: must parse and must not be in the future
pub fn validate_visit_date(raw: &str) -> Result<(), ValidationError> {
    let Some(date) = parse_visit_date(raw) else {
        let mut err = ValidationError::new("visit_date");
        err.message = Some("Visit date is not a valid date".into());
        return Err(err);
    };
    if date > Utc::now() {
        let mut err = ValidationError::new("visit_date");
        err.message = Some("Visit date cannot be in the future".into());
        return Err(err);
    }
    Ok(())
}
