//! Coded-description conversion and ISO-8601 epoch conversion.

use carta_models::clinical::{CodedValue, UNKNOWN_DATE};
use carta_models::source::CodedDescription;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Synthetic coding system under which free text rides in a [`CodedValue`].
pub const TEXT_SYSTEM: &str = "TEXT";

/// Convert a source coded description into normalized coded values.
///
/// The text, when non-empty, comes first under [`TEXT_SYSTEM`]; then one
/// `CodedValue` per code, in document order. Codes sharing a coding system
/// are deliberately not merged; source documents rarely carry more than one
/// code per system, and downstream matching handles the flat list either way.
pub fn convert_coded_description(description: Option<&CodedDescription>) -> Vec<CodedValue> {
    let Some(description) = description else {
        return Vec::new();
    };

    let mut converted = Vec::new();

    if let Some(text) = description.text.as_deref().filter(|t| !t.is_empty()) {
        let mut cv = CodedValue::new(TEXT_SYSTEM);
        cv.add_value(text);
        converted.push(cv);
    }

    for code in &description.code {
        let mut cv = CodedValue::new(code.coding_system.clone());
        cv.version = code.version.clone();
        cv.add_value(code.value.clone());
        converted.push(cv);
    }

    converted
}

/// Convert a full or partial ISO-8601 string into seconds from epoch.
///
/// Partial precision resolves to the start of the period; values without an
/// offset are read as UTC. Empty or unparseable input yields [`UNKNOWN_DATE`]
/// rather than an error; callers that must distinguish use
/// [`parse_exact_date_time`] directly.
pub fn epoch_seconds(iso: &str) -> i64 {
    parse_exact_date_time(iso)
        .map(|dt| dt.timestamp())
        .unwrap_or(UNKNOWN_DATE)
}

/// Parse a full or partial ISO-8601 datetime string.
///
/// Accepted precisions: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, date plus time with
/// optional fractional seconds, with or without a UTC offset.
pub fn parse_exact_date_time(iso: &str) -> Option<DateTime<Utc>> {
    let iso = iso.trim();
    if iso.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offset-less datetimes are read as UTC.
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(iso, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let date = match iso.len() {
        10 => NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?,
        7 => NaiveDate::parse_from_str(&format!("{iso}-01"), "%Y-%m-%d").ok()?,
        4 => NaiveDate::from_ymd_opt(iso.parse().ok()?, 1, 1)?,
        _ => return None,
    };
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
