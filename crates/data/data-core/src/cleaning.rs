//! Value and timestamp coercion plus gap filling.
//!
//! Timestamps are coerced: anything unrecognised becomes `None` rather than an
//! error. Values are strict: a field that is present but not numeric is an
//! error, while `null`, blank text and textual NaN count as missing. Textual
//! infinities are not numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use data_spi::{DataError, MissingValuePolicy, Result};
use serde_json::Value;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Epoch numbers above this are read as milliseconds.
const MILLIS_THRESHOLD: f64 = 1e11;

/// Coerce a JSON value to a UTC timestamp.
///
/// Accepts RFC 3339 and common naive date/time strings, Unix epoch numbers
/// (seconds, or milliseconds when large) and Firestore-style
/// `{"_seconds", "_nanoseconds"}` objects.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::Object(map) => {
            let secs = map
                .get("_seconds")
                .or_else(|| map.get("seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("_nanoseconds")
                .or_else(|| map.get("nanos"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    s.parse::<f64>().ok().and_then(from_epoch)
}

fn from_epoch(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let millis = if value.abs() > MILLIS_THRESHOLD {
        value
    } else {
        value * 1000.0
    };
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Read a JSON value as an observation.
///
/// `position` describes where the value came from and is only used in the
/// error message.
pub fn parse_value(value: &Value, position: &str) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64().filter(|v| v.is_finite())),
        Value::String(s) => parse_text(s).ok_or_else(|| non_numeric(position, value)),
        other => Err(non_numeric(position, other)),
    }
}

/// Read text as an observation.
///
/// Blank and `NaN` text are missing. Returns `None` when the text is not a
/// finite number, which includes `inf` and values that overflow `f64`.
pub fn parse_text(text: &str) -> Option<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => Some(None),
        Ok(v) if v.is_finite() => Some(Some(v)),
        _ => None,
    }
}

fn non_numeric(position: &str, value: &Value) -> DataError {
    let found = value.to_string();
    DataError::NonNumeric {
        position: position.to_string(),
        found: shorten(&found, 64),
    }
}

/// Clip `text` to at most `max` characters, marking the cut with `...`.
pub(crate) fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Resolve gaps according to `policy`.
pub fn fill_missing(values: &[Option<f64>], policy: MissingValuePolicy) -> Vec<f64> {
    match policy {
        MissingValuePolicy::Skip => values.iter().flatten().copied().collect(),
        MissingValuePolicy::Zero => values.iter().map(|v| v.unwrap_or(0.0)).collect(),
        MissingValuePolicy::Previous => {
            let mut last = None;
            values
                .iter()
                .filter_map(|v| {
                    if v.is_some() {
                        last = *v;
                    }
                    last
                })
                .collect()
        }
        MissingValuePolicy::Interpolate => interpolate(values),
    }
}

fn interpolate(values: &[Option<f64>]) -> Vec<f64> {
    let known: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    if known.is_empty() {
        return Vec::new();
    }

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if let Some(v) = v {
                return *v;
            }
            let next = known.partition_point(|&(k, _)| k < i);
            let prev = next.checked_sub(1).map(|p| known[p]);
            match (prev, known.get(next).copied()) {
                (Some((p, pv)), Some((n, nv))) => {
                    pv + (nv - pv) * (i - p) as f64 / (n - p) as f64
                }
                (Some((_, pv)), None) => pv,
                (None, Some((_, nv))) => nv,
                // `known` is non-empty
                (None, None) => 0.0,
            }
        })
        .collect()
}
