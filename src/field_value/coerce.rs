//! Lenient conversions from JSON request values to field scalar types.
//!
//! Each function returns `None` when the value cannot represent the target
//! type. List variants accept a bare scalar as a one-element list and treat
//! `null` as an empty list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

pub fn to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim() {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
            _ => None,
        },
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` (both read as UTC), or
/// integer unix seconds.
pub fn to_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s.trim()),
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn to_list<T>(value: &Value, convert: fn(&Value) -> Option<T>) -> Option<Vec<T>> {
    match value {
        Value::Array(values) => values.iter().map(convert).collect(),
        Value::Null => Some(Vec::new()),
        other => convert(other).map(|v| vec![v]),
    }
}

pub fn to_string_list(value: &Value) -> Option<Vec<String>> {
    to_list(value, to_string)
}

pub fn to_int_list(value: &Value) -> Option<Vec<i64>> {
    to_list(value, to_int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&json!("x")).unwrap(), "x");
        assert_eq!(to_string(&json!(12)).unwrap(), "12");
        assert_eq!(to_string(&json!(true)).unwrap(), "true");
        assert_eq!(to_string(&Value::Null).unwrap(), "");
        assert!(to_string(&json!(["x"])).is_none());
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int(&json!(7)), Some(7));
        assert_eq!(to_int(&json!(7.0)), Some(7));
        assert_eq!(to_int(&json!(" 42 ")), Some(42));
        assert_eq!(to_int(&json!(true)), Some(1));
        assert_eq!(to_int(&json!(7.5)), None);
        assert_eq!(to_int(&json!("seven")), None);
        assert_eq!(to_int(&Value::Null), None);
    }

    #[test]
    fn test_to_bool() {
        assert_eq!(to_bool(&json!(false)), Some(false));
        assert_eq!(to_bool(&json!("T")), Some(true));
        assert_eq!(to_bool(&json!(0)), Some(false));
        assert_eq!(to_bool(&json!("yes")), None);
    }

    #[test]
    fn test_to_datetime_formats() {
        let rfc = to_datetime(&json!("2024-03-01T10:00:00+02:00")).unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-03-01T08:00:00+00:00");
        let plain = to_datetime(&json!("2024-03-01 10:00:00")).unwrap();
        assert_eq!(plain.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        let date = to_datetime(&json!("2024-03-01")).unwrap();
        assert_eq!(date.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        let unix = to_datetime(&json!(0)).unwrap();
        assert_eq!(unix.to_rfc3339(), "1970-01-01T00:00:00+00:00");
        assert!(to_datetime(&json!("yesterday")).is_none());
    }

    #[test]
    fn test_lists() {
        assert_eq!(to_string_list(&json!(["a", 1])).unwrap(), vec!["a", "1"]);
        assert_eq!(to_string_list(&json!("a")).unwrap(), vec!["a"]);
        assert!(to_string_list(&Value::Null).unwrap().is_empty());
        assert_eq!(to_int_list(&json!([1, "2"])).unwrap(), vec![1, 2]);
        assert!(to_int_list(&json!([1, "x"])).is_none());
    }
}
