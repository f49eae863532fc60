//! `time` caster

use super::TypeCaster;
use crate::core::{CastError, ParamValue};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Time conversion
///
/// - times pass through
/// - dates become midnight UTC
/// - integers are milliseconds since the Unix epoch
/// - floats are seconds since the Unix epoch
/// - strings are parsed permissively, see [`parse_time`]
pub struct TimeType;

impl TypeCaster for TimeType {
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError> {
        let time = match value {
            ParamValue::Time(t) => Some(*t),
            ParamValue::Date(d) => Some(utc(d.and_time(NaiveTime::MIN))),
            ParamValue::Integer(millis) => {
                DateTime::<Utc>::from_timestamp_millis(*millis).map(|t| t.fixed_offset())
            }
            ParamValue::Float(secs) => from_float_seconds(*secs),
            ParamValue::String(s) => parse_time(s),
            other => {
                return Err(CastError::invalid(
                    value,
                    "time",
                    format!("can't convert {} into time", other.kind()),
                ));
            }
        };

        time.map(ParamValue::Time)
            .ok_or_else(|| CastError::invalid(value, "time", "no time information"))
    }
}

fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().fixed_offset()
}

fn from_float_seconds(secs: f64) -> Option<DateTime<FixedOffset>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(whole as i64, nanos).map(|t| t.fixed_offset())
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M %z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y"];

/// Parse a date-time string, trying the common layouts in turn
///
/// RFC 3339 and RFC 2822 come first, then `Y-m-d H:M:S` forms with an
/// explicit offset, then naive forms and bare dates which are taken as UTC.
pub fn parse_time(input: &str) -> Option<DateTime<FixedOffset>> {
    let s = input.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(s) {
        return Some(t);
    }
    if let Some(t) = OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(s, f).ok())
    {
        return Some(t);
    }
    if let Some(t) = NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Some(utc(t));
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .map(|d| utc(d.and_time(NaiveTime::MIN)))
}
