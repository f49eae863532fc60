//! `string` caster

use super::TypeCaster;
use crate::core::{CastError, ParamValue};

/// Stringifies any non-null value
///
/// Floats always keep a fractional part (`100.0` → `"100.0"`), times use
/// `%Y-%m-%d %H:%M:%S %z`, arrays and maps render as compact JSON.
pub struct StringType;

impl TypeCaster for StringType {
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError> {
        Ok(ParamValue::String(stringify(value)))
    }
}

pub(crate) fn stringify(value: &ParamValue) -> String {
    match value {
        ParamValue::Null => String::new(),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Integer(i) => i.to_string(),
        ParamValue::Float(f) => format_float(*f),
        ParamValue::String(s) => s.clone(),
        ParamValue::Time(t) => t.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        ParamValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        ParamValue::Array(_) | ParamValue::Map(_) => value.to_json().to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}
