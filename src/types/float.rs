//! `float` caster

use super::TypeCaster;
use crate::core::{CastError, ParamValue};
use regex::Regex;
use std::sync::OnceLock;

/// Strict float conversion: numbers widen, strings must be a complete
/// decimal or scientific literal (`_` allowed between digits).
pub struct FloatType;

impl TypeCaster for FloatType {
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError> {
        match value {
            ParamValue::Float(f) => Ok(ParamValue::Float(*f)),
            ParamValue::Integer(i) => Ok(ParamValue::Float(*i as f64)),
            ParamValue::String(s) => parse_float(s)
                .map(ParamValue::Float)
                .ok_or_else(|| CastError::invalid(value, "float", "invalid value for float")),
            other => Err(CastError::invalid(
                value,
                "float",
                format!("can't convert {} into float", other.kind()),
            )),
        }
    }
}

fn float_literal() -> &'static Regex {
    static FLOAT_REGEX: OnceLock<Regex> = OnceLock::new();
    FLOAT_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?[0-9]+(?:_[0-9]+)*(?:\.[0-9]+(?:_[0-9]+)*)?(?:[eE][+-]?[0-9]+)?$")
            .expect("float literal regex is valid")
    })
}

fn parse_float(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if !float_literal().is_match(trimmed) {
        return None;
    }
    trimmed.replace('_', "").parse().ok()
}
