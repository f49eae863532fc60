//! `integer` caster

use super::TypeCaster;
use crate::core::{CastError, ParamValue};
use regex::Regex;
use std::sync::OnceLock;

/// Strict integer conversion
///
/// - integers pass through
/// - finite floats truncate toward zero
/// - strings must be a complete integer literal: optional sign, decimal digits
///   or a `0x` / `0o` / `0b` radix prefix, `_` allowed between digits,
///   surrounding whitespace ignored
///
/// A leading `0` without a radix letter is plain decimal: `"012"` is twelve,
/// not an octal ten. Octal needs the explicit `0o` prefix.
///
/// Anything else (booleans, `"12.5"`, `"abc"`, collections) is a cast error.
pub struct IntegerType;

impl TypeCaster for IntegerType {
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError> {
        match value {
            ParamValue::Integer(i) => Ok(ParamValue::Integer(*i)),
            ParamValue::Float(f) => float_to_integer(value, *f),
            ParamValue::String(s) => parse_integer(s)
                .map(ParamValue::Integer)
                .ok_or_else(|| CastError::invalid(value, "integer", "invalid value for integer")),
            other => Err(CastError::invalid(
                value,
                "integer",
                format!("can't convert {} into integer", other.kind()),
            )),
        }
    }
}

fn float_to_integer(value: &ParamValue, f: f64) -> Result<ParamValue, CastError> {
    if !f.is_finite() {
        return Err(CastError::invalid(value, "integer", "non-finite float"));
    }
    let truncated = f.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(CastError::invalid(value, "integer", "out of range"));
    }
    Ok(ParamValue::Integer(truncated as i64))
}

fn integer_literal() -> &'static Regex {
    static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();
    INTEGER_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?P<sign>[+-])?(?:0[xX](?P<hex>[0-9a-fA-F]+(?:_[0-9a-fA-F]+)*)|0[oO](?P<oct>[0-7]+(?:_[0-7]+)*)|0[bB](?P<bin>[01]+(?:_[01]+)*)|(?P<dec>[0-9]+(?:_[0-9]+)*))$",
        )
        .expect("integer literal regex is valid")
    })
}

/// Parse a complete integer literal, `None` when malformed or out of range
pub(crate) fn parse_integer(input: &str) -> Option<i64> {
    let captures = integer_literal().captures(input.trim())?;

    let (digits, radix) = if let Some(m) = captures.name("hex") {
        (m.as_str(), 16)
    } else if let Some(m) = captures.name("oct") {
        (m.as_str(), 8)
    } else if let Some(m) = captures.name("bin") {
        (m.as_str(), 2)
    } else {
        (captures.name("dec")?.as_str(), 10)
    };

    let negative = captures.name("sign").is_some_and(|m| m.as_str() == "-");
    let mut literal = String::with_capacity(digits.len() + 1);
    if negative {
        literal.push('-');
    }
    literal.extend(digits.chars().filter(|c| *c != '_'));

    i64::from_str_radix(&literal, radix).ok()
}
