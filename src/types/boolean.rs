//! `boolean` caster

use super::TypeCaster;
use crate::core::{CastError, ParamValue};

/// String literals that cast to `false`
pub const FALSE_STRINGS: [&str; 7] = ["0", "f", "F", "false", "FALSE", "off", "OFF"];

/// Permissive boolean conversion
///
/// A value is `false` only when it is `false`, the integer `0`, or one of
/// [`FALSE_STRINGS`]. Everything else is `true`, including `"true"`, any
/// non-zero number, `0.0`, and collections. Never fails.
pub struct BooleanType;

impl TypeCaster for BooleanType {
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError> {
        Ok(ParamValue::Bool(!is_false_value(value)))
    }
}

fn is_false_value(value: &ParamValue) -> bool {
    match value {
        ParamValue::Bool(b) => !b,
        ParamValue::Integer(i) => *i == 0,
        ParamValue::String(s) => FALSE_STRINGS.contains(&s.as_str()),
        _ => false,
    }
}
