//! Typed attribute structs
//!
//! The [`attributes!`](crate::attributes) macro declares plain structs whose
//! setters cast through the type registry, for code that wants typed
//! attributes without running a full params filter.

mod macros;

#[cfg(test)]
mod tests {
    use crate::core::{AttribeautyError, CastError, ParamValue};
    use crate::types::TypeRegistry;

    crate::attributes! {
        struct Sample {
            first: string,
            second: integer,
            forth: boolean,
        }
    }

    #[test]
    fn test_attribute_table() {
        assert_eq!(
            Sample::ATTRIBUTES,
            &[("first", "string"), ("second", "integer"), ("forth", "boolean")]
        );
    }

    #[test]
    fn test_unset_attributes_are_null() {
        let sample = Sample::default();
        assert_eq!(sample.first(), &ParamValue::Null);
        assert!(!sample.is_truthy("forth"));
    }

    #[test]
    fn test_set_casts_value() {
        let registry = TypeRegistry::default();
        let mut sample = Sample::default();
        sample.set(&registry, "second", "1234").unwrap();
        assert_eq!(sample.second(), &ParamValue::Integer(1234));
    }

    #[test]
    fn test_unknown_attribute_is_rejected() {
        let registry = TypeRegistry::default();
        let err = Sample::new(&registry, [("seventh", 1)]).expect_err("seventh is not declared");
        assert!(matches!(err, AttribeautyError::MissingAttribute { name } if name == "seventh"));
    }

    #[test]
    fn test_cast_failure_propagates() {
        let registry = TypeRegistry::default();
        let err = Sample::new(&registry, [("second", "abc")]).expect_err("abc is not an integer");
        assert!(matches!(err, AttribeautyError::Cast(CastError::Invalid { .. })));
    }
}
