//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors carry stable codes
//! - Error messages are flat and readable
//! - Error conversions work correctly
//! - Error matching allows callers to handle specific cases

use attribeauty::prelude::*;
use serde_json::json;
use std::error::Error;

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_filter_error_codes() {
        let cases = [
            (
                FilterError::Cast(CastError::UnsupportedType { tag: "koala".into() }),
                "UNSUPPORTED_TYPE",
            ),
            (
                FilterError::Cast(CastError::invalid(&ParamValue::from("x"), "integer", "nope")),
                "INVALID_CAST",
            ),
            (
                FilterError::NotAMapping {
                    field: "email".into(),
                },
                "NOT_A_MAPPING",
            ),
            (
                FilterError::Strict {
                    errors: vec!["title required".into()],
                },
                "VALIDATION_FAILED",
            ),
        ];

        for (err, code) in cases {
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn test_top_level_error_codes() {
        let missing = AttribeautyError::MissingAttribute {
            name: "seventh".into(),
        };
        assert_eq!(missing.error_code(), "MISSING_ATTRIBUTE");

        let config = AttribeautyError::Config {
            message: "bad".into(),
        };
        assert_eq!(config.error_code(), "CONFIG_ERROR");

        let cast: AttribeautyError = CastError::UnsupportedType { tag: "koala".into() }.into();
        assert_eq!(cast.error_code(), "UNSUPPORTED_TYPE");
    }
}

// =============================================================================
// Error Message Tests
// =============================================================================

mod error_message_tests {
    use super::*;

    #[test]
    fn test_invalid_cast_message_names_value_and_target() {
        let err = CastError::invalid(&ParamValue::from("many"), "integer", "not a number");
        assert_eq!(err.to_string(), "cannot cast \"many\" to integer: not a number");
    }

    #[test]
    fn test_strict_message_joins_errors() {
        let err = FilterError::Strict {
            errors: vec!["title required".into(), "email required".into()],
        };
        assert_eq!(err.to_string(), "title required, email required");
    }

    #[test]
    fn test_missing_attribute_message() {
        let err = AttribeautyError::MissingAttribute {
            name: "seventh".into(),
        };
        assert_eq!(err.to_string(), "undefined attribute 'seventh'");
    }
}

// =============================================================================
// Error Conversion Tests
// =============================================================================

mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_cast_error_converts_to_filter_error() {
        let err: FilterError = CastError::UnsupportedType { tag: "koala".into() }.into();
        assert!(matches!(err, FilterError::Cast(_)));
        assert_eq!(err.to_string(), "koala not supported");
    }

    #[test]
    fn test_filter_error_converts_to_top_level_with_source() {
        let err: AttribeautyError = FilterError::NotAMapping {
            field: "email".into(),
        }
        .into();

        assert!(matches!(err, AttribeautyError::Filter(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_filter_error_converts_to_anyhow() {
        fn run() -> anyhow::Result<FilterResult> {
            let result = Params::with(json!({ "n": "x" }))
                .accept(|p| p.attribute(Field::typed("n", "integer")))?;
            Ok(result)
        }

        let err = run().expect_err("x is not an integer");
        assert!(err.downcast_ref::<FilterError>().is_some());
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    #[test]
    fn test_scalar_for_composite_is_not_a_mapping() {
        let err = Params::with(json!({ "email": "hmm@yep.com" }))
            .accept(|p| p.nested("email", |email| email.attribute(Field::typed("address", "string"))))
            .expect_err("a string is not a mapping");

        match err {
            FilterError::NotAMapping { field } => assert_eq!(field, "email"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_scalar_inside_array_is_not_a_mapping() {
        let err = Params::with(json!({ "email": [{ "address": "a@b.c" }, 3] }))
            .accept(|p| p.nested("email", |email| email.attribute(Field::typed("address", "string"))))
            .expect_err("3 is not a mapping");

        assert_eq!(err.error_code(), "NOT_A_MAPPING");
    }

    #[test]
    fn test_can_match_cast_failures() {
        let err = Params::with(json!({ "n": "x" }))
            .accept(|p| p.attribute(Field::typed("n", "integer")))
            .expect_err("x is not an integer");

        match err {
            FilterError::Cast(CastError::Invalid { target, .. }) => assert_eq!(target, "integer"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
