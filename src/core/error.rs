//! Typed error handling for attribeauty
//!
//! Filtering distinguishes two failure classes:
//!
//! - soft validation errors (a missing required field) are plain strings
//!   collected on the [`FilterResult`](crate::params::FilterResult) and never
//!   surface here;
//! - hard failures abort a run and are reported through the types below.
//!
//! # Error Categories
//!
//! - [`CastError`]: a value could not be cast, or the type tag is unknown
//! - [`FilterError`]: a filtering run failed (cast failure, malformed nesting,
//!   or strict mode with accumulated errors)
//! - [`AttribeautyError`]: umbrella type for callers mixing filtering, typed
//!   attribute structs and configuration
//!
//! # Example
//!
//! ```rust,ignore
//! match Params::with(input).strict(true).accept(schema) {
//!     Ok(result) => println!("{:?}", result.to_h()),
//!     Err(FilterError::Strict { errors }) => eprintln!("invalid: {:?}", errors),
//!     Err(e) => eprintln!("broken input: {}", e),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Errors raised by the type registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    /// No caster is registered under this tag
    #[error("{tag} not supported")]
    UnsupportedType { tag: String },

    /// The value cannot be represented as the target type
    #[error("cannot cast {value} to {target}: {reason}")]
    Invalid {
        value: String,
        target: String,
        reason: String,
    },
}

impl CastError {
    /// Build an `Invalid` error from the offending value
    pub fn invalid(
        value: &crate::core::ParamValue,
        target: &str,
        reason: impl Into<String>,
    ) -> Self {
        CastError::Invalid {
            value: value.to_json().to_string(),
            target: target.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a filtering run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A declared field could not be cast
    #[error(transparent)]
    Cast(#[from] CastError),

    /// A composite field received a scalar where a mapping was expected
    #[error("{field} must be a mapping or a list of mappings")]
    NotAMapping { field: String },

    /// Strict mode finished with validation errors
    #[error("{}", .errors.join(", "))]
    Strict { errors: Vec<String> },
}

impl FilterError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::Cast(CastError::UnsupportedType { .. }) => "UNSUPPORTED_TYPE",
            FilterError::Cast(CastError::Invalid { .. }) => "INVALID_CAST",
            FilterError::NotAMapping { .. } => "NOT_A_MAPPING",
            FilterError::Strict { .. } => "VALIDATION_FAILED",
        }
    }

    /// Validation messages carried by a strict failure, empty otherwise
    pub fn validation_errors(&self) -> &[String] {
        match self {
            FilterError::Strict { errors } => errors,
            _ => &[],
        }
    }
}

/// The main error type for the attribeauty crate
///
/// Each variant wraps the more specific error of its category.
#[derive(Debug)]
pub enum AttribeautyError {
    /// Filtering failures
    Filter(FilterError),

    /// Casting failures outside of a filtering run (typed attribute structs)
    Cast(CastError),

    /// Assignment to an attribute that was never declared
    MissingAttribute { name: String },

    /// Configuration errors
    Config { message: String },
}

impl fmt::Display for AttribeautyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttribeautyError::Filter(e) => write!(f, "{}", e),
            AttribeautyError::Cast(e) => write!(f, "{}", e),
            AttribeautyError::MissingAttribute { name } => {
                write!(f, "undefined attribute '{}'", name)
            }
            AttribeautyError::Config { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for AttribeautyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttribeautyError::Filter(e) => Some(e),
            AttribeautyError::Cast(e) => Some(e),
            AttribeautyError::MissingAttribute { .. } => None,
            AttribeautyError::Config { .. } => None,
        }
    }
}

impl AttribeautyError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AttribeautyError::Filter(e) => e.error_code(),
            AttribeautyError::Cast(e) => FilterError::Cast(e.clone()).error_code(),
            AttribeautyError::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            AttribeautyError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<FilterError> for AttribeautyError {
    fn from(err: FilterError) -> Self {
        AttribeautyError::Filter(err)
    }
}

impl From<CastError> for AttribeautyError {
    fn from(err: CastError) -> Self {
        AttribeautyError::Cast(err)
    }
}

/// Result type alias using AttribeautyError
pub type Result<T> = std::result::Result<T, AttribeautyError>;
