//! Core module containing the value model and error types

pub mod error;
pub mod value;

pub use error::{AttribeautyError, CastError, FilterError};
pub use value::{ParamMap, ParamValue};
