//! # attribeauty
//!
//! Declarative filtering, casting and validation of nested request parameters.
//!
//! ## Features
//!
//! - **Allow-list Filtering**: only declared keys reach the output
//! - **Type Casting**: `string`, `integer`, `float`, `boolean`, `time`, plus custom tags
//! - **Nested Schemas**: mappings and arrays of mappings, empty branches pruned
//! - **Soft and Strict Validation**: collect `"<field> required"` messages or fail at once
//! - **Exclusion Predicates**: silently drop `nil?` / `empty?` values
//! - **Typed Attribute Structs**: the `attributes!` macro casts on assignment
//! - **Column Schemas**: build declarations from database column metadata
//!
//! ## Quick Start
//!
//! ```rust
//! use attribeauty::prelude::*;
//! use serde_json::json;
//!
//! let params = json!({
//!     "title": 1,
//!     "email": { "address": "hmm@yep.com", "valid": "FALSE" }
//! });
//!
//! let result = Params::with(params)
//!     .accept(|p| {
//!         p.attribute(Field::typed("title", "string").required(true))?;
//!         p.nested("email", |email| {
//!             email.attribute(Field::typed("address", "string").allow_empty(false))?;
//!             email.attribute(Field::typed("valid", "boolean").allow_nil(false))
//!         })
//!     })
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert_eq!(
//!     result.to_json(),
//!     json!({ "title": "1", "email": { "address": "hmm@yep.com", "valid": false } })
//! );
//! ```

pub mod attributes;
pub mod config;
pub mod core;
pub mod params;
pub mod schema;
pub mod types;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{AttribeautyError, CastError, FilterError, ParamMap, ParamValue};

    // === Filtering ===
    pub use crate::params::{Constraints, Field, FilterResult, Params, Predicate, PredicateSet};

    // === Types ===
    pub use crate::types::{TypeCaster, TypeRegistry};

    // === Config ===
    pub use crate::config::{ConfigFile, Configuration};

    // === Schema ===
    pub use crate::schema::{ColumnDescriptor, TableSchema};

    // === Macros ===
    pub use crate::attributes;
}
