//! Type registry and built-in casters
//!
//! A [`TypeRegistry`] maps a type tag (`"string"`, `"integer"`, ...) to a
//! [`TypeCaster`]. The registry is built once at startup, extended with
//! custom tags if needed, and then only read while filtering.
//!
//! ```rust
//! use attribeauty::core::{CastError, ParamValue};
//! use attribeauty::types::TypeRegistry;
//!
//! let mut registry = TypeRegistry::default();
//! registry.register("koala", |value: &ParamValue| match value.as_str() {
//!     Some(s) => Ok(ParamValue::String(format!("{s}_koalas"))),
//!     None => Err(CastError::invalid(value, "koala", "expected a string")),
//! });
//!
//! let cast = registry.cast(&"i_watch_out_for".into(), "koala").unwrap();
//! assert_eq!(cast, ParamValue::from("i_watch_out_for_koalas"));
//! ```

pub mod boolean;
pub mod float;
pub mod integer;
pub mod string;
pub mod time;

use crate::core::{CastError, ParamValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

pub const STRING: &str = "string";
pub const INTEGER: &str = "integer";
pub const FLOAT: &str = "float";
pub const BOOLEAN: &str = "boolean";
pub const TIME: &str = "time";

/// Converts a raw, non-null value into the representation of one type tag
pub trait TypeCaster: Send + Sync {
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError>;
}

impl<F> TypeCaster for F
where
    F: Fn(&ParamValue) -> Result<ParamValue, CastError> + Send + Sync,
{
    fn cast(&self, value: &ParamValue) -> Result<ParamValue, CastError> {
        self(value)
    }
}

/// Mapping from type tag to caster
///
/// `Default` yields the built-in tags; `empty()` yields none.
#[derive(Clone)]
pub struct TypeRegistry {
    casters: HashMap<String, Arc<dyn TypeCaster>>,
}

impl TypeRegistry {
    /// A registry without any tag, not even the built-in ones
    pub fn empty() -> Self {
        Self {
            casters: HashMap::new(),
        }
    }

    /// Shared registry holding only the built-in tags
    pub fn builtin() -> &'static TypeRegistry {
        static BUILTIN: OnceLock<TypeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(TypeRegistry::default)
    }

    /// Register (or replace) the caster for `tag`
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        caster: impl TypeCaster + 'static,
    ) -> &mut Self {
        let tag = tag.into();
        if self.casters.insert(tag.clone(), Arc::new(caster)).is_some() {
            tracing::debug!(tag = %tag, "replaced registered caster");
        }
        self
    }

    /// Check whether `tag` has a caster
    pub fn contains(&self, tag: &str) -> bool {
        self.casters.contains_key(tag)
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.casters.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Cast `value` to the type registered under `tag`
    ///
    /// Null always casts to null, before the tag is even looked up.
    pub fn cast(&self, value: &ParamValue, tag: &str) -> Result<ParamValue, CastError> {
        if value.is_nil() {
            return Ok(ParamValue::Null);
        }

        let caster = self
            .casters
            .get(tag)
            .ok_or_else(|| CastError::UnsupportedType {
                tag: tag.to_string(),
            })?;

        caster.cast(value)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(STRING, string::StringType)
            .register(INTEGER, integer::IntegerType)
            .register(FLOAT, float::FloatType)
            .register(BOOLEAN, boolean::BooleanType)
            .register(TIME, time::TimeType);
        registry
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
