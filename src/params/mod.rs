//! Nested parameter filtering
//!
//! [`Params`] is the filter context: it holds one level of raw input, the
//! output being built and the accumulated validation errors. A schema is a
//! closure that declares fields on the context; composite fields recurse into
//! child contexts over nested mappings or arrays of mappings.
//!
//! ```rust
//! use attribeauty::params::{Field, Params, Predicate};
//! use serde_json::json;
//!
//! let input = json!({
//!     "title": "woo",
//!     "ignored": true,
//!     "email": { "address": "", "ip_address": "192.168.0.1" }
//! });
//!
//! let result = Params::with(input)
//!     .accept(|p| {
//!         p.attribute(Field::typed("title", "string").required(true))?;
//!         p.nested("email", |email| {
//!             email.attribute(Field::typed("address", "string").exclude_if(Predicate::Empty))?;
//!             email.attribute(Field::typed("ip_address", "string"))?;
//!             Ok(())
//!         })
//!     })
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert_eq!(
//!     result.to_json(),
//!     json!({ "title": "woo", "email": { "ip_address": "192.168.0.1" } })
//! );
//! ```

pub mod field;
pub mod validator;

pub use field::{Constraints, Field, Predicate, PredicateSet};
pub use validator::{Validation, Validator};

use crate::core::{FilterError, ParamMap, ParamValue};
use crate::types::TypeRegistry;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// Filter context for one nesting level
pub struct Params<'r> {
    registry: &'r TypeRegistry,
    input: ParamMap,
    output: ParamMap,
    errors: Vec<String>,
    defaults: Constraints,
    strict: bool,
}

impl Params<'static> {
    /// Wrap raw input, casting with the built-in types
    ///
    /// A non-mapping input is treated as an empty mapping.
    pub fn with(input: impl Into<ParamValue>) -> Self {
        Params::with_registry(input, TypeRegistry::builtin())
    }
}

impl<'r> Params<'r> {
    /// Wrap raw input, casting through `registry`
    pub fn with_registry(input: impl Into<ParamValue>, registry: &'r TypeRegistry) -> Self {
        let input = match input.into() {
            ParamValue::Map(map) => map,
            ParamValue::Null => ParamMap::new(),
            other => {
                tracing::warn!(
                    kind = other.kind(),
                    "top-level params are not a mapping, ignoring"
                );
                ParamMap::new()
            }
        };

        Self::scoped(registry, input, Constraints::default())
    }

    fn scoped(registry: &'r TypeRegistry, input: ParamMap, defaults: Constraints) -> Self {
        Self {
            registry,
            input,
            output: ParamMap::new(),
            errors: Vec::new(),
            defaults,
            strict: false,
        }
    }

    /// Fail the whole run when any validation error was collected
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Constraints merged into every field declared directly on this context
    pub fn defaults(mut self, defaults: Constraints) -> Self {
        self.defaults = defaults;
        self
    }

    /// Run `schema` against the input and return the filtered result
    ///
    /// In strict mode, collected validation errors turn into
    /// [`FilterError::Strict`] once the whole tree has been evaluated.
    pub fn accept<F>(mut self, schema: F) -> Result<FilterResult, FilterError>
    where
        F: FnOnce(&mut Params<'r>) -> Result<(), FilterError>,
    {
        schema(&mut self)?;

        tracing::debug!(
            fields = self.output.len(),
            errors = self.errors.len(),
            strict = self.strict,
            "params filtered"
        );

        if self.strict && !self.errors.is_empty() {
            return Err(FilterError::Strict {
                errors: self.errors,
            });
        }

        Ok(FilterResult {
            output: self.output,
            errors: self.errors,
        })
    }

    /// Declare a scalar field
    ///
    /// A field whose raw value is null or absent is skipped entirely unless
    /// it specifies `required` or, for typed fields, a `default` (directly or
    /// through the context defaults).
    pub fn attribute(&mut self, field: impl Into<Field>) -> Result<(), FilterError> {
        let field = field.into();
        let constraints = field.get_constraints().merge(&self.defaults);
        let name = field.name();
        let original = self.input.get(name).cloned().unwrap_or_default();

        let has_default = field.tag().is_some() && constraints.default.is_some();
        if original.is_nil() && constraints.required.is_none() && !has_default {
            tracing::trace!(field = name, "absent, skipped");
            return Ok(());
        }

        let validation =
            Validator::new(self.registry, name, field.tag(), &constraints).run(&original)?;

        if let Some(predicate) = validation.excluded_by {
            tracing::trace!(field = name, predicate = %predicate, "excluded");
        }
        if !validation.is_valid() {
            tracing::debug!(field = name, "required field missing");
        }

        self.errors.extend(validation.errors.iter().cloned());
        if let Some(value) = validation.into_output() {
            self.output.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Declare a composite field evaluated by `schema`
    ///
    /// An array yields one child per element, keeping only non-empty child
    /// outputs; a mapping yields a single child. The key is omitted when
    /// nothing survives. A null or absent value still runs one child over an
    /// empty mapping so its errors are reported, but contributes no output.
    /// Child errors are appended in order.
    pub fn nested<F>(&mut self, name: &str, schema: F) -> Result<(), FilterError>
    where
        F: FnMut(&mut Params<'r>) -> Result<(), FilterError>,
    {
        self.nested_with(name, Constraints::default(), schema)
    }

    /// Like [`nested`](Self::nested), handing `defaults` to the child contexts
    pub fn nested_with<F>(
        &mut self,
        name: &str,
        defaults: Constraints,
        mut schema: F,
    ) -> Result<(), FilterError>
    where
        F: FnMut(&mut Params<'r>) -> Result<(), FilterError>,
    {
        let raw = self.input.get(name).cloned().unwrap_or_default();

        let value = match raw {
            ParamValue::Array(items) => {
                let mut children = Vec::with_capacity(items.len());
                for item in items {
                    let child = self.child(name, item, &defaults)?;
                    if let Some(output) = self.absorb(child, &mut schema)? {
                        children.push(ParamValue::Map(output));
                    }
                }
                (!children.is_empty()).then_some(ParamValue::Array(children))
            }
            ParamValue::Null => {
                let child = self.child(name, ParamValue::Null, &defaults)?;
                if self.absorb(child, &mut schema)?.is_some() {
                    tracing::trace!(field = name, "absent composite, child output discarded");
                }
                None
            }
            single => {
                let child = self.child(name, single, &defaults)?;
                self.absorb(child, &mut schema)?.map(ParamValue::Map)
            }
        };

        match value {
            Some(value) => {
                self.output.insert(name.to_string(), value);
            }
            None => tracing::trace!(field = name, "empty composite, omitted"),
        }
        Ok(())
    }

    /// Re-bind this context's input to the mapping at `name`, then run `schema`
    ///
    /// No output level is added, and the re-binding stays in effect for the
    /// declarations that follow.
    pub fn root<F>(&mut self, name: &str, schema: F) -> Result<(), FilterError>
    where
        F: FnOnce(&mut Params<'r>) -> Result<(), FilterError>,
    {
        let scoped = self.input.get(name).cloned().unwrap_or_default();
        self.input = expect_mapping(name, scoped)?;
        schema(self)
    }

    fn child(
        &self,
        name: &str,
        value: ParamValue,
        defaults: &Constraints,
    ) -> Result<Params<'r>, FilterError> {
        let input = expect_mapping(name, value)?;
        Ok(Params::scoped(self.registry, input, defaults.clone()))
    }

    /// Evaluate a child context and merge its errors, returning its output
    /// when non-empty
    fn absorb<F>(
        &mut self,
        mut child: Params<'r>,
        schema: &mut F,
    ) -> Result<Option<ParamMap>, FilterError>
    where
        F: FnMut(&mut Params<'r>) -> Result<(), FilterError>,
    {
        schema(&mut child)?;
        self.errors.append(&mut child.errors);
        Ok((!child.output.is_empty()).then_some(child.output))
    }

    /// Raw input of this level
    pub fn input(&self) -> &ParamMap {
        &self.input
    }

    /// Output built so far
    pub fn output(&self) -> &ParamMap {
        &self.output
    }

    /// Errors collected so far, children included
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }
}

fn expect_mapping(name: &str, value: ParamValue) -> Result<ParamMap, FilterError> {
    match value {
        ParamValue::Map(map) => Ok(map),
        ParamValue::Null => Ok(ParamMap::new()),
        _ => Err(FilterError::NotAMapping {
            field: name.to_string(),
        }),
    }
}

/// Filtered output and validation errors of a completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult {
    output: ParamMap,
    errors: Vec<String>,
}

impl FilterResult {
    /// The filtered mapping
    pub fn to_h(&self) -> &ParamMap {
        &self.output
    }

    pub fn as_map(&self) -> &ParamMap {
        &self.output
    }

    pub fn into_map(self) -> ParamMap {
        self.output
    }

    pub fn to_json(&self) -> serde_json::Value {
        ParamValue::Map(self.output.clone()).to_json()
    }

    /// Validation errors in traversal order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Value at `key`, `None` when absent
    ///
    /// Prefer this over indexing, which panics on a missing key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.output.get(key)
    }

    /// Set a key on the filtered mapping, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.output.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.output.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

impl Index<&str> for FilterResult {
    type Output = ParamValue;

    /// # Panics
    ///
    /// Panics when `key` is absent, like `IndexMap`. Use
    /// [`FilterResult::get`] when the key may be missing.
    fn index(&self, key: &str) -> &ParamValue {
        &self.output[key]
    }
}

impl Serialize for FilterResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.output.serialize(serializer)
    }
}
