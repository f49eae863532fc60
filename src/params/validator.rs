//! Single-field validation and casting
//!
//! A field is evaluated in a fixed order: default substitution, cast,
//! required check against the original value, then exclusion predicates.

use super::field::{Constraints, Predicate};
use crate::core::{CastError, ParamValue};
use crate::types::TypeRegistry;

/// Outcome of evaluating one field
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// Cast value (or the raw value for untyped fields)
    pub value: ParamValue,
    /// Validation messages, `"{name} required"` at most
    pub errors: Vec<String>,
    /// Predicate that dropped the value, if any
    pub excluded_by: Option<Predicate>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The value to write into the output, `None` when the field is dropped
    pub fn into_output(self) -> Option<ParamValue> {
        if self.is_valid() && self.excluded_by.is_none() {
            Some(self.value)
        } else {
            None
        }
    }
}

/// Evaluates a field's raw value against its type tag and constraints
pub struct Validator<'a> {
    registry: &'a TypeRegistry,
    name: &'a str,
    kind: Option<&'a str>,
    constraints: &'a Constraints,
}

impl<'a> Validator<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        name: &'a str,
        kind: Option<&'a str>,
        constraints: &'a Constraints,
    ) -> Self {
        Self {
            registry,
            name,
            kind,
            constraints,
        }
    }

    /// Evaluate `original`, failing only when the value cannot be cast
    pub fn run(&self, original: &ParamValue) -> Result<Validation, CastError> {
        let mut errors = Vec::new();

        let value = match self.kind {
            None => original.clone(),
            Some(tag) => {
                let effective = match (&self.constraints.default, original.is_nil()) {
                    (Some(default), true) => default,
                    _ => original,
                };
                let value = self.registry.cast(effective, tag)?;

                if self.constraints.is_required() && original.is_nil() {
                    errors.push(format!("{} required", self.name));
                }
                value
            }
        };

        let excluded_by = if errors.is_empty() {
            self.constraints
                .active_exclusions()
                .iter()
                .find(|predicate| predicate.matches(&value))
        } else {
            None
        };

        Ok(Validation {
            value,
            errors,
            excluded_by,
        })
    }
}
