//! Field declarations, constraints and exclusion predicates

use crate::core::ParamValue;
use std::fmt;

/// A named test used to silently drop a value from the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// `nil?`: the value is null
    Nil,
    /// `empty?`: the value is an empty string, array or map
    Empty,
}

impl Predicate {
    pub const ALL: [Predicate; 2] = [Predicate::Nil, Predicate::Empty];

    /// Evaluate the predicate against a (cast) value
    ///
    /// `empty?` on a value without a notion of emptiness is `false`.
    pub fn matches(&self, value: &ParamValue) -> bool {
        match self {
            Predicate::Nil => value.is_nil(),
            Predicate::Empty => value.emptiness().unwrap_or(false),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Nil => "nil?",
            Predicate::Empty => "empty?",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of predicates
///
/// Built from a single [`Predicate`], an array, a slice or a `Vec`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredicateSet {
    nil: bool,
    empty: bool,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::Nil => self.nil,
            Predicate::Empty => self.empty,
        }
    }

    pub fn insert(&mut self, predicate: Predicate) {
        match predicate {
            Predicate::Nil => self.nil = true,
            Predicate::Empty => self.empty = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.nil && !self.empty
    }

    /// Predicates of `self` that are not in `other`
    pub fn without(&self, other: &PredicateSet) -> PredicateSet {
        PredicateSet {
            nil: self.nil && !other.nil,
            empty: self.empty && !other.empty,
        }
    }

    pub fn union(&self, other: &PredicateSet) -> PredicateSet {
        PredicateSet {
            nil: self.nil || other.nil,
            empty: self.empty || other.empty,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Predicate> + '_ {
        Predicate::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl From<Predicate> for PredicateSet {
    fn from(predicate: Predicate) -> Self {
        let mut set = PredicateSet::new();
        set.insert(predicate);
        set
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        let mut set = PredicateSet::new();
        for predicate in iter {
            set.insert(predicate);
        }
        set
    }
}

impl<const N: usize> From<[Predicate; N]> for PredicateSet {
    fn from(predicates: [Predicate; N]) -> Self {
        predicates.into_iter().collect()
    }
}

impl From<&[Predicate]> for PredicateSet {
    fn from(predicates: &[Predicate]) -> Self {
        predicates.iter().copied().collect()
    }
}

impl From<Vec<Predicate>> for PredicateSet {
    fn from(predicates: Vec<Predicate>) -> Self {
        predicates.into_iter().collect()
    }
}

/// Constraints attached to a scalar declaration
///
/// Every key is optional so that a context's default constraints can be
/// merged in key by key, see [`Constraints::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub required: Option<bool>,
    pub default: Option<ParamValue>,
    pub allow: Option<PredicateSet>,
    pub exclude_if: Option<PredicateSet>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Value substituted when the raw value is null
    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Predicates that cancel the matching `exclude_if` entries
    pub fn allow(mut self, predicates: impl Into<PredicateSet>) -> Self {
        self.allow = Some(predicates.into());
        self
    }

    /// Predicates that drop the value from the output when they match
    pub fn exclude_if(mut self, predicates: impl Into<PredicateSet>) -> Self {
        self.exclude_if = Some(predicates.into());
        self
    }

    /// Flag form: `false` excludes null values, `true` allows them
    pub fn allow_nil(self, allowed: bool) -> Self {
        self.flag(Predicate::Nil, allowed)
    }

    /// Flag form: `false` excludes empty values, `true` allows them
    pub fn allow_empty(self, allowed: bool) -> Self {
        self.flag(Predicate::Empty, allowed)
    }

    fn flag(mut self, predicate: Predicate, allowed: bool) -> Self {
        let slot = if allowed {
            &mut self.allow
        } else {
            &mut self.exclude_if
        };
        slot.get_or_insert_with(PredicateSet::new).insert(predicate);
        self
    }

    /// Fill every unset key from `inherited`
    pub fn merge(&self, inherited: &Constraints) -> Constraints {
        Constraints {
            required: self.required.or(inherited.required),
            default: self.default.clone().or_else(|| inherited.default.clone()),
            allow: self.allow.or(inherited.allow),
            exclude_if: self.exclude_if.or(inherited.exclude_if),
        }
    }

    pub fn is_required(&self) -> bool {
        self.required == Some(true)
    }

    /// Exclusion predicates left once `allow` has cancelled its entries
    pub fn active_exclusions(&self) -> PredicateSet {
        let exclude = self.exclude_if.unwrap_or_default();
        match &self.allow {
            Some(allow) => exclude.without(allow),
            None => exclude,
        }
    }
}

/// A scalar field declaration: name, optional type tag and constraints
///
/// ```rust
/// use attribeauty::params::{Field, Predicate};
///
/// let field = Field::new("address")
///     .kind("string")
///     .exclude_if([Predicate::Nil, Predicate::Empty])
///     .allow(Predicate::Nil);
/// assert_eq!(field.tag(), Some("string"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: Option<String>,
    constraints: Constraints,
}

impl Field {
    /// An untyped field: its value passes through uncast
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            constraints: Constraints::default(),
        }
    }

    /// Shorthand for `Field::new(name).kind(tag)`
    pub fn typed(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::new(name).kind(tag)
    }

    pub fn kind(mut self, tag: impl Into<String>) -> Self {
        self.kind = Some(tag.into());
        self
    }

    pub fn constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.constraints = self.constraints.required(required);
        self
    }

    pub fn with_default(mut self, value: impl Into<ParamValue>) -> Self {
        self.constraints = self.constraints.with_default(value);
        self
    }

    pub fn allow(mut self, predicates: impl Into<PredicateSet>) -> Self {
        self.constraints = self.constraints.allow(predicates);
        self
    }

    pub fn exclude_if(mut self, predicates: impl Into<PredicateSet>) -> Self {
        self.constraints = self.constraints.exclude_if(predicates);
        self
    }

    pub fn allow_nil(mut self, allowed: bool) -> Self {
        self.constraints = self.constraints.allow_nil(allowed);
        self
    }

    pub fn allow_empty(mut self, allowed: bool) -> Self {
        self.constraints = self.constraints.allow_empty(allowed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn get_constraints(&self) -> &Constraints {
        &self.constraints
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::new(name)
    }
}
