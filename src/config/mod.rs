//! Configuration loading and management
//!
//! A [`Configuration`] owns the type registry used for casting, the default
//! strictness of new filter runs and the mapping from database column types to
//! type tags used by [`TableSchema`](crate::schema::TableSchema). The plain
//! settings can be loaded from YAML; custom casters are registered in code.
//!
//! ```yaml
//! strict: true
//! column_types:
//!   citext: string
//!   money: float
//! ```

use crate::core::error::Result as AttribeautyResult;
use crate::core::{AttribeautyError, ParamValue};
use crate::params::Params;
use crate::types::{self, TypeRegistry};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings that can be read from a YAML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Whether runs created by the configuration are strict
    #[serde(default)]
    pub strict: bool,

    /// Extra or overriding column type -> type tag entries
    #[serde(default)]
    pub column_types: HashMap<String, String>,
}

impl ConfigFile {
    /// Load settings from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Registry used for every cast made through this configuration
    pub types: TypeRegistry,

    /// Default strictness of [`Configuration::params`]
    pub strict: bool,

    /// Column type (lowercase, without size suffix) -> type tag
    pub column_types: HashMap<String, String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            types: TypeRegistry::default(),
            strict: false,
            column_types: default_column_types(),
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjust the configuration in place
    ///
    /// ```rust
    /// use attribeauty::config::Configuration;
    /// use attribeauty::core::{CastError, ParamValue};
    ///
    /// let config = Configuration::new().configure(|config| {
    ///     config.types.register("koala", |value: &ParamValue| -> Result<_, CastError> {
    ///         Ok(ParamValue::String(format!("{}_koalas", value.as_str().unwrap_or_default())))
    ///     });
    /// });
    /// assert!(config.types.contains("koala"));
    /// ```
    pub fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Build a configuration from YAML settings over the defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply(ConfigFile::from_yaml_str(yaml)?);
        Ok(config)
    }

    /// Build a configuration from a YAML file over the defaults
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply(ConfigFile::from_yaml_file(path)?);
        Ok(config)
    }

    /// Merge file settings; file entries win over existing column types
    pub fn apply(&mut self, file: ConfigFile) {
        self.strict = file.strict;
        for (column_type, tag) in file.column_types {
            self.column_types.insert(normalize_column_type(&column_type), tag);
        }
    }

    /// Start a filter run using this configuration's registry and strictness
    pub fn params(&self, input: impl Into<ParamValue>) -> Params<'_> {
        Params::with_registry(input, &self.types).strict(self.strict)
    }

    /// Type tag for a database column type, `None` when unmapped
    pub fn column_tag(&self, column_type: &str) -> Option<&str> {
        self.column_types
            .get(&normalize_column_type(column_type))
            .map(String::as_str)
    }

    /// Check that every mapped column type points at a registered tag
    pub fn validate(&self) -> AttribeautyResult<()> {
        let mut unknown: Vec<&str> = self
            .column_types
            .values()
            .map(String::as_str)
            .filter(|tag| !self.types.contains(tag))
            .collect();

        if unknown.is_empty() {
            return Ok(());
        }

        unknown.sort_unstable();
        unknown.dedup();
        Err(AttribeautyError::Config {
            message: format!(
                "column types map to unregistered tags: {}",
                unknown.join(", ")
            ),
        })
    }
}

/// Lowercase a column type and strip any size or precision suffix
///
/// `VARCHAR(255)` becomes `varchar`, `numeric(10, 2)` becomes `numeric`.
pub fn normalize_column_type(column_type: &str) -> String {
    column_type
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn default_column_types() -> HashMap<String, String> {
    let entries = [
        ("string", types::STRING),
        ("text", types::STRING),
        ("varchar", types::STRING),
        ("character varying", types::STRING),
        ("char", types::STRING),
        ("uuid", types::STRING),
        ("integer", types::INTEGER),
        ("int", types::INTEGER),
        ("smallint", types::INTEGER),
        ("bigint", types::INTEGER),
        ("serial", types::INTEGER),
        ("float", types::FLOAT),
        ("double precision", types::FLOAT),
        ("real", types::FLOAT),
        ("decimal", types::FLOAT),
        ("numeric", types::FLOAT),
        ("boolean", types::BOOLEAN),
        ("bool", types::BOOLEAN),
        ("datetime", types::TIME),
        ("timestamp", types::TIME),
        ("timestamptz", types::TIME),
        ("date", types::TIME),
    ];

    entries
        .into_iter()
        .map(|(column_type, tag)| (column_type.to_string(), tag.to_string()))
        .collect()
}
