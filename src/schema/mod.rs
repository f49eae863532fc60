//! Schemas synthesized from database column metadata
//!
//! A [`TableSchema`] lists column descriptors `{name, type, nullable}`. Each
//! column becomes one scalar declaration, typed through the configured
//! column-type map; non-nullable columns drop null values from the output.
//!
//! ```yaml
//! table: users
//! columns:
//!   - name: email
//!     type: varchar(255)
//!     nullable: false
//!   - name: age
//!     type: integer
//! ```

use crate::config::Configuration;
use crate::core::{FilterError, ParamValue};
use crate::params::{Field, FilterResult, Params, Predicate};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One column of an external model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,

    /// Database type name, e.g. `varchar(255)` or `timestamp`
    #[serde(rename = "type")]
    pub column_type: String,

    #[serde(default = "nullable_by_default")]
    pub nullable: bool,
}

fn nullable_by_default() -> bool {
    true
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            nullable,
        }
    }

    /// The declaration this column stands for
    ///
    /// Columns whose type is not mapped pass through uncast.
    pub fn to_field(&self, config: &Configuration) -> Field {
        let mut field = Field::new(&self.name);
        match config.column_tag(&self.column_type) {
            Some(tag) => field = field.kind(tag),
            None => tracing::debug!(
                column = %self.name,
                column_type = %self.column_type,
                "unmapped column type, value passes through uncast"
            ),
        }
        if !self.nullable {
            field = field.exclude_if(Predicate::Nil);
        }
        field
    }
}

/// Column metadata of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    pub fn new(table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// Load a table schema from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let schema: Self = serde_yaml::from_str(&content)?;
        Ok(schema)
    }

    /// Load a table schema from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let schema: Self = serde_yaml::from_str(yaml)?;
        Ok(schema)
    }

    /// One declaration per column, in column order
    pub fn fields(&self, config: &Configuration) -> Vec<Field> {
        self.columns
            .iter()
            .map(|column| column.to_field(config))
            .collect()
    }

    /// Declare every column on `params`
    pub fn declare(
        &self,
        params: &mut Params<'_>,
        config: &Configuration,
    ) -> Result<(), FilterError> {
        for field in self.fields(config) {
            params.attribute(field)?;
        }
        Ok(())
    }

    /// Filter `input` against the columns using `config`
    pub fn filter(
        &self,
        config: &Configuration,
        input: impl Into<ParamValue>,
    ) -> Result<FilterResult, FilterError> {
        tracing::debug!(
            table = %self.table,
            columns = self.columns.len(),
            "filtering by table schema"
        );
        config.params(input).accept(|p| self.declare(p, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> TableSchema {
        TableSchema::new(
            "users",
            vec![
                ColumnDescriptor::new("email", "varchar(255)", false),
                ColumnDescriptor::new("age", "integer", true),
                ColumnDescriptor::new("settings", "jsonb", true),
            ],
        )
    }

    #[test]
    fn test_columns_become_fields() {
        let config = Configuration::default();
        let fields = users().fields(&config);

        assert_eq!(fields[0].tag(), Some("string"));
        assert_eq!(
            fields[0].get_constraints().exclude_if,
            Some(Predicate::Nil.into())
        );
        assert_eq!(fields[1].tag(), Some("integer"));
        assert_eq!(fields[1].get_constraints().exclude_if, None);
        assert_eq!(fields[2].tag(), None);
    }

    #[test]
    fn test_filter_casts_and_drops_undeclared() {
        let config = Configuration::default();
        let result = users()
            .filter(
                &config,
                json!({ "email": "a@b.c", "age": "41", "settings": { "x": 1 }, "admin": true }),
            )
            .unwrap();

        assert_eq!(
            result.to_json(),
            json!({ "email": "a@b.c", "age": 41, "settings": { "x": 1 } })
        );
    }

    #[test]
    fn test_yaml_columns_default_to_nullable() {
        let schema = TableSchema::from_yaml_str(
            r#"
table: users
columns:
  - name: email
    type: varchar(255)
    nullable: false
  - name: age
    type: integer
"#,
        )
        .unwrap();

        assert_eq!(schema.columns.len(), 2);
        assert!(!schema.columns[0].nullable);
        assert!(schema.columns[1].nullable);
    }
}
