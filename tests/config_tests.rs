//! Integration tests for configuration and column schemas loaded from disk
//!
//! Each test writes its YAML into a fresh temporary directory via
//! `tempfile::TempDir`.

use attribeauty::prelude::*;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_yaml(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write yaml fixture");
    path
}

const USERS_YAML: &str = r#"
table: users
columns:
  - name: email
    type: CITEXT
    nullable: false
  - name: age
    type: integer
  - name: joined_at
    type: timestamp(6)
  - name: settings
    type: jsonb
"#;

// =============================================================================
// Configuration files
// =============================================================================

mod config_file_tests {
    use super::*;

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(
            &dir,
            "attribeauty.yaml",
            "strict: true\ncolumn_types:\n  citext: string\n",
        );

        let config = Configuration::from_yaml_file(path.to_str().unwrap()).unwrap();

        assert!(config.strict);
        assert_eq!(config.column_tag("CITEXT"), Some("string"));
        assert_eq!(config.column_tag("bigint"), Some("integer"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(ConfigFile::from_yaml_file(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(&dir, "broken.yaml", "strict: [not, a, bool]\n");

        assert!(Configuration::from_yaml_file(path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_file_mapping_to_custom_tag_needs_registration() {
        let dir = TempDir::new().unwrap();
        let path = write_yaml(&dir, "custom.yaml", "column_types:\n  money: cents\n");

        let mut config = Configuration::from_yaml_file(path.to_str().unwrap()).unwrap();
        let err = config.validate().expect_err("cents is not registered yet");
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        config.types.register("cents", |value: &ParamValue| -> Result<_, CastError> {
            match value.as_f64() {
                Some(amount) => Ok(ParamValue::Integer((amount * 100.0).round() as i64)),
                None => Err(CastError::invalid(value, "cents", "expected a number")),
            }
        });
        assert!(config.validate().is_ok());
    }
}

// =============================================================================
// Table schemas
// =============================================================================

mod table_schema_tests {
    use super::*;

    #[test]
    fn test_filter_with_schema_from_file() {
        let dir = TempDir::new().unwrap();
        let schema_path = write_yaml(&dir, "users.yaml", USERS_YAML);
        let config_path = write_yaml(&dir, "config.yaml", "column_types:\n  citext: string\n");

        let schema = TableSchema::from_yaml_file(schema_path.to_str().unwrap()).unwrap();
        let config = Configuration::from_yaml_file(config_path.to_str().unwrap()).unwrap();

        let result = schema
            .filter(
                &config,
                json!({
                    "email": "a@b.c",
                    "age": "41",
                    "joined_at": 0,
                    "settings": { "theme": "dark" },
                    "is_admin": true
                }),
            )
            .unwrap();

        assert_eq!(
            result.to_json(),
            json!({
                "email": "a@b.c",
                "age": 41,
                "joined_at": "1970-01-01T00:00:00Z",
                "settings": { "theme": "dark" }
            })
        );
    }

    #[test]
    fn test_non_nullable_column_drops_null() {
        let schema = TableSchema::from_yaml_str(USERS_YAML).unwrap();
        let config = Configuration::default();

        let result = schema
            .filter(&config, json!({ "email": null, "age": null }))
            .unwrap();

        assert!(result.is_empty());
        assert!(result.is_valid());
    }

    #[test]
    fn test_schema_declares_alongside_nested_fields() {
        let schema = TableSchema::from_yaml_str(USERS_YAML).unwrap();
        let config = Configuration::default();

        let result = config
            .params(json!({ "age": 3, "tags": [{ "label": "x" }] }))
            .accept(|p| {
                schema.declare(p, &config)?;
                p.nested("tags", |tag| tag.attribute(Field::typed("label", "string")))
            })
            .unwrap();

        assert_eq!(result.to_json(), json!({ "age": 3, "tags": [{ "label": "x" }] }));
    }

    #[test]
    fn test_strict_config_applies_to_schema_filter() {
        let schema = TableSchema::new(
            "accounts",
            vec![ColumnDescriptor::new("balance", "numeric(10, 2)", true)],
        );
        let config = Configuration::new().configure(|config| config.strict = true);

        let result = schema.filter(&config, json!({ "balance": "12.50" })).unwrap();
        assert_eq!(result["balance"], ParamValue::Float(12.5));
    }
}
