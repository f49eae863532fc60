//! Column Schema Example
//!
//! This example demonstrates:
//! - Loading column metadata for a table from YAML
//! - Mapping database column types to type tags through configuration
//! - Filtering a request against the synthesized declarations

use anyhow::Result;
use attribeauty::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
strict: false
column_types:
  citext: string
  money: float
"#;

const ORDERS: &str = r#"
table: orders
columns:
  - name: id
    type: bigint
    nullable: false
  - name: customer_email
    type: CITEXT
    nullable: false
  - name: total
    type: money
  - name: placed_at
    type: timestamp(6)
  - name: paid
    type: boolean
  - name: metadata
    type: jsonb
"#;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 attribeauty column schemas");
    println!("==============================\n");

    let config = Configuration::from_yaml_str(CONFIG)?;
    config.validate()?;

    let schema = TableSchema::from_yaml_str(ORDERS)?;
    println!("✅ Loaded table '{}' with {} columns", schema.table, schema.columns.len());
    for column in &schema.columns {
        println!(
            "   - {} ({}) -> {}",
            column.name,
            column.column_type,
            config.column_tag(&column.column_type).unwrap_or("uncast")
        );
    }
    println!();

    let request = json!({
        "id": "1001",
        "customer_email": "buyer@example.com",
        "total": "19.99",
        "placed_at": 1_700_000_000_000_i64,
        "paid": "f",
        "metadata": { "source": "web" },
        "discount": 100
    });

    let result = schema.filter(&config, request)?;
    println!("📤 Filtered:\n{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
