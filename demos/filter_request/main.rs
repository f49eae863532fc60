//! Request Filtering Example
//!
//! This example demonstrates:
//! - Declaring a nested schema with required and excluded fields
//! - Filtering an array of mappings
//! - Registering a custom type tag
//! - Soft errors versus strict mode
//!
//! Run with `RUST_LOG=attribeauty=debug` to see each declaration.

use anyhow::Result;
use attribeauty::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn user_schema(p: &mut Params<'_>) -> Result<(), FilterError> {
    p.attribute(Field::typed("username", "string").required(true))?;
    p.attribute(Field::typed("age", "integer"))?;
    p.attribute(Field::typed("plan", "tier").with_default("free"))?;
    p.nested("emails", |email| {
        email.attribute(Field::typed("address", "string").required(true).allow_empty(false))?;
        email.attribute(Field::typed("primary", "boolean").allow_nil(false))
    })?;
    p.nested("profile", |profile| {
        profile.attribute(Field::typed("born_at", "time"))?;
        profile.attribute(Field::typed("bio", "string").exclude_if(Predicate::Empty))
    })
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 attribeauty request filtering");
    println!("=================================\n");

    let config = Configuration::new().configure(|config| {
        config.types.register("tier", |value: &ParamValue| {
            match value.as_str().map(str::to_lowercase).as_deref() {
                Some(tier @ ("free" | "pro" | "team")) => Ok(ParamValue::from(tier)),
                _ => Err(CastError::invalid(value, "tier", "expected free, pro or team")),
            }
        });
    });

    let request = json!({
        "username": 42,
        "age": "0x1F",
        "is_admin": true,
        "emails": [
            { "address": "me@example.com", "primary": "yes" },
            { "address": "" },
            { "primary": "off" }
        ],
        "profile": { "born_at": "1990-04-01", "bio": "" }
    });

    println!("📥 Request:\n{}\n", serde_json::to_string_pretty(&request)?);

    let result = config.params(request.clone()).accept(user_schema)?;
    println!("📤 Filtered:\n{}\n", serde_json::to_string_pretty(&result)?);
    println!("⚠️  Errors: {:?}\n", result.errors());

    let strict = config.params(request).strict(true).accept(user_schema);
    match strict {
        Ok(_) => println!("✅ Strict run passed"),
        Err(e) => println!("❌ Strict run failed [{}]: {}", e.error_code(), e),
    }

    let bad = config
        .params(json!({ "username": "ann", "plan": "enterprise" }))
        .accept(user_schema);
    if let Err(e) = bad {
        println!("❌ Cast failure [{}]: {}", e.error_code(), e);
    }

    Ok(())
}
