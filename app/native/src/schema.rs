//! JSON Schema for the configuration file.

use crate::config::SalahConfig;

/// Identifier published in the schema's `$id`.
pub const SCHEMA_ID: &str =
    "https://raw.githubusercontent.com/salah-wallpaper/salah/main/salah.schema.json";

/// Generates a JSON Schema for the Salah configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(SalahConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!(SCHEMA_ID));
    }

    schema
}

/// Generates the schema as pretty-printed JSON.
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}
