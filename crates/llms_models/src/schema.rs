//! JSON Schema derivation for structured output.
//!
//! Schemas are produced by [`schemars`] from the output type's
//! [`JsonSchema`] implementation; this module only renders them in the forms
//! the generation helpers and adapters consume.

use schemars::{JsonSchema, schema_for};
use serde_json::Value;

/// Error deriving a JSON schema for an output type.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The derived schema could not be rendered as JSON.
    #[error("failed to serialize schema: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Returns the JSON schema of `T` as a [`Value`].
///
/// # Errors
///
/// Returns [`SchemaError::Serialization`] if the schema cannot be converted.
pub fn json_schema_value<T: JsonSchema>() -> Result<Value, SchemaError> {
    Ok(serde_json::to_value(schema_for!(T))?)
}

/// Returns the JSON schema of `T` rendered as compact JSON text.
///
/// This is the text appended to the conversation by
/// [`generate_structured_content`](crate::llm::generate_structured_content).
///
/// # Errors
///
/// Returns [`SchemaError::Serialization`] if the schema cannot be rendered.
pub fn generate_json_schema<T: JsonSchema>() -> Result<String, SchemaError> {
    let schema = json_schema_value::<T>()?;
    let text = serde_json::to_string(&schema)?;
    tracing::debug!(
        output_type = %T::schema_name(),
        schema_len = text.len(),
        "Derived JSON schema for structured output"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[expect(dead_code, reason = "only the schema of this type is used")]
    struct Forecast {
        city: String,
        high_celsius: i32,
        summary: Option<String>,
    }

    #[test]
    fn schema_lists_fields_and_required() {
        let schema = json_schema_value::<Forecast>().unwrap();

        assert_eq!(schema["type"], "object");
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("city"));
        assert!(properties.contains_key("high_celsius"));
        assert!(properties.contains_key("summary"));

        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(required.contains(&"city"));
        assert!(required.contains(&"high_celsius"));
        assert!(!required.contains(&"summary"));
    }

    #[test]
    fn schema_text_is_compact_json() {
        let text = generate_json_schema::<Forecast>().unwrap();
        assert!(!text.contains('\n'));

        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, json_schema_value::<Forecast>().unwrap());
    }
}
