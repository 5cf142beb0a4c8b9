//! Declarative custom operation manifests.
//!
//! A custom operation is a `.json` file in the configured directory:
//!
//! ```json
//! {
//!   "name": "greet",
//!   "description": "Greet the caller",
//!   "input_schema": {
//!     "type": "object",
//!     "properties": { "who": { "type": "string" } }
//!   },
//!   "result": { "message": "Hello, {{who}}!" }
//! }
//! ```
//!
//! `result` is the operation's response template. `{{key}}` placeholders in
//! its strings are substituted from the call arguments at execution time;
//! placeholders without a matching argument are left as-is.

use std::sync::Arc;

use futures::FutureExt;
use serde::Deserialize;
use serde_json::Value;

use super::descriptor::{JsonObject, OperationDescriptor};
use super::error::OperationError;

/// Parsed shape of a custom operation file.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationManifest {
    /// Operation name, required and non-empty.
    pub name: String,

    /// Operation description.
    #[serde(default)]
    pub description: String,

    /// Declared argument shape, advertised verbatim.
    #[serde(default = "default_schema")]
    pub input_schema: JsonObject,

    /// Response template with `{{key}}` placeholders.
    pub result: Value,
}

fn default_schema() -> JsonObject {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema
}

impl OperationManifest {
    /// Parse a manifest from JSON text.
    ///
    /// Fails if the text is not valid JSON, if `name` or `result` is absent,
    /// or if `name` is empty.
    pub fn parse(contents: &str) -> Result<Self, OperationError> {
        let manifest: Self = serde_json::from_str(contents)
            .map_err(|e| OperationError::invalid_descriptor(e.to_string()))?;
        if manifest.name.trim().is_empty() {
            return Err(OperationError::invalid_descriptor(
                "manifest 'name' must not be empty",
            ));
        }
        Ok(manifest)
    }

    /// Convert into a registrable descriptor.
    pub fn into_descriptor(self) -> OperationDescriptor {
        let result = Arc::new(self.result);
        OperationDescriptor::new(
            self.name,
            self.description,
            self.input_schema,
            move |args: JsonObject| {
                let result = Arc::clone(&result);
                async move { Ok(render(&result, &args)) }.boxed()
            },
        )
    }
}

/// Substitute `{{key}}` placeholders in every string of `template`.
fn render(template: &Value, args: &JsonObject) -> Value {
    match template {
        Value::String(s) => Value::String(render_str(s, args)),
        Value::Array(items) => Value::Array(items.iter().map(|v| render(v, args)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), render(v, args)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn render_str(template: &str, args: &JsonObject) -> String {
    let mut result = template.to_string();
    for (key, value) in args {
        let placeholder = format!("{{{{{}}}}}", key);
        if !result.contains(&placeholder) {
            continue;
        }
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        result = result.replace(&placeholder, &rendered);
    }
    result
}
