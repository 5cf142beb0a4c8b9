//! `search_items` built-in operation.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::catalog::Item;
use crate::domains::operations::descriptor::{JsonObject, OperationDescriptor};
use crate::domains::operations::error::OperationError;
use crate::domains::operations::state::ServerState;

/// Parameters for the search items operation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchItemsParams {
    /// Text to search for, matched case-insensitively as a substring.
    pub query: String,

    /// Fields to search. Defaults to name and description; `id` and
    /// `metadata` are also recognized.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// Case-insensitive substring search across selected item fields.
pub struct SearchItemsOperation;

impl SearchItemsOperation {
    /// Operation name as advertised to clients.
    pub const NAME: &'static str = "search_items";

    /// Operation description shown to clients.
    pub const DESCRIPTION: &'static str = "Search catalog items by case-insensitive substring match across the given fields (default: name, description).";

    /// Fields searched when the caller names none.
    const DEFAULT_FIELDS: [&'static str; 2] = ["name", "description"];

    /// Execute the operation logic.
    #[instrument(skip_all, fields(query = %params.query))]
    pub fn execute(
        params: &SearchItemsParams,
        state: &ServerState,
    ) -> Result<Value, OperationError> {
        let collection = state.store().load()?;
        let needle = params.query.to_lowercase();

        let fields: Vec<&str> = match params.fields.as_deref() {
            Some(fields) => fields.iter().map(String::as_str).collect(),
            None => Self::DEFAULT_FIELDS.to_vec(),
        };

        let results: Vec<Item> = collection
            .items
            .into_iter()
            .filter(|item| {
                fields.iter().any(|field| {
                    item.field_text(field)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            })
            .collect();

        let count = results.len();
        info!("Search for '{}' matched {} items", params.query, count);
        Ok(json!({ "results": results, "count": count }))
    }

    /// Create the registrable descriptor for this operation.
    pub fn descriptor(state: Arc<ServerState>) -> OperationDescriptor {
        OperationDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<SearchItemsParams>(),
            move |args: JsonObject| {
                let state = Arc::clone(&state);
                async move {
                    let params: SearchItemsParams = serde_json::from_value(Value::Object(args))
                        .map_err(|e| OperationError::invalid_arguments(e.to_string()))?;
                    Self::execute(&params, &state)
                }
                .boxed()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use tempfile::TempDir;

    fn test_state() -> (TempDir, Arc<ServerState>) {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_path = dir.path().join("items.json");
        (dir, Arc::new(ServerState::new(Arc::new(config))))
    }

    fn seed(state: &ServerState) {
        for (name, description) in [
            ("Foo Fighter", "a band"),
            ("Widget", "contains foo inside"),
            ("Gadget", "nothing relevant"),
        ] {
            state
                .store()
                .add(Item::new(name, description, None))
                .unwrap();
        }
    }

    fn search(state: &ServerState, query: &str, fields: Option<Vec<String>>) -> Value {
        let params = SearchItemsParams {
            query: query.to_string(),
            fields,
        };
        SearchItemsOperation::execute(&params, state).unwrap()
    }

    #[test]
    fn test_search_empty_catalog() {
        let (_dir, state) = test_state();
        let value = search(&state, "foo", None);
        assert_eq!(value["count"], json!(0));
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let (_dir, state) = test_state();
        seed(&state);

        let value = search(&state, "FOO", None);
        assert_eq!(value["count"], json!(2));
    }

    #[test]
    fn test_search_excludes_non_matches() {
        let (_dir, state) = test_state();
        seed(&state);

        let value = search(&state, "zzz", None);
        assert_eq!(value["count"], json!(0));
    }

    #[test]
    fn test_search_restricted_to_named_fields() {
        let (_dir, state) = test_state();
        seed(&state);

        let value = search(&state, "foo", Some(vec!["name".to_string()]));
        assert_eq!(value["count"], json!(1));
        assert_eq!(value["results"][0]["name"], json!("Foo Fighter"));
    }

    #[test]
    fn test_search_metadata_field() {
        let (_dir, state) = test_state();
        state
            .store()
            .add(Item::new(
                "Plain",
                "no hints here",
                Some(json!({"tag": "special"})),
            ))
            .unwrap();

        let value = search(&state, "special", Some(vec!["metadata".to_string()]));
        assert_eq!(value["count"], json!(1));
    }

    #[test]
    fn test_unknown_fields_match_nothing() {
        let (_dir, state) = test_state();
        seed(&state);

        let value = search(&state, "foo", Some(vec!["color".to_string()]));
        assert_eq!(value["count"], json!(0));
    }

    #[tokio::test]
    async fn test_descriptor_requires_query() {
        let (_dir, state) = test_state();
        let descriptor = SearchItemsOperation::descriptor(state);

        let error = descriptor.invoke(JsonObject::new()).await.unwrap_err();
        assert!(matches!(error, OperationError::InvalidArguments(_)));
    }
}
