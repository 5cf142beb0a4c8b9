//! `list_items` built-in operation.

use std::sync::Arc;

use futures::FutureExt;
use regex::RegexBuilder;
use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::domains::catalog::Item;
use crate::domains::operations::descriptor::{JsonObject, OperationDescriptor};
use crate::domains::operations::error::OperationError;
use crate::domains::operations::state::ServerState;

/// Parameters for the list items operation.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListItemsParams {
    /// Case-insensitive filter matched against item name and description.
    /// Interpreted as a regular expression when valid, as a substring
    /// otherwise.
    #[serde(default)]
    pub filter: Option<String>,

    /// Maximum number of items to return.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Lists catalog items, optionally filtered and truncated.
pub struct ListItemsOperation;

impl ListItemsOperation {
    /// Operation name as advertised to clients.
    pub const NAME: &'static str = "list_items";

    /// Operation description shown to clients.
    pub const DESCRIPTION: &'static str = "List catalog items. Supports an optional case-insensitive filter against name and description, and a result limit.";

    /// Execute the operation logic.
    #[instrument(skip_all)]
    pub fn execute(params: &ListItemsParams, state: &ServerState) -> Result<Value, OperationError> {
        let collection = state.store().load()?;

        let mut items: Vec<Item> = match params.filter.as_deref() {
            Some(filter) if !filter.is_empty() => {
                let matcher = FilterMatcher::new(filter);
                collection
                    .items
                    .into_iter()
                    .filter(|item| {
                        matcher.matches(&item.name) || matcher.matches(&item.description)
                    })
                    .collect()
            }
            _ => collection.items,
        };

        if let Some(limit) = params.limit {
            items.truncate(limit);
        }

        let count = items.len();
        info!("Listing {} items", count);
        Ok(json!({ "items": items, "count": count }))
    }

    /// Create the registrable descriptor for this operation.
    pub fn descriptor(state: Arc<ServerState>) -> OperationDescriptor {
        OperationDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<ListItemsParams>(),
            move |args: JsonObject| {
                let state = Arc::clone(&state);
                async move {
                    let params: ListItemsParams = serde_json::from_value(Value::Object(args))
                        .map_err(|e| OperationError::invalid_arguments(e.to_string()))?;
                    Self::execute(&params, &state)
                }
                .boxed()
            },
        )
    }
}

/// Filter matcher: compiled case-insensitive regex with substring fallback
/// when the filter is not a valid pattern.
enum FilterMatcher {
    Regex(regex::Regex),
    Substring(String),
}

impl FilterMatcher {
    fn new(filter: &str) -> Self {
        match RegexBuilder::new(filter).case_insensitive(true).build() {
            Ok(re) => Self::Regex(re),
            Err(_) => Self::Substring(filter.to_lowercase()),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(text),
            Self::Substring(needle) => text.to_lowercase().contains(needle),
        }
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

    fn seed(state: &ServerState, names: &[(&str, &str)]) {
        for (name, description) in names {
            state
                .store()
                .add(Item::new(*name, *description, None))
                .unwrap();
        }
    }

    #[test]
    fn test_list_empty_catalog() {
        let (_dir, state) = test_state();
        let params = ListItemsParams {
            filter: None,
            limit: None,
        };
        let value = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(value["count"], json!(0));
        assert_eq!(value["items"], json!([]));
    }

    #[test]
    fn test_list_counts_all_items() {
        let (_dir, state) = test_state();
        seed(&state, &[("Alpha", "first"), ("Beta", "second")]);

        let params = ListItemsParams {
            filter: None,
            limit: None,
        };
        let value = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(value["count"], json!(2));
    }

    #[test]
    fn test_filter_matches_name_and_description_case_insensitive() {
        let (_dir, state) = test_state();
        seed(
            &state,
            &[
                ("Gadget", "a SHINY thing"),
                ("Widget", "dull"),
                ("shiny-box", "container"),
            ],
        );

        let params = ListItemsParams {
            filter: Some("shiny".to_string()),
            limit: None,
        };
        let value = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(value["count"], json!(2));
    }

    #[test]
    fn test_filter_accepts_regex() {
        let (_dir, state) = test_state();
        seed(&state, &[("item-1", "one"), ("item-2", "two"), ("other", "x")]);

        let params = ListItemsParams {
            filter: Some("^item-[0-9]$".to_string()),
            limit: None,
        };
        let value = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(value["count"], json!(2));
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let (_dir, state) = test_state();
        seed(&state, &[("odd[name", "bracketed"), ("plain", "simple")]);

        let params = ListItemsParams {
            filter: Some("odd[".to_string()),
            limit: None,
        };
        let value = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(value["count"], json!(1));
    }

    #[test]
    fn test_limit_truncates() {
        let (_dir, state) = test_state();
        seed(&state, &[("A", "1"), ("B", "2"), ("C", "3")]);

        let params = ListItemsParams {
            filter: None,
            limit: Some(2),
        };
        let value = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(value["count"], json!(2));
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_list_is_idempotent() {
        let (_dir, state) = test_state();
        seed(&state, &[("Alpha", "first")]);

        let params = ListItemsParams {
            filter: None,
            limit: None,
        };
        let first = ListItemsOperation::execute(&params, &state).unwrap();
        let second = ListItemsOperation::execute(&params, &state).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_descriptor_rejects_bad_arguments() {
        let (_dir, state) = test_state();
        let descriptor = ListItemsOperation::descriptor(state);

        let mut args = JsonObject::new();
        args.insert("limit".to_string(), json!("not a number"));
        let error = descriptor.invoke(args).await.unwrap_err();
        assert!(matches!(error, OperationError::InvalidArguments(_)));
    }
}
