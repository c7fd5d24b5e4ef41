use serde::Serialize;
use serde_json::{json, Value};

use super::Schema;

/// One row of a database listing: the upstream page id, a derived display
/// title and the raw properties payload.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub id: String,
    pub title: String,
    pub properties: Value,
}

impl Row {
    pub fn from_page(schema: &Schema, page: &Value) -> Self {
        let id = page
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let properties = page.get("properties").cloned().unwrap_or_else(|| json!({}));
        let title = derive_title(schema, &properties);
        Self { id, title, properties }
    }
}

/// Display title for a row: the concatenated text runs of the schema's
/// title-typed property. Total - a row without that property, or with an
/// empty run list, yields the empty string.
pub fn derive_title(schema: &Schema, properties: &Value) -> String {
    let Some(name) = schema.title_property() else {
        return String::new();
    };
    properties
        .get(name)
        .and_then(|prop| prop.get("title"))
        .map(plain_text)
        .unwrap_or_default()
}

fn plain_text(runs: &Value) -> String {
    let Some(items) = runs.as_array() else {
        return String::new();
    };
    items
        .iter()
        .filter_map(|run| {
            run.get("plain_text")
                .and_then(Value::as_str)
                .or_else(|| run.get("text").and_then(|t| t.get("content")).and_then(Value::as_str))
        })
        .collect()
}
