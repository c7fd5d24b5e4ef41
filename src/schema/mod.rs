pub mod diff;
pub mod row;

pub use diff::{diff, SchemaDiff};
pub use row::Row;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Type tag substituted when upstream property metadata carries no type.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Property schema of a single database: property name -> declared type tag.
///
/// Type tags are open-ended strings from the upstream service and pass
/// through unchanged. Keys are held in sorted order so that output is
/// reproducible regardless of the JSON object order upstream happens to
/// serialize; "natural order" elsewhere in this crate means this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema(BTreeMap<String, String>);

impl Schema {
    /// Build a schema from the upstream `properties` payload, a JSON object
    /// of `{name: {"type": tag, ...}}` entries. Entries without a type tag
    /// map to [`UNKNOWN_TYPE`] rather than failing.
    pub fn from_properties(properties: &Value) -> Self {
        let mut props = BTreeMap::new();
        if let Some(map) = properties.as_object() {
            for (name, meta) in map {
                let kind = meta.get("type").and_then(Value::as_str).unwrap_or(UNKNOWN_TYPE);
                props.insert(name.clone(), kind.to_string());
            }
        }
        Self(props)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the first property (in natural order) with the given type tag.
    pub fn first_of_kind(&self, kind: &str) -> Option<&str> {
        self.iter().find(|(_, k)| *k == kind).map(|(name, _)| name)
    }

    /// The distinguished title-bearing property, if the schema has one.
    pub fn title_property(&self) -> Option<&str> {
        self.first_of_kind("title")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
