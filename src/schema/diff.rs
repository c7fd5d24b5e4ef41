use serde::Serialize;

use super::Schema;

/// Three-way comparison of two database schemas, immutable once computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    /// Properties present in the reference but absent from the current
    /// schema, in reference key order.
    pub missing: Vec<String>,
    /// Properties present in the current schema but absent from the
    /// reference, in current key order.
    pub extra: Vec<String>,
    /// Properties present in both with differing type tags, in reference
    /// key order.
    pub type_mismatch: Vec<String>,
}

/// Compare `current` against `reference`. Deterministic and O(n) in schema
/// size; empty inputs produce empty diffs.
pub fn diff(reference: &Schema, current: &Schema) -> SchemaDiff {
    let missing = reference
        .iter()
        .filter(|(name, _)| !current.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();

    let extra = current
        .iter()
        .filter(|(name, _)| !reference.contains(name))
        .map(|(name, _)| name.to_string())
        .collect();

    let type_mismatch = reference
        .iter()
        .filter(|(name, kind)| current.get(name).is_some_and(|k| k != *kind))
        .map(|(name, _)| name.to_string())
        .collect();

    SchemaDiff { missing, extra, type_mismatch }
}
