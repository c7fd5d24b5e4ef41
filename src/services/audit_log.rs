use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::schema::Schema;
use crate::upstream::Upstream;

/// Optional severity column of the logs base.
const LEVEL_PROPERTY: &str = "Type";
/// Optional structured-context column of the logs base.
const CONTEXT_PROPERTY: &str = "Meta";

/// Severity of an audit-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lenient parse; anything unrecognized reads as `Info`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort writer of audit entries into the logs base.
///
/// The logs schema is discovered per write so the payload adapts to
/// deployments with differing column layouts: only columns that actually
/// exist are populated. Failures are logged and swallowed - log writes are
/// telemetry, never part of the caller's success contract.
pub struct AuditLog {
    upstream: Arc<dyn Upstream>,
    database_id: String,
}

impl AuditLog {
    pub fn new(upstream: Arc<dyn Upstream>, database_id: String) -> Self {
        Self { upstream, database_id }
    }

    pub async fn write(
        &self,
        message: &str,
        level: LogLevel,
        context: Option<&Value>,
    ) -> Option<String> {
        match self.try_write(message, level, context).await {
            Ok(page_id) => {
                tracing::info!(%level, page_id = %page_id, "audit log entry recorded");
                Some(page_id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "audit log write failed, ignoring");
                None
            }
        }
    }

    async fn try_write(
        &self,
        message: &str,
        level: LogLevel,
        context: Option<&Value>,
    ) -> Result<String> {
        let schema = self.upstream.get_schema(&self.database_id).await?;
        let timestamp = Utc::now().to_rfc3339();
        let properties = build_log_properties(&schema, message, level, context, &timestamp)?;

        let page_id =
            self.upstream.create_page(&self.database_id, Value::Object(properties)).await?;
        Ok(page_id)
    }
}

/// Assemble the write payload against a discovered logs schema. Columns
/// absent from the schema are omitted entirely, never sent as null.
fn build_log_properties(
    schema: &Schema,
    message: &str,
    level: LogLevel,
    context: Option<&Value>,
    timestamp: &str,
) -> Result<Map<String, Value>> {
    let Some(title) = schema.title_property() else {
        bail!("logs base has no title property");
    };

    let mut properties = Map::new();
    properties.insert(
        title.to_string(),
        json!({ "title": [{ "text": { "content": message } }] }),
    );

    if schema.get(LEVEL_PROPERTY) == Some("select") {
        properties.insert(
            LEVEL_PROPERTY.to_string(),
            json!({ "select": { "name": level.as_str() } }),
        );
    }

    if let Some(ctx) = context {
        if schema.get(CONTEXT_PROPERTY) == Some("rich_text") {
            properties.insert(
                CONTEXT_PROPERTY.to_string(),
                json!({ "rich_text": [{ "text": { "content": ctx.to_string() } }] }),
            );
        }
    }

    if let Some(date_property) = schema.first_of_kind("date") {
        properties.insert(date_property.to_string(), json!({ "date": { "start": timestamp } }));
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_schema() -> Schema {
        [
            ("Description du changement", "title"),
            ("Date du changement", "date"),
            ("Type", "select"),
            ("Meta", "rich_text"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn level_parse_is_lenient() {
        assert_eq!(LogLevel::parse("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("WARNING"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("error"), LogLevel::Error);
        assert_eq!(LogLevel::parse("info"), LogLevel::Info);
        assert_eq!(LogLevel::parse("whatever"), LogLevel::Info);
    }

    #[test]
    fn populates_every_discovered_column() {
        let props = build_log_properties(
            &full_schema(),
            "deploy finished",
            LogLevel::Warn,
            Some(&json!({"run": 7})),
            "2026-08-06T00:00:00+00:00",
        )
        .unwrap();

        assert_eq!(
            props["Description du changement"]["title"][0]["text"]["content"],
            "deploy finished"
        );
        assert_eq!(props["Type"]["select"]["name"], "warn");
        assert_eq!(props["Meta"]["rich_text"][0]["text"]["content"], "{\"run\":7}");
        assert_eq!(
            props["Date du changement"]["date"]["start"],
            "2026-08-06T00:00:00+00:00"
        );
    }

    #[test]
    fn columns_missing_from_schema_are_omitted() {
        let schema: Schema = [("Description du changement", "title")].into_iter().collect();
        let props = build_log_properties(
            &schema,
            "bare write",
            LogLevel::Info,
            Some(&json!({"ignored": true})),
            "2026-08-06T00:00:00+00:00",
        )
        .unwrap();

        assert_eq!(props.len(), 1);
        assert!(!props.contains_key("Meta"));
        assert!(!props.contains_key("Type"));
    }

    #[test]
    fn absent_context_omits_the_meta_column() {
        let props = build_log_properties(
            &full_schema(),
            "no context",
            LogLevel::Info,
            None,
            "2026-08-06T00:00:00+00:00",
        )
        .unwrap();
        assert!(!props.contains_key("Meta"));
    }

    #[test]
    fn schema_without_title_is_an_error() {
        let schema: Schema = [("Status", "select")].into_iter().collect();
        assert!(build_log_properties(&schema, "m", LogLevel::Info, None, "t").is_err());
    }
}
