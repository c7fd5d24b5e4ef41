use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

/// Database aliases and the environment variables their identifiers come
/// from. The alias set is fixed at startup; an unknown alias is a client
/// error, never a retryable condition.
pub const ALIAS_VARS: &[(&str, &str)] = &[
    ("fwk", "FWK_DB_ID"),
    ("agent", "AGENT_DB_ID"),
    ("module", "MODULE_DB_ID"),
    ("logs", "LOGS_DB_ID"),
];

/// Alias of the canonical reference base used by the sync endpoint.
pub const REFERENCE_ALIAS: &str = "fwk";

const DEFAULT_UPSTREAM_BASE: &str = "https://api.notion.com";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PORT: u16 = 3000;

/// Immutable process configuration, built once at startup and passed to each
/// component at construction time. Nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Upstream access token. Absent means remote operations are disabled,
    /// but the process still serves requests.
    pub upstream_token: Option<String>,
    /// Static shared secret for token-gated routes. Absent means enforcement
    /// is off (development mode).
    pub shared_secret: Option<String>,
    /// Fixed alias -> database identifier map.
    pub aliases: BTreeMap<String, String>,
    /// Snapshot of the known `*_DB_ID` variables keyed by variable name, for
    /// the compare endpoint's `ref` parameter.
    pub ref_ids: BTreeMap<String, String>,
    pub upstream_base: String,
    pub upstream_timeout: Duration,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. `from_env` delegates here;
    /// tests inject a closure over a fixed map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut aliases = BTreeMap::new();
        let mut ref_ids = BTreeMap::new();
        for (alias, var) in ALIAS_VARS {
            if let Some(id) = get(var) {
                aliases.insert((*alias).to_string(), id.clone());
                ref_ids.insert((*var).to_string(), id);
            }
        }

        let upstream_base = get("NOTION_API_BASE")
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE.to_string());

        let upstream_timeout = get("UPSTREAM_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS));

        let port = get("ARCHITECTE_PORT")
            .or_else(|| get("PORT"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            upstream_token: get("NOTION_TOKEN"),
            shared_secret: get("ARCHITECTE_TOKEN"),
            aliases,
            ref_ids,
            upstream_base,
            upstream_timeout,
            port,
        }
    }
}

/// Redact a secret for status reporting: keep a short recognizable prefix,
/// never the full value.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        "••••".to_string()
    } else {
        format!("{}••••", chars[..4].iter().collect::<String>())
    }
}
