//! Bundled symbol configuration
//!
//! Four JSON documents describe the notation. Loading is lenient by design:
//! a missing or unreadable file falls back to documented defaults, and rows
//! that fail to deserialize are dropped with a warning. Only a file that
//! exists but is not valid JSON is treated as an error, since that points
//! at a broken bundle rather than an optional document.

use crate::error::{SymbolError, SymbolResult};
use psaltica_theory::{DEFAULT_PHTHONGS, ModeProfile};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Degree order and per-mode height tables.
pub const MODE_RULES_FILE: &str = "mode_rules.json";
/// The core recognition rule set.
pub const CORE_RULES_FILE: &str = "core_symbol_rules.json";
/// Symbol id -> human-readable name.
pub const DISPLAY_NAMES_FILE: &str = "display_names.json";
/// The larger fallback template catalog.
pub const CATALOG_FILE: &str = "symbol_catalog.json";

/// How a symbol participates in a glyph group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolRole {
    /// Carries the melodic step and base duration.
    Base,
    /// Adjusts rhythm or ornamentation of the group's base.
    Modifier,
}

/// One core recognition rule: a template plus its musical meaning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSymbolRule {
    pub id: String,
    pub role: SymbolRole,
    #[serde(alias = "templateDrawable")]
    pub template: String,
    #[serde(default)]
    pub base_token: Option<String>,
    #[serde(default)]
    pub delta_steps: i32,
    #[serde(default)]
    pub default_duration_beats: Option<f32>,
    #[serde(default)]
    pub duration_delta_beats: f32,
    #[serde(default)]
    pub set_duration_beats: Option<f32>,
    #[serde(default)]
    pub redistribute_from_previous_beats: f32,
}

/// One fallback catalog entry: a composition token and its template.
///
/// Catalog rows are extracted field by field rather than derived, because
/// real bundles may carry both the `key` and `token` spellings in one row.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSymbol {
    pub token: String,
    pub template: String,
}

/// The full loaded configuration.
#[derive(Debug, Clone)]
pub struct SymbolConfig {
    /// Ordered degree cycle for melodic traversal.
    pub phthongs_order: Vec<String>,
    /// Mode id -> height profile.
    pub mode_profiles: HashMap<String, ModeProfile>,
    /// Core rules, in declaration order (match ties resolve to the earlier rule).
    pub core_rules: Vec<CoreSymbolRule>,
    /// Symbol id -> display name.
    pub display_names: HashMap<String, String>,
    /// Fallback catalog, in declaration order.
    pub catalog: Vec<CatalogSymbol>,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        SymbolConfig {
            phthongs_order: DEFAULT_PHTHONGS.iter().map(|p| p.to_string()).collect(),
            mode_profiles: HashMap::new(),
            core_rules: Vec::new(),
            display_names: HashMap::new(),
            catalog: Vec::new(),
        }
    }
}

impl SymbolConfig {
    /// Load all four documents from `dir`.
    pub fn load(dir: &Path) -> SymbolResult<SymbolConfig> {
        let mut config = SymbolConfig::default();

        if let Some(doc) = read_document(&dir.join(MODE_RULES_FILE))? {
            // A present-but-empty phthongsOrder is honored verbatim; only a
            // missing key falls back to the default cycle.
            if let Some(order) = doc.get("phthongsOrder").and_then(Value::as_array) {
                config.phthongs_order = order
                    .iter()
                    .filter_map(Value::as_str)
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| p.to_string())
                    .collect();
            }
            if let Some(modes) = doc.get("modes").and_then(Value::as_array) {
                for row in modes {
                    match serde_json::from_value::<ModeProfile>(row.clone()) {
                        Ok(profile) if !profile.id.trim().is_empty() => {
                            config.mode_profiles.insert(profile.id.clone(), profile);
                        }
                        Ok(_) => {}
                        Err(error) => warn!(%error, "skipping malformed mode profile"),
                    }
                }
            }
        }

        if let Some(doc) = read_document(&dir.join(CORE_RULES_FILE))? {
            if let Some(symbols) = doc.get("symbols").and_then(Value::as_array) {
                for row in symbols {
                    match serde_json::from_value::<CoreSymbolRule>(row.clone()) {
                        Ok(rule) if !rule.id.trim().is_empty() && !rule.template.trim().is_empty() => {
                            config.core_rules.push(rule);
                        }
                        Ok(rule) => warn!(id = %rule.id, "skipping core rule without id or template"),
                        Err(error) => warn!(%error, "skipping malformed core rule"),
                    }
                }
            }
        }

        if let Some(doc) = read_document(&dir.join(DISPLAY_NAMES_FILE))? {
            if let Some(names) = doc.get("symbolNames").and_then(Value::as_object) {
                for (id, name) in names {
                    if let Some(name) = name.as_str().filter(|n| !n.trim().is_empty()) {
                        config.display_names.insert(id.clone(), name.to_string());
                    }
                }
            }
        }

        if let Some(doc) = read_document(&dir.join(CATALOG_FILE))? {
            if let Some(entries) = doc.as_array() {
                for row in entries {
                    // "key" wins over "token" when both are present; a blank
                    // "key" falls through to "token".
                    let token = ["key", "token"]
                        .iter()
                        .filter_map(|name| row.get(name).and_then(Value::as_str))
                        .find(|t| !t.trim().is_empty());
                    let template = ["templateAssetPath", "template"]
                        .iter()
                        .filter_map(|name| row.get(name).and_then(Value::as_str))
                        .find(|t| !t.trim().is_empty());
                    match (token, template) {
                        (Some(token), Some(template)) => config.catalog.push(CatalogSymbol {
                            token: token.to_string(),
                            template: template.to_string(),
                        }),
                        _ => warn!("skipping incomplete catalog entry"),
                    }
                }
            }
        }

        Ok(config)
    }
}

/// Read and parse one document. A file that cannot be read yields `None`
/// (the caller's defaults stand); invalid JSON is an error.
fn read_document(path: &Path) -> SymbolResult<Option<Value>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            warn!(path = %path.display(), %error, "configuration file unavailable, using defaults");
            return Ok(None);
        }
    };
    let value = serde_json::from_str(&text).map_err(|source| SymbolError::MalformedConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}
