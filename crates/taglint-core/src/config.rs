//! Configuration file loading for taglint.
//!
//! Reads `taglint.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tags::StabilityLevel;

pub const CONFIG_FILE: &str = "taglint.json";

/// Top-level taglint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaglintConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Comment tag prefixes the extractor recognizes (`k8s` matches `+k8s:...`).
    #[serde(default = "default_prefixes")]
    pub tag_prefixes: Vec<String>,
    #[serde(default)]
    pub rules: RulesConfig,
    /// Types the stability rule applies to. Empty disables the rule.
    #[serde(default)]
    pub stability_enforced_types: Vec<String>,
    /// Extra or replacement entries for the stability registry.
    #[serde(default)]
    pub stability_overrides: BTreeMap<String, StabilityLevel>,
}

/// Per-rule toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_true")]
    pub placement: bool,
    #[serde(default = "default_true")]
    pub stability: bool,
    #[serde(default = "default_true")]
    pub requiredness: bool,
}

fn default_true() -> bool {
    true
}
fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_prefixes() -> Vec<String> {
    vec!["k8s".to_string()]
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            placement: true,
            stability: true,
            requiredness: true,
        }
    }
}

impl Default for TaglintConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            tag_prefixes: default_prefixes(),
            rules: RulesConfig::default(),
            stability_enforced_types: vec![],
            stability_overrides: BTreeMap::new(),
        }
    }
}

impl TaglintConfig {
    /// Load configuration from `taglint.json` inside the given directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}
