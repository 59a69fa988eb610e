use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::title::TitleRules;

/// File names searched for, in order, when no explicit config path is given
pub const CONFIG_FILE_NAMES: &[&str] = &[".wikilint.toml", "wikilint.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("Failed to parse config file {path}: {source}")]
    Toml { path: String, source: toml::de::Error },
}

/// Represents a rule-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleConfig {
    /// Severity override for this rule (error, warning, or info)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<crate::rule::Severity>,

    /// Configuration values for the rule
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
}

/// Rule selection and output settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Enabled rules; empty means every rule
    #[serde(default)]
    pub enable: Vec<String>,

    /// Disabled rules
    #[serde(default)]
    pub disable: Vec<String>,

    /// Output format for results ("text" or "json")
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "output_format")]
    pub output_format: Option<String>,
}

/// Settings of the wiki the documents come from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WikiConfig {
    /// First letter of titles is case-insensitive
    #[serde(default = "default_capital_links", rename = "capital-links", alias = "capital_links")]
    pub capital_links: bool,

    /// Names of the template namespace (canonical name and aliases)
    #[serde(
        default = "default_template_namespaces",
        rename = "template-namespaces",
        alias = "template_namespaces"
    )]
    pub template_namespaces: Vec<String>,

    /// Wiki-wide properties shared by several rules (e.g. references_templates)
    #[serde(flatten)]
    pub properties: BTreeMap<String, toml::Value>,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            capital_links: default_capital_links(),
            template_namespaces: default_template_namespaces(),
            properties: BTreeMap::new(),
        }
    }
}

fn default_capital_links() -> bool {
    true
}

fn default_template_namespaces() -> Vec<String> {
    vec!["Template".to_string()]
}

impl WikiConfig {
    pub fn title_rules(&self) -> TitleRules {
        TitleRules {
            capital_links: self.capital_links,
            template_namespaces: self.template_namespaces.clone(),
        }
    }
}

/// Represents the complete configuration loaded from .wikilint.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub wiki: WikiConfig,

    /// Rule-specific configurations, keyed by rule name (e.g. WC003)
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,
}

/// Normalize a config key: rule names are uppercased, other keys keep their spelling
pub fn normalize_key(key: &str) -> String {
    if is_rule_name(key) {
        key.to_ascii_uppercase()
    } else {
        key.to_string()
    }
}

/// Rule names are "WC" followed by digits, case-insensitive
pub(crate) fn is_rule_name(name: &str) -> bool {
    match (name.get(..2), name.get(2..)) {
        (Some(prefix), Some(digits)) => {
            prefix.eq_ignore_ascii_case("wc") && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_string(),
            source,
        })?;
        config.rules = std::mem::take(&mut config.rules)
            .into_iter()
            .map(|(name, rule_config)| (normalize_key(&name), rule_config))
            .collect();
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&content, &display)?;
        log::debug!("Loaded configuration from {display}");
        Ok(config)
    }

    /// Find a config file in `dir` or its ancestors
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        dir.ancestors().find_map(|ancestor| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| ancestor.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Load the config discovered from `dir`, or the defaults when there is none
    pub fn load_with_discovery(dir: &Path) -> Result<Self, ConfigError> {
        match Self::discover(dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config file found from {}; using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    /// Get the severity override for a specific rule, if configured
    pub fn get_rule_severity(&self, rule_name: &str) -> Option<crate::rule::Severity> {
        self.rules.get(rule_name).and_then(|r| r.severity)
    }

    /// Raw value for `key` in the section of `rule_name`, trying kebab-case and snake_case spellings
    pub fn get_rule_value(&self, rule_name: &str, key: &str) -> Option<&toml::Value> {
        let rule_config = self.rules.get(&rule_name.to_ascii_uppercase())?;
        lookup_key_variants(&rule_config.values, key)
    }

    /// Raw value for `key` in the wiki section
    pub fn get_wiki_value(&self, key: &str) -> Option<&toml::Value> {
        lookup_key_variants(&self.wiki.properties, key)
    }
}

fn lookup_key_variants<'a>(values: &'a BTreeMap<String, toml::Value>, key: &str) -> Option<&'a toml::Value> {
    [key.to_string(), key.replace('-', "_"), key.replace('_', "-")]
        .iter()
        .find_map(|variant| values.get(variant))
}
