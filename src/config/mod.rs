//! Configuration: the `.wikilint.toml` file, the per-wiki lookup rules read it
//! through, and validation of unknown rules and keys.

mod lookup;
mod types;
mod validation;


pub use lookup::{ConfigLookup, TemplateEquivalence, WIKI_SECTION, convert_property_to_string_list};
pub use types::{CONFIG_FILE_NAMES, Config, ConfigError, GlobalConfig, RuleConfig, WikiConfig, normalize_key};
pub use validation::{ConfigValidationWarning, suggest_similar_key, validate_config, validate_rule_names};
