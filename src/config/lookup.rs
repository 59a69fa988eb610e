use crate::utils::title::TitleRules;

use super::types::Config;

/// Section holding wiki-wide properties shared by several rules
pub const WIKI_SECTION: &str = "wiki";

/// A template whose presence is equivalent to some markup, and the parameters
/// that carry the equivalent of that markup's attributes.
///
/// Written in configuration as `Name#param1,param2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEquivalence {
    pub name: String,
    pub parameters: Vec<String>,
}

impl TemplateEquivalence {
    /// Parse a `Name#param1,param2` entry. Returns `None` when the name is empty.
    pub fn parse(entry: &str) -> Option<Self> {
        let (name, parameters) = match entry.split_once('#') {
            Some((name, parameters)) => (name, parameters),
            None => (entry, ""),
        };
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let parameters = parameters
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Some(Self {
            name: name.to_string(),
            parameters,
        })
    }
}

/// Key -> value resolution for one wiki.
///
/// A missing key and an empty list mean the same thing to every caller.
pub trait ConfigLookup: Send + Sync {
    /// List of strings configured for `key` in `section`
    fn get(&self, section: &str, key: &str) -> Option<Vec<String>>;

    /// Template equivalences configured for `key` in `section`
    fn get_template_equivalences(&self, section: &str, key: &str) -> Option<Vec<TemplateEquivalence>> {
        let entries = self.get(section, key)?;
        let equivalences = entries
            .iter()
            .filter_map(|entry| {
                let parsed = TemplateEquivalence::parse(entry);
                if parsed.is_none() {
                    log::warn!("Ignoring template equivalence without a name in [{section}] {key}: {entry:?}");
                }
                parsed
            })
            .collect();
        Some(equivalences)
    }

    fn title_rules(&self) -> TitleRules {
        TitleRules::default()
    }
}

/// Split a property written as one string into its list of values (one per line)
pub fn convert_property_to_string_list(property: &str) -> Vec<String> {
    property
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn value_to_string_list(value: &toml::Value) -> Option<Vec<String>> {
    match value {
        toml::Value::String(s) => Some(convert_property_to_string_list(s)),
        toml::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    toml::Value::String(s) => Some(s.trim().to_string()),
                    other => {
                        log::warn!("Ignoring non-string list entry {other}");
                        None
                    }
                })
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        other => {
            log::warn!("Expected a string or a list of strings, found {}", other.type_str());
            None
        }
    }
}

impl ConfigLookup for Config {
    fn get(&self, section: &str, key: &str) -> Option<Vec<String>> {
        let value = if section.eq_ignore_ascii_case(WIKI_SECTION) {
            self.get_wiki_value(key)
        } else {
            self.get_rule_value(section, key)
        }?;
        value_to_string_list(value)
    }

    fn title_rules(&self) -> TitleRules {
        self.wiki.title_rules()
    }
}
