use super::types::{Config, is_rule_name};
use crate::rule::Rule;

/// A problem found in a configuration file that does not prevent linting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationWarning {
    pub message: String,
    pub rule: Option<String>,
    pub key: Option<String>,
}

/// Keys of a rule section that every rule accepts
const COMMON_RULE_KEYS: &[&str] = &["severity"];

/// Wiki-section properties read by the rule helpers
const KNOWN_WIKI_PROPERTIES: &[&str] = &["references_templates"];

/// Validate rule sections, rule names in `[global]` and wiki properties.
/// Unknown names are warned about, with "did you mean" suggestions, but never rejected.
pub fn validate_config(config: &Config, rules: &[Box<dyn Rule>]) -> Vec<ConfigValidationWarning> {
    let mut warnings = Vec::new();
    let rule_names: Vec<String> = rules.iter().map(|r| r.name().to_string()).collect();

    for (section, rule_config) in &config.rules {
        let Some(rule) = rules.iter().find(|r| r.name() == section.as_str()) else {
            let message = if !is_rule_name(section) {
                format!("Unknown configuration section [{section}]")
            } else if let Some(suggestion) = suggest_similar_key(section, &rule_names) {
                format!("Unknown rule in config: {section} (did you mean: {suggestion}?)")
            } else {
                format!("Unknown rule in config: {section}")
            };
            warnings.push(ConfigValidationWarning {
                message,
                rule: Some(section.clone()),
                key: None,
            });
            continue;
        };

        let valid_keys: Vec<String> = rule
            .parameters()
            .keys()
            .map(|k| k.to_string())
            .chain(COMMON_RULE_KEYS.iter().map(|k| k.to_string()))
            .collect();
        for key in rule_config.values.keys() {
            let normalized = key.replace('-', "_");
            if valid_keys.iter().any(|valid| *valid == normalized) {
                continue;
            }
            let message = if let Some(suggestion) = suggest_similar_key(key, &valid_keys) {
                format!("Unknown option for rule {section}: {key} (did you mean: {suggestion}?)")
            } else {
                format!("Unknown option for rule {section}: {key}")
            };
            warnings.push(ConfigValidationWarning {
                message,
                rule: Some(section.clone()),
                key: Some(key.clone()),
            });
        }
    }

    for (list_name, names) in [("enable", &config.global.enable), ("disable", &config.global.disable)] {
        warnings.extend(validate_rule_names(names, &rule_names, &format!("global.{list_name}")));
    }

    let wiki_keys: Vec<String> = KNOWN_WIKI_PROPERTIES.iter().map(|k| k.to_string()).collect();
    for key in config.wiki.properties.keys() {
        if wiki_keys.iter().any(|valid| *valid == key.replace('-', "_")) {
            continue;
        }
        let message = if let Some(suggestion) = suggest_similar_key(key, &wiki_keys) {
            format!("Unknown wiki property: {key} (did you mean: {suggestion}?)")
        } else {
            format!("Unknown wiki property: {key}")
        };
        warnings.push(ConfigValidationWarning {
            message,
            rule: None,
            key: Some(key.clone()),
        });
    }

    warnings
}

/// Validate rule names coming from a list (`[global]` arrays or CLI flags)
pub fn validate_rule_names(names: &[String], rule_names: &[String], origin: &str) -> Vec<ConfigValidationWarning> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("all"))
        .filter(|name| !rule_names.iter().any(|known| known.eq_ignore_ascii_case(name)))
        .map(|name| {
            let message = match suggest_similar_key(name, rule_names) {
                Some(suggestion) => format!("Unknown rule in {origin}: {name} (did you mean: {suggestion}?)"),
                None => format!("Unknown rule in {origin}: {name}"),
            };
            ConfigValidationWarning {
                message,
                rule: Some(name.to_string()),
                key: None,
            }
        })
        .collect()
}

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        for j in 1..=len2 {
            let cost = usize::from(s1_chars[i - 1] != s2_chars[j - 1]);
            curr_row[j] = (prev_row[j] + 1).min(curr_row[j - 1] + 1).min(prev_row[j - 1] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Closest key within 2 edits (or 30% of the key length), case-insensitive
pub fn suggest_similar_key(unknown: &str, valid_keys: &[String]) -> Option<String> {
    let unknown_lower = unknown.to_lowercase();
    let max_distance = 2.max(unknown.chars().count() / 3);

    let mut best_match: Option<(String, usize)> = None;
    for valid in valid_keys {
        let distance = levenshtein_distance(&unknown_lower, &valid.to_lowercase());
        if distance > max_distance {
            continue;
        }
        match &best_match {
            Some((_, best)) if distance >= *best => {}
            _ => best_match = Some((valid.clone(), distance)),
        }
    }

    best_match.map(|(key, _)| key)
}
