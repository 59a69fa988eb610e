//! Title-equivalence for page and template names.
//!
//! Two names refer to the same page when they are equal after the wiki's
//! normalization: NFC, underscores as spaces, collapsed whitespace, optional
//! namespace prefix, and (on most wikis) a case-insensitive first letter.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Wiki-specific settings used when comparing titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRules {
    /// First letter of titles is case-insensitive ($wgCapitalLinks)
    pub capital_links: bool,
    /// Names (and aliases) of the template namespace, which may prefix a template name
    pub template_namespaces: Vec<String>,
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            capital_links: true,
            template_namespaces: vec!["Template".to_string()],
        }
    }
}

/// Normalize a template name into the form used for comparisons
pub fn normalize_template_name(name: &str, rules: &TitleRules) -> String {
    let normalized: String = name.nfc().map(|c| if c == '_' { ' ' } else { c }).collect();
    let mut title = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(stripped) = title.strip_prefix(':') {
        title = stripped.trim_start().to_string();
    }

    if let Some((prefix, rest)) = title.split_once(':') {
        let prefix = prefix.trim();
        let is_namespace = rules.template_namespaces.iter().any(|ns| {
            let ns = ns.replace('_', " ");
            ns.trim().to_lowercase() == prefix.to_lowercase()
        });
        if is_namespace {
            title = rest.trim().to_string();
        }
    }

    if rules.capital_links {
        title = uppercase_first(&title);
    }
    title
}

/// Check whether two template names designate the same template
pub fn are_same_title(first: &str, second: &str, rules: &TitleRules) -> bool {
    normalize_template_name(first, rules) == normalize_template_name(second, rules)
}

fn uppercase_first(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_letter_case_insensitive() {
        let rules = TitleRules::default();
        assert!(are_same_title("reflist", "Reflist", &rules));
        assert!(!are_same_title("ReFlist", "Reflist", &rules));
    }

    #[test]
    fn test_case_sensitive_wiki() {
        let rules = TitleRules {
            capital_links: false,
            ..TitleRules::default()
        };
        assert!(!are_same_title("reflist", "Reflist", &rules));
        assert!(are_same_title("reflist", "reflist", &rules));
    }

    #[test]
    fn test_underscores_and_whitespace() {
        let rules = TitleRules::default();
        assert!(are_same_title("Notes_and  references", "Notes and references", &rules));
        assert!(are_same_title("  Reflist\n", "Reflist", &rules));
    }

    #[test]
    fn test_namespace_prefix() {
        let rules = TitleRules {
            capital_links: true,
            template_namespaces: vec!["Template".to_string(), "Modèle".to_string()],
        };
        assert!(are_same_title("Template:Reflist", "Reflist", &rules));
        assert!(are_same_title("template : reflist", "Reflist", &rules));
        assert!(are_same_title("Modèle:Références", "Références", &rules));
        assert!(!are_same_title("Help:Reflist", "Reflist", &rules));
    }

    #[test]
    fn test_leading_colon() {
        let rules = TitleRules::default();
        assert_eq!(normalize_template_name(":main page", &rules), "Main page");
    }

    #[test]
    fn test_unicode_first_letter() {
        let rules = TitleRules::default();
        assert!(are_same_title("éléments", "Éléments", &rules));
    }

    #[test]
    fn test_nfc_normalization() {
        let rules = TitleRules::default();
        // "e" followed by a combining acute accent vs precomposed "é"
        assert!(are_same_title("Caf\u{0065}\u{0301}", "Caf\u{00e9}", &rules));
    }
}
