pub mod ref_utils;

mod wc003_references_missing;
mod wc046_unbalanced_link_brackets;
mod wc063_small_in_ref;

pub use wc003_references_missing::WC003MissingReferences;
pub use wc046_unbalanced_link_brackets::WC046UnbalancedLinkBrackets;
pub use wc063_small_in_ref::WC063SmallInRef;

use crate::config::GlobalConfig;
use crate::rule::Rule;
use std::collections::HashSet;

/// Type alias for rule constructor functions
type RuleCtor = fn(&crate::config::Config) -> Box<dyn Rule>;

/// Entry in the rule registry, with metadata about the rule
struct RuleEntry {
    name: &'static str,
    ctor: RuleCtor,
    /// Whether this rule requires explicit opt-in via enable
    opt_in: bool,
}

/// Registry of all available rules with their constructor functions.
///
/// Rules marked `opt_in: true` are excluded from the default rule set and must
/// be listed in `enable` (or `enable = ["ALL"]`).
const RULES: &[RuleEntry] = &[
    RuleEntry {
        name: "WC003",
        ctor: WC003MissingReferences::from_config,
        opt_in: false,
    },
    RuleEntry {
        name: "WC046",
        ctor: WC046UnbalancedLinkBrackets::from_config,
        opt_in: false,
    },
    RuleEntry {
        name: "WC063",
        ctor: WC063SmallInRef::from_config,
        opt_in: false,
    },
];

/// Returns all rule instances (including opt-in) for config validation and CLI
pub fn all_rules(config: &crate::config::Config) -> Vec<Box<dyn Rule>> {
    RULES.iter().map(|entry| (entry.ctor)(config)).collect()
}

/// Names of every registered rule
pub fn rule_names() -> Vec<String> {
    RULES.iter().map(|entry| entry.name.to_string()).collect()
}

/// Returns the set of rule names that require explicit opt-in
pub fn opt_in_rules() -> HashSet<&'static str> {
    RULES
        .iter()
        .filter(|entry| entry.opt_in)
        .map(|entry| entry.name)
        .collect()
}

/// Creates a single rule by name (case-insensitive) with the given config.
///
/// Returns None if the rule name is not found.
pub fn create_rule_by_name(name: &str, config: &crate::config::Config) -> Option<Box<dyn Rule>> {
    RULES
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
        .map(|entry| (entry.ctor)(config))
}

/// Check whether the list contains the "all" keyword (case-insensitive).
fn contains_all_keyword(list: &[String]) -> bool {
    list.iter().any(|s| s.eq_ignore_ascii_case("all"))
}

fn name_set(list: &[String]) -> HashSet<String> {
    list.iter().map(|s| s.trim().to_ascii_uppercase()).collect()
}

/// Keep the rules selected by `enable` / `disable`.
///
/// An empty `enable` selects every non-opt-in rule; `disable` always wins.
pub fn filter_rules(rules: &[Box<dyn Rule>], global_config: &GlobalConfig) -> Vec<Box<dyn Rule>> {
    if contains_all_keyword(&global_config.disable) && global_config.enable.is_empty() {
        return Vec::new();
    }

    let disabled = name_set(&global_config.disable);
    let enabled = name_set(&global_config.enable);
    let enable_all = contains_all_keyword(&global_config.enable);
    let opt_in = opt_in_rules();

    rules
        .iter()
        .filter(|rule| {
            let selected = if enable_all {
                true
            } else if enabled.is_empty() {
                !opt_in.contains(rule.name())
            } else {
                enabled.contains(rule.name())
            };
            selected && !disabled.contains(rule.name())
        })
        .map(|rule| dyn_clone::clone_box(&**rule))
        .collect()
}
