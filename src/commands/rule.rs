//! Handler for the `rule` command.

use colored::*;

use wikilint_lib::config::Config;
use wikilint_lib::exit_codes::exit;
use wikilint_lib::rule::Rule;

fn print_rule_details(rule: &dyn Rule) {
    println!("{} - {}", rule.name().bold(), rule.description());
    println!("  Category: {:?}", rule.category());
    println!("  Default severity: {}", rule.default_severity());
    let parameters = rule.parameters();
    if !parameters.is_empty() {
        println!("  Parameters:");
        for (name, description) in parameters {
            println!("    {}: {}", name.cyan(), description);
        }
    }
}

/// List every rule, or show the details of one rule
pub fn handle_rule(name: Option<String>) {
    let config = Config::default();
    match name {
        Some(name) => match wikilint_lib::rules::create_rule_by_name(&name, &config) {
            Some(rule) => print_rule_details(rule.as_ref()),
            None => {
                eprintln!("{}: Rule '{}' not found", "Error".red().bold(), name);
                exit::tool_error();
            }
        },
        None => {
            println!("Available rules:");
            for rule in wikilint_lib::rules::all_rules(&config) {
                println!("  {} - {}", rule.name(), rule.description());
            }
        }
    }
}
