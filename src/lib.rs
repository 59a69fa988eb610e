pub mod config;
pub mod exit_codes;
pub mod lint_context;
pub mod output;
pub mod rule;
pub mod rules;
pub mod utils;

pub use rules::*;

pub use crate::lint_context::{ElementIndex, LintContext};
use crate::config::ConfigLookup;
use crate::rule::{LintError, LintResult, LintWarning, Rule};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Lint a document with the given rules and configuration.
///
/// Builds one [`LintContext`] and runs every rule against it. Reports come back
/// ordered by position.
pub fn lint(content: &str, rules: &[Box<dyn Rule>], config: Option<&crate::config::Config>) -> LintResult {
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let lookup = config.map(|c| c as &dyn ConfigLookup);
    let ctx = LintContext::new(content, lookup);
    lint_context(&ctx, rules, config)
}

/// Run `rules` against an already built context
pub fn lint_context(ctx: &LintContext, rules: &[Box<dyn Rule>], config: Option<&crate::config::Config>) -> LintResult {
    #[cfg(feature = "parallel")]
    let per_rule: Vec<LintResult> = rules.par_iter().map(|rule| run_rule(ctx, rule.as_ref(), config)).collect();
    #[cfg(not(feature = "parallel"))]
    let per_rule: Vec<LintResult> = rules.iter().map(|rule| run_rule(ctx, rule.as_ref(), config)).collect();

    let mut warnings = Vec::new();
    for result in per_rule {
        warnings.extend(result?);
    }
    warnings.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| a.rule_name.cmp(&b.rule_name))
    });
    Ok(warnings)
}

fn run_rule(ctx: &LintContext, rule: &dyn Rule, config: Option<&crate::config::Config>) -> LintResult {
    if rule.should_skip(ctx) {
        return Ok(Vec::new());
    }

    let mut warnings = rule.check(ctx).inspect_err(|e| {
        log::error!("Error checking rule {}: {}", rule.name(), e);
    })?;

    // A defect without a location is reported against the whole document
    if warnings.is_empty() && rule.detect(ctx) {
        log::debug!("Rule {} found a defect without a location", rule.name());
        warnings.push(LintWarning::new(rule, ctx, 0..0));
    }

    for range in warnings
        .iter()
        .flat_map(|warning| std::iter::once(&warning.range).chain(warning.fixes.iter().map(|fix| &fix.range)))
    {
        if !is_valid_range(ctx.content, range) {
            return Err(LintError::InvalidRange {
                rule: rule.name().to_string(),
                start: range.start,
                end: range.end,
            });
        }
    }

    if let Some(severity) = config.and_then(|cfg| cfg.get_rule_severity(rule.name())) {
        for warning in &mut warnings {
            warning.severity = severity;
        }
    }
    Ok(warnings)
}

fn is_valid_range(content: &str, range: &std::ops::Range<usize>) -> bool {
    range.start <= range.end && content.is_char_boundary(range.start) && content.is_char_boundary(range.end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::lint_context::LintContext;
    use crate::rule::{Fix, Severity};

    /// Reports a fix that cuts the first character of the document in half
    #[derive(Clone)]
    struct SplitCharRule;

    impl Rule for SplitCharRule {
        fn name(&self) -> &'static str {
            "WC900"
        }

        fn description(&self) -> &'static str {
            "Splits a character"
        }

        fn check(&self, ctx: &LintContext) -> LintResult {
            Ok(vec![LintWarning::new(self, ctx, 0..0).with_fix(Fix::new(0..1, "x", "Replace"))])
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn from_config(_config: &Config) -> Box<dyn Rule> {
            Box::new(SplitCharRule)
        }
    }

    #[test]
    fn test_lint_empty_content() {
        let rules = rules::all_rules(&Config::default());
        assert!(lint("", &rules, None).unwrap().is_empty());
    }

    #[test]
    fn test_lint_orders_reports_by_position() {
        let content = "a]] <ref><small>x</small></ref>\n<references>";
        let rules = rules::all_rules(&Config::default());
        let warnings = lint(content, &rules, None).unwrap();
        let names: Vec<_> = warnings.iter().filter_map(|w| w.rule_name.as_deref()).collect();
        assert_eq!(names, vec!["WC046", "WC063", "WC003"]);
    }

    #[test]
    fn test_document_level_report_for_missing_references() {
        let rules = rules::all_rules(&Config::default());
        let warnings = lint("Text<ref>x</ref>", &rules, None).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule_name.as_deref(), Some("WC003"));
        assert_eq!(warnings[0].range, 0..0);
        assert_eq!((warnings[0].line, warnings[0].column), (1, 1));
    }

    #[test]
    fn test_severity_override() {
        let config = Config::from_toml_str("[WC046]\nseverity = \"info\"\n", "t.toml").unwrap();
        let rules = rules::all_rules(&config);
        let warnings = lint("a]]", &rules, Some(&config)).unwrap();
        assert_eq!(warnings[0].severity, Severity::Info);
    }

    #[test]
    fn test_invalid_fix_range_is_an_error() {
        let rules: Vec<Box<dyn Rule>> = vec![Box::new(SplitCharRule)];
        let err = lint("é", &rules, None).unwrap_err();
        assert_eq!(
            err,
            LintError::InvalidRange {
                rule: "WC900".to_string(),
                start: 0,
                end: 1
            }
        );
        assert!(lint("e", &rules, None).is_ok());
    }
}
