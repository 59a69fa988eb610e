/// Rule WC003: Article with `<ref>` and no `<references />`
///
/// Citations only render when the page has a reference list: a complete
/// `<references>` tag, or a template configured as producing one.
use crate::lint_context::{LintContext, TagForm, TagKind};
use crate::rule::{Fix, LintResult, LintWarning, Rule, RuleCategory};
use std::collections::BTreeMap;

use super::ref_utils::REFERENCES_TEMPLATES;

/// Rule-level key listing templates that produce a reference list
const TEMPLATES: &str = "templates";

#[derive(Debug, Clone, Default)]
pub struct WC003MissingReferences;

impl WC003MissingReferences {
    /// `None` when the page is fine, otherwise the reports (empty unless `collect`)
    fn analyze(&self, ctx: &LintContext, collect: bool) -> Option<Vec<LintWarning>> {
        let has_useful_ref = ctx
            .tags(TagKind::Ref)
            .filter(|tag| tag.form != TagForm::Close)
            .any(|tag| ctx.surrounding_tag(TagKind::Nowiki, tag.begin).is_none());
        if !has_useful_ref {
            return None;
        }

        let references: Vec<_> = ctx.tags(TagKind::References).collect();
        if references.iter().any(|tag| tag.is_complete()) {
            return None;
        }

        let templates = self.references_templates(ctx);
        if ctx.find_template_named(&templates).is_some() {
            return None;
        }

        if !collect {
            return Some(Vec::new());
        }

        let single = references.len() == 1;
        let warnings = references
            .iter()
            .map(|tag| {
                let warning = LintWarning::new(self, ctx, tag.begin..tag.end);
                if single {
                    warning.with_fix(Fix::new(tag.begin..tag.end, tag.self_closing_form(), "Close tag"))
                } else {
                    warning
                }
            })
            .collect();
        Some(warnings)
    }

    /// Configured template names; the first key with a non-empty list wins
    fn references_templates(&self, ctx: &LintContext) -> Vec<String> {
        [TEMPLATES, REFERENCES_TEMPLATES]
            .iter()
            .map(|key| ctx.template_equivalences(self.name(), key))
            .find(|equivalences| !equivalences.is_empty())
            .map(|equivalences| equivalences.into_iter().map(|e| e.name).collect())
            .unwrap_or_default()
    }
}

impl Rule for WC003MissingReferences {
    fn name(&self) -> &'static str {
        "WC003"
    }

    fn description(&self) -> &'static str {
        "Article with <ref> and no <references />"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        Ok(self.analyze(ctx, true).unwrap_or_default())
    }

    fn detect(&self, ctx: &LintContext) -> bool {
        self.analyze(ctx, false).is_some()
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Reference
    }

    fn parameters(&self) -> BTreeMap<&'static str, &'static str> {
        let description = "A list of templates resulting in the inclusion of <references/>";
        BTreeMap::from([(TEMPLATES, description), (REFERENCES_TEMPLATES, description)])
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        ctx.tags(TagKind::Ref).next().is_none()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(WC003MissingReferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn check(content: &str, config: Option<&Config>) -> Vec<LintWarning> {
        let ctx = LintContext::new(content, config.map(|c| c as &dyn crate::config::ConfigLookup));
        WC003MissingReferences.check(&ctx).unwrap()
    }

    fn detect(content: &str, config: Option<&Config>) -> bool {
        let ctx = LintContext::new(content, config.map(|c| c as &dyn crate::config::ConfigLookup));
        WC003MissingReferences.detect(&ctx)
    }

    #[test]
    fn test_no_ref_no_defect() {
        assert!(!detect("Text <references> without refs", None));
        assert!(check("Text <references>", None).is_empty());
    }

    #[test]
    fn test_complete_references_no_defect() {
        assert!(!detect("a<ref>x</ref>\n<references />", None));
        assert!(!detect("a<ref>x</ref>\n<references>\n</references>", None));
    }

    #[test]
    fn test_refs_in_nowiki_are_not_useful() {
        assert!(!detect("<nowiki><ref>x</ref></nowiki>", None));
    }

    #[test]
    fn test_unmatched_ref_close_is_not_useful() {
        assert!(!detect("stray </ref> text", None));
    }

    #[test]
    fn test_single_open_references_gets_fix() {
        let content = "a<ref>x</ref>\n<references group=\"n\">";
        let warnings = check(content, None);
        assert_eq!(warnings.len(), 1);
        let warning = &warnings[0];
        assert_eq!(&content[warning.range.clone()], "<references group=\"n\">");
        assert_eq!(warning.message, "Article with <ref> and no <references />");
        assert_eq!(warning.fixes.len(), 1);
        assert_eq!(warning.fixes[0].replacement, "<references group=\"n\" />");
        assert_eq!(warning.fixes[0].description, "Close tag");
    }

    #[test]
    fn test_several_open_references_have_no_fix() {
        let warnings = check("a<ref>x</ref>\n<references>\n<references>", None);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.fixes.is_empty()));
    }

    #[test]
    fn test_missing_references_is_detected_without_location() {
        let content = "a<ref>x</ref> and nothing else";
        assert!(detect(content, None));
        assert!(check(content, None).is_empty());
    }

    #[test]
    fn test_configured_template_counts_as_references() {
        let config = Config::from_toml_str("[WC003]\ntemplates = [\"Reflist\", \"Références\"]\n", "t.toml").unwrap();
        assert!(!detect("a<ref>x</ref>\n{{reflist|2}}", Some(&config)));
        assert!(!detect("a<ref>x</ref>\n{{Template:Références}}", Some(&config)));
        assert!(detect("a<ref>x</ref>\n{{Notes}}", Some(&config)));
    }

    #[test]
    fn test_templates_key_wins_over_references_templates() {
        let config = Config::from_toml_str(
            "[WC003]\ntemplates = [\"Reflist\"]\nreferences_templates = [\"Notes\"]\n",
            "t.toml",
        )
        .unwrap();
        assert!(detect("a<ref>x</ref>\n{{Notes}}", Some(&config)));
    }

    #[test]
    fn test_empty_templates_falls_back_to_references_templates() {
        let config = Config::from_toml_str(
            "[WC003]\ntemplates = []\nreferences_templates = [\"Notes#group\"]\n",
            "t.toml",
        )
        .unwrap();
        assert!(!detect("a<ref>x</ref>\n{{Notes}}", Some(&config)));
    }

    #[test]
    fn test_without_config_templates_are_ignored() {
        assert!(detect("a<ref>x</ref>\n{{Reflist}}", None));
    }

    #[test]
    fn test_parameters_metadata() {
        let parameters = WC003MissingReferences.parameters();
        assert_eq!(parameters.len(), 2);
        assert!(parameters["templates"].contains("<references/>"));
    }
}
