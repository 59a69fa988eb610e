/// Rule WC063: HTML text style element `<small>` in ref, sub or sup
///
/// References, subscripts and superscripts are already rendered in a smaller font.
use crate::lint_context::{LintContext, TagForm, TagKind};
use crate::rule::{LintResult, LintWarning, Rule, RuleCategory};

/// Tags whose content is already rendered small
const SMALL_CONTAINERS: [TagKind; 3] = [TagKind::Ref, TagKind::Sub, TagKind::Sup];

#[derive(Debug, Clone, Default)]
pub struct WC063SmallInRef;

impl Rule for WC063SmallInRef {
    fn name(&self) -> &'static str {
        "WC063"
    }

    fn description(&self) -> &'static str {
        "HTML text style element <small> in ref, sub or sup"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let warnings = ctx
            .tags(TagKind::Small)
            .filter(|tag| tag.form != TagForm::Close)
            .filter(|tag| {
                SMALL_CONTAINERS
                    .iter()
                    .any(|&kind| ctx.surrounding_tag(kind, tag.begin).is_some())
            })
            .map(|tag| LintWarning::new(self, ctx, tag.begin..tag.end))
            .collect();
        Ok(warnings)
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        ctx.tags(TagKind::Small).next().is_none()
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(WC063SmallInRef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<LintWarning> {
        let ctx = LintContext::new(content, None);
        WC063SmallInRef.check(&ctx).unwrap()
    }

    #[test]
    fn test_small_at_top_level_is_fine() {
        assert!(check("<small>fine print</small>").is_empty());
    }

    #[test]
    fn test_small_inside_ref() {
        let content = "a<ref>see <small>p. 3</small></ref>";
        let warnings = check(content);
        assert_eq!(warnings.len(), 1);
        assert_eq!(&content[warnings[0].range.clone()], "<small>p. 3</small>");
        assert!(warnings[0].fixes.is_empty());
        assert_eq!(warnings[0].message, "HTML text style element <small> in ref, sub or sup");
    }

    #[test]
    fn test_small_inside_sub_and_sup() {
        assert_eq!(check("x<sub><small>2</small></sub>").len(), 1);
        assert_eq!(check("x<sup>a<small>2</small></sup>").len(), 1);
    }

    #[test]
    fn test_small_wrapping_ref_is_fine() {
        assert!(check("<small>a<ref>x</ref></small>").is_empty());
    }

    #[test]
    fn test_unclosed_small_inside_ref() {
        assert_eq!(check("<ref>a <small>b</ref>").len(), 1);
    }

    #[test]
    fn test_stray_closing_small_is_ignored() {
        assert!(check("<ref>a </small></ref>").is_empty());
    }

    #[test]
    fn test_each_small_is_reported() {
        assert_eq!(check("<ref><small>a</small> <small>b</small></ref>").len(), 2);
    }
}
