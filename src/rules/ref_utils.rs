//! Helpers shared by the rules that deal with `<ref>` and `<references>`.

use crate::config::WIKI_SECTION;
use crate::lint_context::{LintContext, Tag, TagKind};

/// Wiki property listing templates that act as `<references>`, as `Name#group_param,...`
pub const REFERENCES_TEMPLATES: &str = "references_templates";

/// Group a `<ref>` tag belongs to.
///
/// Resolved, in order, from the tag's own `group` parameter, from the surrounding
/// `<references>` tag, then from a surrounding template configured as equivalent to
/// `<references>`. `None` stands for the default group.
pub fn reference_group(ctx: &LintContext, tag: &Tag) -> Option<String> {
    if let Some(group) = tag.parameter("group") {
        return format_group_name(&group.value);
    }

    if let Some(references) = ctx.surrounding_tag(TagKind::References, tag.begin) {
        return references
            .parameter("group")
            .and_then(|group| format_group_name(&group.value));
    }

    let equivalences = ctx.template_equivalences(WIKI_SECTION, REFERENCES_TEMPLATES);
    if equivalences.is_empty() {
        return None;
    }
    let template = ctx.surrounding_template(tag.begin)?;
    equivalences
        .iter()
        .filter(|equivalence| ctx.is_same_template(&template.name, &equivalence.name))
        .flat_map(|equivalence| equivalence.parameters.iter())
        .find_map(|parameter| template.parameter_value(parameter))
        .and_then(|value| format_group_name(strip_quotes(value.trim())))
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn format_group_name(group: &str) -> Option<String> {
    let group = group.trim();
    if group.is_empty() { None } else { Some(group.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn first_ref<'a>(ctx: &'a LintContext) -> &'a Tag {
        ctx.tags(TagKind::Ref).next().unwrap()
    }

    #[test]
    fn test_group_from_own_parameter() {
        let ctx = LintContext::new("<ref group=\" notes \">a</ref>", None);
        assert_eq!(reference_group(&ctx, first_ref(&ctx)), Some("notes".to_string()));
    }

    #[test]
    fn test_blank_group_is_default() {
        let ctx = LintContext::new("<ref group=\"\">a</ref>", None);
        assert_eq!(reference_group(&ctx, first_ref(&ctx)), None);
    }

    #[test]
    fn test_group_from_surrounding_references() {
        let ctx = LintContext::new("<references group=lower-alpha>\n<ref name=a>x</ref>\n</references>", None);
        assert_eq!(reference_group(&ctx, first_ref(&ctx)), Some("lower-alpha".to_string()));
    }

    #[test]
    fn test_surrounding_references_without_group_stops_lookup() {
        let config = Config::from_toml_str("[wiki]\nreferences_templates = [\"Reflist#group\"]\n", "t.toml").unwrap();
        let ctx = LintContext::new(
            "{{Reflist|group=n|refs=<references>\n<ref name=a>x</ref>\n</references>}}",
            Some(&config),
        );
        assert_eq!(reference_group(&ctx, first_ref(&ctx)), None);
    }

    #[test]
    fn test_group_from_configured_template() {
        let config =
            Config::from_toml_str("[wiki]\nreferences_templates = [\"Reflist#group,liste\"]\n", "t.toml").unwrap();
        let ctx = LintContext::new("{{reflist|liste=\"notes\"|refs=<ref name=a>x</ref>}}", Some(&config));
        assert_eq!(reference_group(&ctx, first_ref(&ctx)), Some("notes".to_string()));
    }

    #[test]
    fn test_unconfigured_template_gives_default_group() {
        let ctx = LintContext::new("{{Reflist|group=n|refs=<ref name=a>x</ref>}}", None);
        assert_eq!(reference_group(&ctx, first_ref(&ctx)), None);
    }
}
