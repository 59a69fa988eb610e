use wikilint_lib::config::{Config, ConfigLookup};
use wikilint_lib::lint_context::LintContext;
use wikilint_lib::rule::Rule;
use wikilint_lib::rules::WC003MissingReferences;

fn config(toml: &str) -> Config {
    Config::from_toml_str(toml, "test.toml").unwrap()
}

#[test]
fn test_wc003_no_refs_whatever_references() {
    let rule = WC003MissingReferences;
    for content in ["", "plain", "<references>", "<references/>", "</references>", "{{Reflist}}"] {
        let ctx = LintContext::new(content, None);
        assert!(!rule.detect(&ctx), "unexpected defect for {content:?}");
        assert!(rule.check(&ctx).unwrap().is_empty());
    }
}

#[test]
fn test_wc003_complete_references_anywhere() {
    let rule = WC003MissingReferences;
    let content = "== Notes ==\n<references group=\"n\">\n<ref name=\"a\">A</ref>\n</references>\nText<ref>B</ref>\n<references>";
    let ctx = LintContext::new(content, None);
    assert!(!rule.detect(&ctx));
}

#[test]
fn test_wc003_reports_open_references_tag() {
    let rule = WC003MissingReferences;
    let content = "Claim.<ref>Source</ref>\n\n== References ==\n<references>\n";
    let ctx = LintContext::new(content, None);
    let result = rule.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 4);
    assert_eq!(result[0].column, 1);
    assert_eq!(result[0].fixes[0].apply_to(content), "Claim.<ref>Source</ref>\n\n== References ==\n<references />\n");
}

#[test]
fn test_wc003_fix_removes_the_defect() {
    let rule = WC003MissingReferences;
    let content = "a<ref>x</ref>\n<references responsive>";
    let ctx = LintContext::new(content, None);
    let fixed = rule.check(&ctx).unwrap()[0].fixes[0].apply_to(content);
    assert_eq!(fixed, "a<ref>x</ref>\n<references responsive />");
    assert!(!rule.detect(&LintContext::new(&fixed, None)));
}

#[test]
fn test_wc003_template_equivalence_rules() {
    let rule = WC003MissingReferences;
    let config = config("[wiki]\ncapital-links = false\n\n[WC003]\ntemplates = [\"reflist\"]\n");
    let lookup: &dyn ConfigLookup = &config;

    let ctx = LintContext::new("a<ref>x</ref>\n{{reflist}}", Some(lookup));
    assert!(!rule.detect(&ctx));

    // First letter is case-sensitive on this wiki
    let ctx = LintContext::new("a<ref>x</ref>\n{{Reflist}}", Some(lookup));
    assert!(rule.detect(&ctx));

    let ctx = LintContext::new("a<ref>x</ref>\n{{template:reflist|2}}", Some(lookup));
    assert!(!rule.detect(&ctx));
}

#[test]
fn test_wc003_nowiki_refs_ignored_but_real_ones_count() {
    let rule = WC003MissingReferences;
    let content = "<nowiki><ref>x</ref></nowiki> and <ref>y</ref>";
    let ctx = LintContext::new(content, None);
    assert!(rule.detect(&ctx));
}
