use wikilint_lib::lint_context::LintContext;
use wikilint_lib::rule::{LintWarning, Rule, Severity};
use wikilint_lib::rules::WC046UnbalancedLinkBrackets;

fn check(content: &str) -> Vec<LintWarning> {
    let ctx = LintContext::new(content, None);
    WC046UnbalancedLinkBrackets.check(&ctx).unwrap()
}

fn candidates(warning: &LintWarning) -> Vec<String> {
    warning.fixes.iter().map(|fix| fix.replacement.clone()).collect()
}

#[test]
fn test_wc046_balanced_link() {
    let ctx = LintContext::new("[[a]]", None);
    assert!(!WC046UnbalancedLinkBrackets.detect(&ctx));
    assert!(check("[[a]]").is_empty());
}

#[test]
fn test_wc046_missing_opening() {
    let result = check("a]]");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].severity, Severity::Error);
    assert_eq!(result[0].range.end, 3);
    assert_eq!(candidates(&result[0]), vec!["[a]]"]);
}

#[test]
fn test_wc046_external_link() {
    let result = check("[http://x]]");
    assert_eq!(result.len(), 1);
    assert_eq!(candidates(&result[0]), vec!["[[http://x]]", "[http://x]"]);
}

#[test]
fn test_wc046_reset_after_defect() {
    let content = "[[a]]]]";
    let result = check(content);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].range.start, 5);
}

#[test]
fn test_wc046_multiline_page() {
    let content = "Intro [[Link]].\n\nSee [Other page]] for more.\n* item]]\n[[Ok]]\n";
    let result = check(content);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].line, 3);
    assert_eq!(candidates(&result[0]), vec!["[[Other page]]"]);
    assert_eq!(result[1].line, 4);
    assert_eq!(candidates(&result[1]), vec!["[* item]]"]);
}

#[test]
fn test_wc046_first_fix_is_locally_stable() {
    for content in ["a]]", "x [y]] z", "[http://x]]", "[[a]]]]", "line\n[b]] [[c]]"] {
        let before = check(content).len();
        for warning in check(content) {
            for fix in &warning.fixes {
                let fixed = fix.apply_to(content);
                assert!(
                    check(&fixed).len() <= before,
                    "fix {:?} on {content:?} gave more defects",
                    fix.replacement
                );
            }
        }
    }
}
