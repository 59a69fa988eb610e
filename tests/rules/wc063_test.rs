use wikilint_lib::lint_context::LintContext;
use wikilint_lib::rule::Rule;
use wikilint_lib::rules::WC063SmallInRef;

#[test]
fn test_wc063_top_level_small() {
    let ctx = LintContext::new("<small>Caption</small>", None);
    assert!(WC063SmallInRef.check(&ctx).unwrap().is_empty());
    assert!(!WC063SmallInRef.detect(&ctx));
}

#[test]
fn test_wc063_small_in_ref() {
    let content = "Claim<ref>Author, <small>in</small> Book</ref>";
    let ctx = LintContext::new(content, None);
    let result = WC063SmallInRef.check(&ctx).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(&content[result[0].range.clone()], "<small>in</small>");
    assert!(result[0].fixes.is_empty());
}

#[test]
fn test_wc063_deeply_nested() {
    let content = "<ref>{{Cite|title=<span><small>x</small></span>}}</ref>";
    let ctx = LintContext::new(content, None);
    assert_eq!(WC063SmallInRef.check(&ctx).unwrap().len(), 1);
}

#[test]
fn test_wc063_small_in_commented_ref_is_not_indexed() {
    let ctx = LintContext::new("<!-- <ref><small>x</small></ref> -->", None);
    assert!(WC063SmallInRef.check(&ctx).unwrap().is_empty());
}
