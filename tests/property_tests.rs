use proptest::prelude::*;
use wikilint_lib::lint_context::{ElementKind, LintContext, TagKind};
use wikilint_lib::rule::Rule;
use wikilint_lib::rules::{WC003MissingReferences, WC046UnbalancedLinkBrackets};
use wikilint_lib::ElementIndex;

/// Text built from markup fragments, so that generated documents contain
/// plenty of (possibly broken) tags, templates, links and comments.
fn wiki_text() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("<ref>".to_string()),
        Just("</ref>".to_string()),
        Just("<ref name=a/>".to_string()),
        Just("<references>".to_string()),
        Just("</references>".to_string()),
        Just("<references />".to_string()),
        Just("<small>".to_string()),
        Just("</small>".to_string()),
        Just("<nowiki>".to_string()),
        Just("</nowiki>".to_string()),
        Just("{{".to_string()),
        Just("}}".to_string()),
        Just("|".to_string()),
        Just("=".to_string()),
        Just("[[".to_string()),
        Just("]]".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just("[http://x.org t]".to_string()),
        Just("<!--".to_string()),
        Just("-->".to_string()),
        Just("\n".to_string()),
        "[a-zé ]{0,4}",
    ];
    prop::collection::vec(fragment, 0..24).prop_map(|parts| parts.concat())
}

fn element_kinds() -> Vec<ElementKind> {
    vec![
        ElementKind::Tag(TagKind::Ref),
        ElementKind::Tag(TagKind::References),
        ElementKind::Tag(TagKind::Small),
        ElementKind::Tag(TagKind::Nowiki),
        ElementKind::Template,
        ElementKind::Comment,
        ElementKind::ExternalLink,
    ]
}

proptest! {
    #[test]
    fn surrounding_returns_containing_element_of_requested_kind(text in wiki_text()) {
        let index = ElementIndex::build(&text);
        for element in index.elements() {
            prop_assert!(element.begin() <= element.end());
            prop_assert!(element.end() <= text.len());
        }
        for offset in 0..=text.len() {
            for kind in element_kinds() {
                if let Some(element) = index.surrounding(offset, kind) {
                    prop_assert_eq!(element.kind(), kind);
                    prop_assert!(element.begin() < offset && offset < element.end());
                }
            }
        }
    }

    #[test]
    fn no_ref_means_no_missing_references(text in "[a-z<>/{}\\[\\] |=\n]{0,40}") {
        let text = text.replace("ref", "rf");
        let ctx = LintContext::new(&text, None);
        prop_assert!(!WC003MissingReferences.detect(&ctx));
        prop_assert!(WC003MissingReferences.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn complete_references_means_no_missing_references(text in wiki_text()) {
        let text = format!("{text}\n<references />");
        let ctx = LintContext::new(&text, None);
        let has_complete = ctx.tags(TagKind::References).any(|tag| tag.is_complete());
        if has_complete {
            prop_assert!(!WC003MissingReferences.detect(&ctx));
        }
    }

    #[test]
    fn bracket_detect_agrees_with_check(text in wiki_text()) {
        let ctx = LintContext::new(&text, None);
        let warnings = WC046UnbalancedLinkBrackets.check(&ctx).unwrap();
        prop_assert_eq!(WC046UnbalancedLinkBrackets.detect(&ctx), !warnings.is_empty());
        for warning in &warnings {
            prop_assert!(text[warning.range.clone()].ends_with("]]"));
            prop_assert!(!warning.fixes.is_empty());
        }
    }
}
