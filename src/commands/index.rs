//! Handler for the `index` command: print the elements found in one document.

use colored::*;
use serde_json::json;

use wikilint_lib::config::ConfigLookup;
use wikilint_lib::exit_codes::exit;
use wikilint_lib::lint_context::{Element, LintContext, TagKind};
use wikilint_lib::rules::ref_utils::reference_group;

use crate::IndexArgs;
use crate::cli_utils::{load_config_with_cli_error_handling, read_input};

fn describe(element: &Element) -> String {
    match element {
        Element::Tag(tag) => {
            let parameters: Vec<String> = tag
                .parameters
                .iter()
                .map(|p| format!("{}={:?}", p.name, p.value))
                .collect();
            format!("tag <{}> {:?} {}", tag.kind.name(), tag.form, parameters.join(" "))
        }
        Element::Template(template) => {
            let parameters: Vec<String> = template.parameters.keys().cloned().collect();
            format!("template {{{{{}}}}} [{}]", template.name, parameters.join(", "))
        }
        Element::Comment(comment) => {
            if comment.complete {
                "comment".to_string()
            } else {
                "comment (unterminated)".to_string()
            }
        }
        Element::ExternalLink(link) => format!("external-link {}", link.url),
    }
}

/// Print the element index of a document, with the group of every `<ref>`
pub fn handle_index(args: &IndexArgs, config_path: Option<&str>) {
    let discovery_dir = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let config = load_config_with_cli_error_handling(config_path, &discovery_dir);

    let content = match read_input(&args.path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    let ctx = LintContext::new(&content, Some(&config as &dyn ConfigLookup));
    let groups: Vec<_> = ctx
        .tags(TagKind::Ref)
        .map(|tag| (tag.begin, reference_group(&ctx, tag)))
        .collect();

    if args.json {
        let output = json!({
            "elements": ctx.elements.elements(),
            "reference_groups": groups
                .iter()
                .map(|(begin, group)| json!({ "begin": begin, "group": group }))
                .collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
        }
        return;
    }

    for element in ctx.elements.elements() {
        let (line, column) = ctx.line_index.line_col(element.begin());
        let mut text = format!("{line}:{column} {}..{} {}", element.begin(), element.end(), describe(element));
        if let Element::Tag(tag) = element
            && tag.kind == TagKind::Ref
            && let Some((_, Some(group))) = groups.iter().find(|(begin, _)| *begin == tag.begin)
        {
            text.push_str(&format!(" group={group}"));
        }
        println!("{}", text.trim_end());
    }
    println!("{} element(s)", ctx.elements.len());
}
