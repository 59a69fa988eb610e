//! Handler for the `check` command.

use colored::*;

use wikilint_lib::config as wikilint_config;
use wikilint_lib::exit_codes::exit;
use wikilint_lib::output::OutputFormat;
use wikilint_lib::rule::LintWarning;

use crate::CheckArgs;
use crate::cli_utils::{collect_input_paths, load_config_with_cli_error_handling, read_input, split_rule_list};

/// Run the check command and exit with the matching code.
pub fn run_check(args: &CheckArgs, config_path: Option<&str>) {
    let quiet = args.quiet;

    // 1. Config discovery starts from the first target directory, or the current one
    let discovery_dir = args
        .paths
        .first()
        .map(std::path::Path::new)
        .and_then(|first| {
            if first.is_dir() {
                Some(first.to_path_buf())
            } else {
                first.parent().filter(|parent| parent.is_dir()).map(|p| p.to_path_buf())
            }
        })
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let mut config = load_config_with_cli_error_handling(config_path, &discovery_dir);

    // 2. CLI flags replace the rule selection of the config file
    if let Some(enable) = args.enable.as_deref() {
        config.global.enable = split_rule_list(enable);
    }
    if let Some(disable) = args.disable.as_deref() {
        config.global.disable = split_rule_list(disable);
    }

    // 3. Validate configuration; problems are reported but never fatal
    let all_rules = wikilint_lib::rules::all_rules(&config);
    if !quiet {
        for warn in wikilint_config::validate_config(&config, &all_rules) {
            eprintln!("{} {}", "[config warning]".yellow(), warn.message);
        }
    }
    let rules = wikilint_lib::rules::filter_rules(&all_rules, &config.global);
    log::debug!(
        "Enabled rules: {}",
        rules.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ")
    );

    // 4. Pick the output format: CLI, then config, then text
    let format: OutputFormat = match args.output_format {
        Some(format) => format.into(),
        None => match config.global.output_format.as_deref().map(str::parse::<OutputFormat>) {
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                eprintln!("{}: {}", "Error".red().bold(), e);
                exit::tool_error();
            }
            None => OutputFormat::Text,
        },
    };

    let files = match collect_input_paths(&args.paths) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    // 5. Lint every file
    let mut results: Vec<(String, Vec<LintWarning>)> = Vec::with_capacity(files.len());
    for file in &files {
        let content = match read_input(file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{}: {:#}", "Error".red().bold(), e);
                exit::tool_error();
            }
        };
        match wikilint_lib::lint(&content, &rules, Some(&config)) {
            Ok(warnings) => {
                let display = if file == "-" { "<stdin>".to_string() } else { file.clone() };
                results.push((display, warnings));
            }
            Err(e) => {
                eprintln!("{}: {}: {}", "Error".red().bold(), file, e);
                exit::tool_error();
            }
        }
    }

    // 6. Report
    let formatter = format.create_formatter(args.show_fixes);
    let output = formatter.format_all(&results);
    if !output.is_empty() {
        println!("{output}");
    }

    let total_issues: usize = results.iter().map(|(_, warnings)| warnings.len()).sum();
    let files_with_issues = results.iter().filter(|(_, warnings)| !warnings.is_empty()).count();
    if !quiet && format == OutputFormat::Text {
        if total_issues == 0 {
            println!("{} No issues found in {} file(s)", "Success:".green().bold(), files.len());
        } else {
            println!(
                "\n{} Found {} issue(s) in {} file(s) ({} file(s) checked)",
                "Issues:".yellow().bold(),
                total_issues,
                files_with_issues,
                files.len()
            );
        }
    }

    let should_fail = results
        .iter()
        .flat_map(|(_, warnings)| warnings)
        .any(|warning| args.fail_on.fails_on(warning.severity));
    if should_fail {
        exit::violations_found();
    }
}
