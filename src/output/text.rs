use colored::*;

use super::OutputFormatter;
use crate::rule::{LintWarning, Severity};

/// Human readable output, one line per report
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    show_fixes: bool,
}

impl TextFormatter {
    pub fn new(show_fixes: bool) -> Self {
        Self { show_fixes }
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
        Severity::Info => "info".blue().bold(),
    }
}

impl OutputFormatter for TextFormatter {
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String {
        let mut output = String::new();
        for warning in warnings {
            let rule_name = warning.rule_name.as_deref().unwrap_or("unknown");
            output.push_str(&format!(
                "{}:{}:{}: {} [{}] {}\n",
                file_path.blue().underline(),
                warning.line,
                warning.column,
                severity_label(warning.severity),
                rule_name.yellow(),
                warning.message
            ));
            if self.show_fixes {
                for fix in &warning.fixes {
                    output.push_str(&format!(
                        "    {} {}: {}\n",
                        "fix".green(),
                        fix.description,
                        fix.replacement.replace('\n', "\\n")
                    ));
                }
            }
        }
        if output.ends_with('\n') {
            output.pop();
        }
        output
    }
}
