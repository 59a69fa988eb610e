//! Rendering of lint reports for the command line.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::rule::LintWarning;
use std::str::FromStr;

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `file:line:col: [RULE] message`, colored when the terminal allows it
    #[default]
    Text,
    /// One JSON array with every report of every file
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format: {other}")),
        }
    }
}

impl OutputFormat {
    pub fn create_formatter(self, show_fixes: bool) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(show_fixes)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

/// Turns the reports of a set of files into printable text
pub trait OutputFormatter {
    /// Format the reports of one file
    fn format_warnings(&self, warnings: &[LintWarning], file_path: &str) -> String;

    /// Format the reports of several files at once; formats that need a single
    /// document (JSON) override this
    fn format_all(&self, files: &[(String, Vec<LintWarning>)]) -> String {
        files
            .iter()
            .filter(|(_, warnings)| !warnings.is_empty())
            .map(|(path, warnings)| self.format_warnings(warnings, path))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }
}
