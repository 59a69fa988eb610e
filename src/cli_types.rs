use clap::{Args, ValueEnum};

/// Fail-on mode determines which severity triggers exit code 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailOn {
    /// Exit 1 on any violation (info, warning, or error)
    #[default]
    Any,
    /// Exit 1 on warning or error severity violations
    Warning,
    /// Exit 1 only on error-severity violations
    Error,
    /// Always exit 0
    Never,
}

impl FailOn {
    pub fn fails_on(self, severity: wikilint_lib::rule::Severity) -> bool {
        use wikilint_lib::rule::Severity;
        match self {
            FailOn::Any => true,
            FailOn::Warning => severity >= Severity::Warning,
            FailOn::Error => severity == Severity::Error,
            FailOn::Never => false,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to lint (use '-' for stdin)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Disable specific rules (comma-separated)
    #[arg(short, long)]
    pub disable: Option<String>,

    /// Enable only specific rules (comma-separated)
    #[arg(short, long, visible_alias = "rules")]
    pub enable: Option<String>,

    /// Output format for linting results
    #[arg(long, short = 'o', value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Print the candidate replacements proposed for each report
    #[arg(long)]
    pub show_fixes: bool,

    /// Exit code behavior: any, warning, error or never
    #[arg(long, value_enum, default_value_t)]
    pub fail_on: FailOn,

    /// Quiet mode: only print reports, no summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Show detailed output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// File to index (use '-' for stdin)
    pub path: String,

    /// Print the index as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per report
    Text,
    /// JSON array of reports
    Json,
}

impl From<OutputFormat> for wikilint_lib::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}
