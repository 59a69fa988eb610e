mod cli_types;
pub use cli_types::{CheckArgs, IndexArgs};

mod cli_utils;

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use wikilint_lib::exit_codes::exit;

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output
    #[arg(long, global = true, default_value_t, value_enum)]
    color: Color,

    /// Path to configuration file
    #[arg(long, global = true, help = "Path to configuration file")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint wiki markup files and print defects
    Check(CheckArgs),
    /// Show information about a rule or list all rules
    Rule {
        /// Rule name (optional, omit to list all rules)
        rule: Option<String>,
    },
    /// Print the elements (tags, templates, comments, links) found in a file
    Index(IndexArgs),
    /// Show version information
    Version,
}

#[derive(Clone, Default, ValueEnum)]
enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Check(args) if args.verbose);
    let mut logger = env_logger::Builder::from_default_env();
    if verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.format_timestamp(None).format_target(false).init();

    match cli.color {
        Color::Always => colored::control::set_override(true),
        Color::Never => colored::control::set_override(false),
        Color::Auto => colored::control::unset_override(),
    }

    // Catch panics and print a message, exit 2
    let result = std::panic::catch_unwind(|| match cli.command {
        Commands::Check(args) => commands::check::run_check(&args, cli.config.as_deref()),
        Commands::Rule { rule } => commands::rule::handle_rule(rule),
        Commands::Index(args) => commands::index::handle_index(&args, cli.config.as_deref()),
        Commands::Version => println!("wikilint {}", env!("CARGO_PKG_VERSION")),
    });
    if let Err(e) = result {
        eprintln!("[wikilint panic handler] Uncaught panic: {e:?}");
        exit::tool_error();
    }
}
