//! oscal-insights: coverage insights for OSCAL component definitions.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use oscal_insights::{AnalysisConfig, cli};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "oscal-insights")]
#[command(version)]
#[command(about = "Coverage insights for OSCAL component definitions", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Usage error
    2  Analysis failed (missing document, malformed id, unresolvable source)

EXAMPLES:
    # Analyze a component definition and write reports
    oscal-insights analyze -b workspace -f component-definition.json -o out

    # Print the terminal summary only
    oscal-insights summary -b workspace -f component-definition.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `analyze` subcommand
#[derive(Parser)]
struct AnalyzeArgs {
    /// Base path of the OSCAL workspace (sources resolve relative to it)
    #[arg(short, long)]
    base_path: PathBuf,

    /// Path of the component-definition JSON, relative to the base path
    #[arg(short, long)]
    file_path: String,

    /// Output directory for the produced report files
    #[arg(short, long)]
    output_path: PathBuf,

    /// Count only top-level catalog controls (skip nested sub-controls)
    #[arg(long)]
    flat: bool,
}

/// Arguments for the `summary` subcommand
#[derive(Parser)]
struct SummaryArgs {
    /// Base path of the OSCAL workspace (sources resolve relative to it)
    #[arg(short, long)]
    base_path: PathBuf,

    /// Path of the component-definition JSON, relative to the base path
    #[arg(short, long)]
    file_path: String,

    /// Count only top-level catalog controls (skip nested sub-controls)
    #[arg(long)]
    flat: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a component definition and write insight reports
    Analyze(AnalyzeArgs),

    /// Print a terminal summary of a component definition's insights
    Summary(SummaryArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

const fn analysis_config(flat: bool) -> AnalysisConfig {
    if flat {
        AnalysisConfig::flat()
    } else {
        AnalysisConfig { recurse: true }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => cli::run_analyze(
            args.base_path,
            args.file_path,
            args.output_path,
            analysis_config(args.flat),
            cli.quiet,
            cli.no_color,
        ),

        Commands::Summary(args) => cli::run_summary(
            args.base_path,
            args.file_path,
            analysis_config(args.flat),
            cli.no_color,
        ),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "oscal-insights", &mut io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(2);
    }
}
