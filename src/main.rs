//! Funnel Lens CLI
//!
//! Clickstream analytics for e-commerce event logs.
//! Produces a JSON report, SVG charts and a terminal summary from a CSV log.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use std::path::PathBuf;

use funnel_lens::charts::ChartConfig;
use funnel_lens::commands::{
    display_schema, display_version, execute_report, validate_args, validate_report_file,
    ReportArgs,
};
use funnel_lens::utils::config::AnalyticsConfig;

/// Funnel Lens - Funnel, engagement and exit analytics for clickstreams
#[derive(Parser, Debug)]
#[command(name = "funnel-lens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse an event log and write the report
    Report {
        /// CSV event log
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Directory for SVG charts (optional)
        #[arg(short, long)]
        charts: Option<PathBuf>,

        /// TOML file with funnel labels and top-N sizes
        #[arg(long, env = "FUNNEL_LENS_CONFIG")]
        config: Option<PathBuf>,

        /// Number of most common journeys to keep
        #[arg(long)]
        top_journeys: Option<usize>,

        /// Number of purchase paths to keep
        #[arg(long)]
        top_paths: Option<usize>,

        /// Number of loyal users to keep
        #[arg(long)]
        top_users: Option<usize>,

        /// Chart width in pixels
        #[arg(long, default_value = "960")]
        width: usize,

        /// Chart height in pixels
        #[arg(long, default_value = "540")]
        height: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            input,
            output,
            charts,
            config,
            top_journeys,
            top_paths,
            top_users,
            width,
            height,
            summary,
        } => {
            let mut analytics = match config {
                Some(path) => AnalyticsConfig::load_from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => AnalyticsConfig::default(),
            };

            // Flags win over the config file
            if let Some(n) = top_journeys {
                analytics.top_journeys = n;
            }
            if let Some(n) = top_paths {
                analytics.top_paths = n;
            }
            if let Some(n) = top_users {
                analytics.top_users = n;
            }

            debug!("Analytics config: {:?}", analytics);

            let args = ReportArgs {
                input,
                output_json: output,
                charts_dir: charts,
                config: analytics,
                chart_config: ChartConfig::new().with_size(width, height),
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
