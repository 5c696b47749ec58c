use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ll97",
    author,
    version,
    about = "LL97 building emissions calculator and report generator",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.ll97/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emissions factor table, overriding the configured or bundled one
    #[arg(long, global = true)]
    pub emissions_factors: Option<PathBuf>,

    /// Limit factor table, overriding the configured or bundled one
    #[arg(long, global = true)]
    pub limit_factors: Option<PathBuf>,

    /// Penalty in dollars per tCO2e of overage
    #[arg(long, global = true)]
    pub penalty_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate emissions, limits and penalties for a building payload
    Calculate {
        /// Building payload (JSON, as posted by the web front end)
        payload: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Check a building payload and the factor tables for problems
    Validate {
        /// Building payload (JSON)
        payload: PathBuf,
    },
    /// Render the PDF compliance report
    Report {
        /// Building payload (JSON)
        payload: PathBuf,
        /// Where to write the PDF
        #[arg(long, short = 'o')]
        out: PathBuf,
        /// Chart image (PNG/JPEG); defaults to the payload's chartImageBase64
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Inspect the loaded factor tables
    Factors {
        #[command(subcommand)]
        command: FactorsCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FactorsCommands {
    /// List compliance periods
    Periods,
    /// List use types with limit factors
    UseTypes,
    /// Show the limit factor of one use type in every period
    Show {
        /// Use type name, e.g. "Office"
        use_type: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
