use clap::Parser;
use ll97_cli::cli::{Cli, Commands, FactorsCommands};
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: logging already initialised");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Calculate { payload, format } => commands::calculate::handle(cli, payload, *format),
        Commands::Validate { payload } => commands::validate::handle(cli, payload),
        Commands::Report {
            payload,
            out,
            chart,
        } => commands::report::handle(cli, payload, out, chart.as_deref()),
        Commands::Factors { command } => {
            let tables = commands::common::load_tables(cli)?;
            match command {
                FactorsCommands::Periods => commands::factors::periods(&tables),
                FactorsCommands::UseTypes => commands::factors::use_types(&tables),
                FactorsCommands::Show { use_type } => commands::factors::show(&tables, use_type),
            }
        }
        Commands::Completions { shell, out } => commands::completions::handle(*shell, out.as_deref()),
    }
}
