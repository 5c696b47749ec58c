use anyhow::Result;
use ll97_cli::cli::Cli;
use ll97_core::FactorTables;
use ll97_io::{resolve_factor_tables, Ll97Config};
use tracing::{debug, warn};

/// Configuration file merged with the global command-line overrides.
pub fn load_config(cli: &Cli) -> Result<Ll97Config> {
    let mut config = Ll97Config::resolve(cli.config.as_deref())?;
    if let Some(path) = &cli.emissions_factors {
        config.data.emissions_factors = Some(path.clone());
    }
    if let Some(path) = &cli.limit_factors {
        config.data.limit_factors = Some(path.clone());
    }
    if let Some(rate) = cli.penalty_rate {
        config.calc.penalty_rate = rate;
    }
    Ok(config)
}

pub fn load_tables(cli: &Cli) -> Result<FactorTables> {
    let config = load_config(cli)?;
    let tables = resolve_factor_tables(
        config.data.emissions_factors.as_deref(),
        config.data.limit_factors.as_deref(),
        config.calc.penalty_rate,
    )?;
    for issue in &tables.diagnostics().issues {
        warn!("factor tables: {issue}");
    }
    debug!(periods = ?tables.periods(), "loaded factor tables");
    Ok(tables)
}
