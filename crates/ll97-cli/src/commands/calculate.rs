use anyhow::Result;
use ll97_cli::cli::{Cli, OutputFormat};
use ll97_core::{calculate, CalculationResult, SquareFeet};
use ll97_io::load_payload;
use std::io::{self, Write};
use std::path::Path;
use tabwriter::TabWriter;
use tracing::info;

use crate::commands::common::load_tables;

pub fn handle(cli: &Cli, payload: &Path, format: OutputFormat) -> Result<()> {
    let tables = load_tables(cli)?;
    let payload = load_payload(payload)?;
    let result = calculate(&tables, &payload.building(), &payload.usage());
    info!(
        building = %result.building_name,
        periods = result.periods.len(),
        "calculated emissions"
    );

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        OutputFormat::Table => print_table(&result),
    }
}

fn print_table(result: &CalculationResult) -> Result<()> {
    let name = if result.building_name.is_empty() {
        "(unnamed building)"
    } else {
        result.building_name.as_str()
    };
    println!("{name}");
    let total_area: SquareFeet = result.areas.values().sum();
    println!("{} use type(s), {total_area}", result.areas.len());
    println!();

    let mut writer = TabWriter::new(io::stdout());
    writeln!(
        writer,
        "PERIOD\tEMISSIONS (tCO2e)\tLIMIT (tCO2e)\tOVERAGE (tCO2e)\tPENALTY ($)\tSTATUS"
    )?;
    for period in &result.periods {
        writeln!(
            writer,
            "{}\t{:.2}\t{:.2}\t{:.2}\t{:.0}\t{}",
            period.label,
            period.total_emissions.value(),
            period.total_limit.value(),
            period.overage.value(),
            period.penalty.value(),
            if period.compliance { "compliant" } else { "over limit" }
        )?;
    }
    writer.flush()?;
    Ok(())
}
