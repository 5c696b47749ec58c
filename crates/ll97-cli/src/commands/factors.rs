use anyhow::{bail, Result};
use ll97_core::FactorTables;
use std::io::{self, Write};
use tabwriter::TabWriter;

pub fn periods(tables: &FactorTables) -> Result<()> {
    for period in tables.periods() {
        println!("{period}");
    }
    Ok(())
}

pub fn use_types(tables: &FactorTables) -> Result<()> {
    for use_type in tables.use_types() {
        println!("{use_type}");
    }
    Ok(())
}

/// Limit factor of `use_type` for each period, in tCO2e per square foot.
pub fn show(tables: &FactorTables, use_type: &str) -> Result<()> {
    if !tables.has_use_type(use_type) {
        bail!("unknown use type '{use_type}' (see `ll97 factors use-types`)");
    }
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "PERIOD\tLIMIT (tCO2e/sq ft)")?;
    for period in tables.periods() {
        match tables.limit_factor(use_type, period) {
            Some(factor) => writeln!(writer, "{period}\t{factor}")?,
            None => writeln!(writer, "{period}\t-")?,
        }
    }
    writer.flush()?;
    Ok(())
}
