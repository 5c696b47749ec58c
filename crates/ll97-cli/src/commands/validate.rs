use anyhow::{bail, Result};
use ll97_cli::cli::Cli;
use ll97_core::validate_building;
use ll97_io::load_payload;
use std::path::Path;

use crate::commands::common::load_tables;

/// Report problems with the payload and the factor tables; fails when any
/// of them is an error.
pub fn handle(cli: &Cli, payload_path: &Path) -> Result<()> {
    let tables = load_tables(cli)?;
    let payload = load_payload(payload_path)?;

    let mut diagnostics = tables.diagnostics();
    diagnostics.merge(validate_building(
        &tables,
        &payload.building(),
        &payload.usage(),
    ));

    print!("{diagnostics}");
    if diagnostics.has_errors() {
        bail!(
            "{} failed validation ({})",
            payload_path.display(),
            diagnostics.summary()
        );
    }
    Ok(())
}
