use anyhow::{Context, Result};
use ll97_cli::cli::Cli;
use ll97_core::calculate;
use ll97_io::load_payload;
use ll97_report::{decode_chart_payload, render_report, ChartImage};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::commands::common::load_tables;

pub fn handle(cli: &Cli, payload_path: &Path, out: &Path, chart: Option<&Path>) -> Result<()> {
    let tables = load_tables(cli)?;
    let payload = load_payload(payload_path)?;
    let result = calculate(&tables, &payload.building(), &payload.usage());

    let chart_bytes = match chart {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("reading chart '{}'", path.display()))?;
            if ChartImage::decode(&bytes).is_none() {
                warn!(path = %path.display(), "chart is not a readable image; leaving it out");
            }
            Some(bytes)
        }
        None => payload
            .chart_image_base64
            .as_deref()
            .and_then(decode_chart_payload),
    };

    let pdf = render_report(&result, chart_bytes.as_deref())?;
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, &pdf).with_context(|| format!("writing report '{}'", out.display()))?;
    println!("Wrote report to {} ({} bytes)", out.display(), pdf.len());
    Ok(())
}
