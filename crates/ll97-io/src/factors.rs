//! Loading emissions and limit factor tables.
//!
//! The reference files are JSON objects nested two levels deep with numeric
//! leaves. They may carry `//` comment lines (the first non-blank characters
//! of the line), which are stripped before parsing. Trailing comments after
//! JSON content on the same line are not supported.
//!
//! Copies of both files are compiled into the crate so the CLI and server
//! work without any data directory; explicit paths override them.

use anyhow::{Context, Result};
use ll97_core::{EmissionsFactorTable, FactorTables, LimitFactorTable, DEFAULT_PENALTY_RATE};
use std::fs;
use std::path::Path;
use tracing::debug;

const BUNDLED_EMISSIONS_FACTORS: &str = include_str!("../../../data/emissions_factors.json");
const BUNDLED_LIMIT_FACTORS: &str = include_str!("../../../data/limit_factors.json");

/// Drop every line whose first non-blank characters are `//`.
pub fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parse_emissions_table(text: &str) -> Result<EmissionsFactorTable> {
    serde_json::from_str(&strip_comment_lines(text)).context("parsing emissions factor table")
}

pub fn parse_limit_table(text: &str) -> Result<LimitFactorTable> {
    serde_json::from_str(&strip_comment_lines(text)).context("parsing limit factor table")
}

/// Load both tables from disk.
pub fn load_factor_tables(emissions_path: &Path, limits_path: &Path) -> Result<FactorTables> {
    resolve_factor_tables(
        Some(emissions_path),
        Some(limits_path),
        DEFAULT_PENALTY_RATE,
    )
}

/// Tables compiled into the binary from `data/`.
pub fn bundled_factor_tables() -> Result<FactorTables> {
    resolve_factor_tables(None, None, DEFAULT_PENALTY_RATE)
}

/// Load tables from whichever paths are given, falling back to the bundled
/// copy for each table left unspecified.
pub fn resolve_factor_tables(
    emissions_path: Option<&Path>,
    limits_path: Option<&Path>,
    penalty_rate: f64,
) -> Result<FactorTables> {
    let emissions = match emissions_path {
        Some(path) => parse_emissions_table(&read_table(path)?)
            .with_context(|| format!("in '{}'", path.display()))?,
        None => parse_emissions_table(BUNDLED_EMISSIONS_FACTORS)
            .context("bundled emissions factors")?,
    };
    let limits = match limits_path {
        Some(path) => parse_limit_table(&read_table(path)?)
            .with_context(|| format!("in '{}'", path.display()))?,
        None => parse_limit_table(BUNDLED_LIMIT_FACTORS).context("bundled limit factors")?,
    };

    let tables = FactorTables::new(emissions, limits).with_penalty_rate(penalty_rate);
    debug!(
        periods = tables.periods().len(),
        use_types = tables.limit_table().len(),
        bundled_emissions = emissions_path.is_none(),
        bundled_limits = limits_path.is_none(),
        "factor tables ready"
    );
    Ok(tables)
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading factor table '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll97_core::Fuel;

    #[test]
    fn test_strip_comment_lines_keeps_urls_in_strings() {
        let text = "// header\n  // indented\n{\"a\": \"http://x\"}\n";
        assert_eq!(strip_comment_lines(text), "{\"a\": \"http://x\"}");
    }

    #[test]
    fn test_parse_with_comments() {
        let text = r#"
            // period -> fuel -> factor
            {
              "2024-2029": { "electricity_kwh": 0.0005 }
            }
        "#;
        let table = parse_emissions_table(text).unwrap();
        assert_eq!(table["2024-2029"]["electricity_kwh"], 0.0005);
    }

    #[test]
    fn test_parse_rejects_non_numeric_leaf() {
        let text = r#"{ "Office": { "2024-2029": "lots" } }"#;
        assert!(parse_limit_table(text).is_err());
    }

    #[test]
    fn test_bundled_tables_are_consistent() {
        let tables = bundled_factor_tables().unwrap();
        assert!(!tables.periods().is_empty());
        assert!(tables.has_use_type("Office"));
        for period in tables.periods() {
            assert!(tables.emissions_factor(period, Fuel::Electricity) > 0.0);
        }
        assert!(!tables.diagnostics().has_errors());
    }

    #[test]
    fn test_resolve_falls_back_to_bundled() {
        let tables = resolve_factor_tables(None, None, 300.0).unwrap();
        assert_eq!(tables.penalty_rate(), 300.0);
        assert_eq!(
            tables.periods(),
            bundled_factor_tables().unwrap().periods()
        );
    }
}
