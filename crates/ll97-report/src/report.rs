//! The LL97 emissions report document.

use crate::chart::ChartImage;
use crate::format::{format_fixed, format_grouped, format_money, format_quantity};
use crate::layout::{Layout, Table, FRAME_HEIGHT, HEADING, INCH, SECTION, TITLE};
use ll97_core::{CalculationResult, Fuel, Ll97Result};
use tracing::{debug, info};

pub const REPORT_TITLE: &str = "LL97 Emissions Report";

const AREA_WIDTHS: [f32; 2] = [2.5 * INCH, 1.5 * INCH];

/// Render `result` as a PDF.
///
/// `chart` holds raw image bytes (PNG or JPEG). When they do not decode, the
/// chart section is left out and the output is identical to passing `None`.
pub fn render_report(result: &CalculationResult, chart: Option<&[u8]>) -> Ll97Result<Vec<u8>> {
    let mut layout = Layout::new();

    layout.paragraph(REPORT_TITLE, TITLE);
    layout.paragraph(&result.building_name, HEADING);
    layout.spacer(12.0);

    layout.paragraph("Building Area Breakdown", SECTION);
    layout.table(&area_table(result));
    layout.spacer(12.0);

    layout.paragraph("Annual Utility Data", SECTION);
    layout.table(&utility_table(result));
    layout.spacer(12.0);

    layout.paragraph("Emissions Summary", SECTION);
    layout.table(&summary_table(result));
    layout.spacer(16.0);

    if let Some(image) = chart.and_then(ChartImage::decode) {
        // keep the heading on the same page as the image
        let max_height = FRAME_HEIGHT - SECTION.height();
        let (_, height) = Layout::image_size(&image, max_height);
        layout.ensure_space(SECTION.height() + height);
        layout.paragraph("LL97 Carbon Emissions", SECTION);
        layout.image(image, max_height);
    } else if chart.is_some() {
        debug!("chart omitted from report");
    }

    let pages = layout.page_count();
    let bytes = layout.finish(REPORT_TITLE)?;
    info!(
        building = %result.building_name,
        periods = result.periods.len(),
        pages,
        bytes = bytes.len(),
        "rendered report"
    );
    Ok(bytes)
}

fn area_table(result: &CalculationResult) -> Table {
    let mut table = Table::new(
        AREA_WIDTHS.to_vec(),
        vec!["Area Type".into(), "Area (sq ft)".into()],
    );
    for (use_type, area) in &result.areas {
        table = table.row(vec![use_type.clone(), format_grouped(area.value(), 0)]);
    }
    table
}

fn utility_table(result: &CalculationResult) -> Table {
    let mut table = Table::new(AREA_WIDTHS.to_vec(), vec!["Utility".into(), "Usage".into()]);
    for fuel in Fuel::ALL {
        table = table.row(vec![
            fuel.label().to_string(),
            format_quantity(result.utility_usage.get(fuel)),
        ]);
    }
    table
}

/// Periods run across the columns; with no periods only a header is drawn.
fn summary_table(result: &CalculationResult) -> Table {
    if result.periods.is_empty() {
        return Table::new(
            vec![1.2 * INCH, 1.6 * INCH, 1.6 * INCH, 1.6 * INCH, 1.4 * INCH],
            [
                "Year",
                "Emissions (tCO2e/yr)",
                "Limit (tCO2e/yr)",
                "Overage (tCO2e/yr)",
                "Penalty ($/yr)",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );
    }

    let mut widths = vec![1.8 * INCH];
    widths.extend(std::iter::repeat(1.2 * INCH).take(result.periods.len()));

    let mut header = vec!["Metric".to_string()];
    header.extend(result.periods.iter().map(|p| p.label.clone()));

    let row = |name: &str, cell: &dyn Fn(&ll97_core::PeriodResult) -> String| {
        let mut cells = vec![name.to_string()];
        cells.extend(result.periods.iter().map(cell));
        cells
    };

    let mut table = Table::new(widths, header)
        .row(row("Emissions (tCO2e/yr)", &|p| format_fixed(p.total_emissions.value())))
        .row(row("Limit (tCO2e/yr)", &|p| format_fixed(p.total_limit.value())))
        .row(row("Overage (tCO2e/yr)", &|p| format_fixed(p.overage.value())))
        .row(row("Penalty ($/yr)", &|p| format_money(p.penalty.value())));
    table.bold_first_column = true;
    table
}

/// Download name for a building's report, safe inside a quoted
/// `Content-Disposition` filename and as a single path component.
pub fn report_filename(building_name: &str) -> String {
    let stem: String = building_name
        .trim()
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let stem = if stem.is_empty() { "report" } else { stem.as_str() };
    format!("ll97_report_{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll97_core::{SquareFeet, Tco2e, Dollars, PeriodResult};
    use std::collections::BTreeMap;

    fn period(label: &str, emissions: f64, limit: f64) -> PeriodResult {
        let overage = (emissions - limit).max(0.0);
        PeriodResult {
            label: label.to_string(),
            limits: BTreeMap::new(),
            total_limit: Tco2e(limit),
            total_emissions: Tco2e(emissions),
            overage: Tco2e(overage),
            penalty: Dollars(overage * 268.0),
            compliance: overage == 0.0,
            emissions_below_limit: Tco2e((limit - emissions).max(0.0)),
            emissions_by_fuel: BTreeMap::new(),
        }
    }

    #[test]
    fn test_summary_table_is_transposed() {
        let result = CalculationResult {
            building_name: "Tower".into(),
            areas: BTreeMap::from([("Office".to_string(), SquareFeet(10_000.0))]),
            utility_usage: Default::default(),
            periods: vec![period("2024-2029", 0.5, 0.1), period("2030-2034", 0.5, 1.0)],
        };
        let table = summary_table(&result);
        assert_eq!(table.header, vec!["Metric", "2024-2029", "2030-2034"]);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0], vec!["Emissions (tCO2e/yr)", "0.50", "0.50"]);
        assert_eq!(table.rows[2], vec!["Overage (tCO2e/yr)", "0.40", "0.00"]);
        assert_eq!(table.rows[3], vec!["Penalty ($/yr)", "$107", "$0"]);
        assert!(table.bold_first_column);
    }

    #[test]
    fn test_summary_without_periods_is_header_only() {
        let table = summary_table(&CalculationResult::default());
        assert_eq!(table.header[0], "Year");
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_area_and_utility_tables() {
        let mut result = CalculationResult::default();
        result.areas.insert("Hotel".into(), SquareFeet(25_000.0));
        result.utility_usage.gas = 1_234.5;

        let areas = area_table(&result);
        assert_eq!(areas.rows, vec![vec!["Hotel".to_string(), "25,000".to_string()]]);

        let utilities = utility_table(&result);
        assert_eq!(utilities.rows.len(), 5);
        assert_eq!(utilities.rows[0], vec!["Electricity (kWh)", "0"]);
        assert_eq!(utilities.rows[1], vec!["Gas (therms)", "1,234.50"]);
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename("Tower One"), "ll97_report_Tower_One.pdf");
        assert_eq!(report_filename(""), "ll97_report_report.pdf");
        assert_eq!(report_filename("  "), "ll97_report_report.pdf");
        assert_eq!(report_filename("A \"B\"\n"), "ll97_report_A_B.pdf");
        assert_eq!(
            report_filename("12 Main St / Annex"),
            "ll97_report_12_Main_St___Annex.pdf"
        );
        assert_eq!(report_filename("../etc\\x"), "ll97_report_.._etc_x.pdf");
    }
}
