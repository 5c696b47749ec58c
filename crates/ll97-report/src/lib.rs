//! # ll97-report: PDF Compliance Reports
//!
//! Renders a [`CalculationResult`](ll97_core::CalculationResult) as a
//! US-letter PDF with area, utility and per-period summary tables, plus the
//! emissions chart the front end captured.
//!
//! The document is drawn with the standard Helvetica fonts through `lopdf`,
//! and the same input always yields the same bytes.
//!
//! ```rust
//! use ll97_core::{calculate, BuildingInput, FactorTables, UtilityUsage};
//! use std::collections::BTreeMap;
//!
//! let tables = FactorTables::new(BTreeMap::new(), BTreeMap::new());
//! let result = calculate(&tables, &BuildingInput::new("Tower"), &UtilityUsage::default());
//! let pdf = ll97_report::render_report(&result, None).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! assert_eq!(ll97_report::report_filename("Tower"), "ll97_report_Tower.pdf");
//! ```

pub mod chart;
pub mod format;
pub mod layout;
pub mod report;

pub use chart::{decode_chart_payload, ChartImage};
pub use report::{render_report, report_filename, REPORT_TITLE};
