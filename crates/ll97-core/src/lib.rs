//! # ll97-core: Building Emissions Compliance
//!
//! Computes annual greenhouse gas emissions, legal emissions limits, overage
//! and penalties for a building under an LL97-style emissions law.
//!
//! ## Model
//!
//! - A building is a set of **use types** (Office, Hotel, ...) with floor areas.
//! - Annual **utility usage** is reported per [`Fuel`].
//! - [`FactorTables`] hold emissions factors per period and fuel, and limit
//!   factors per use type and period. The compliance periods are derived from
//!   the limit table when the tables are constructed.
//!
//! ## Quick Start
//!
//! ```rust
//! use ll97_core::*;
//! use std::collections::BTreeMap;
//!
//! let mut emissions = EmissionsFactorTable::new();
//! emissions.insert(
//!     "2024-2029".into(),
//!     BTreeMap::from([("electricity_kwh".to_string(), 0.0005)]),
//! );
//! let mut limits = LimitFactorTable::new();
//! limits.insert("Office".into(), BTreeMap::from([("2024-2029".to_string(), 0.01)]));
//! let tables = FactorTables::new(emissions, limits);
//!
//! let building = BuildingInput::new("HQ").with_use_type("Office", 10_000.0);
//! let usage = UtilityUsage { electricity: 1_000.0, ..UtilityUsage::default() };
//!
//! let result = calculate(&tables, &building, &usage);
//! let period = &result.periods[0];
//! assert!(period.compliance);
//! assert!((period.total_limit.value() - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - the period-by-period calculation
//! - [`factors`] - factor tables and the derived period list
//! - [`validate`] - non-fatal input checks
//! - [`diagnostics`] - issue collection shared by the validators
//! - [`units`] - unit-safe quantities

pub mod building;
pub mod calculator;
pub mod diagnostics;
pub mod error;
pub mod factors;
pub mod units;
pub mod validate;

pub use building::{
    BuildingInput, CalculationResult, Fuel, PeriodResult, UseTypeArea, UtilityUsage,
};
pub use calculator::{aggregate_areas, calculate, calculate_period};
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{Ll97Error, Ll97Result};
pub use factors::{EmissionsFactorTable, FactorTables, LimitFactorTable, DEFAULT_PENALTY_RATE};
pub use units::{Dollars, SquareFeet, Tco2e};
pub use validate::validate_building;
