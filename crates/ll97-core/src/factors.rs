//! Emissions and limit factor tables.
//!
//! Two lookup tables drive every calculation:
//!
//! - **Emissions factors**: period → factor key → tCO2e per unit of usage
//!   (e.g. `"2024-2029" → "electricity_kwh" → 0.000288962`).
//! - **Limit factors**: use type → period → tCO2e per square foot
//!   (e.g. `"Office" → "2024-2029" → 0.00758`).
//!
//! The compliance periods are the union of the period keys found in the limit
//! table. They are computed once in [`FactorTables::new`] so calculation and
//! reporting always agree on the same sorted list.

use crate::building::Fuel;
use crate::diagnostics::Diagnostics;
use std::collections::{BTreeMap, BTreeSet};

/// Dollars charged per tCO2e of overage.
pub const DEFAULT_PENALTY_RATE: f64 = 268.0;

/// period → factor key → tCO2e per unit
pub type EmissionsFactorTable = BTreeMap<String, BTreeMap<String, f64>>;

/// use type → period → tCO2e per square foot
pub type LimitFactorTable = BTreeMap<String, BTreeMap<String, f64>>;

/// Immutable reference data for the calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTables {
    emissions: EmissionsFactorTable,
    limits: LimitFactorTable,
    periods: Vec<String>,
    penalty_rate: f64,
}

impl FactorTables {
    pub fn new(emissions: EmissionsFactorTable, limits: LimitFactorTable) -> Self {
        let periods: BTreeSet<&String> = limits
            .values()
            .flat_map(|by_period| by_period.keys())
            .collect();
        let periods = periods.into_iter().cloned().collect();
        Self {
            emissions,
            limits,
            periods,
            penalty_rate: DEFAULT_PENALTY_RATE,
        }
    }

    pub fn with_penalty_rate(mut self, rate: f64) -> Self {
        self.penalty_rate = rate;
        self
    }

    /// Compliance periods, sorted ascending by label.
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn penalty_rate(&self) -> f64 {
        self.penalty_rate
    }

    pub fn emissions_table(&self) -> &EmissionsFactorTable {
        &self.emissions
    }

    pub fn limit_table(&self) -> &LimitFactorTable {
        &self.limits
    }

    /// Emissions factor for `fuel` in `period`; 0 when the table has none.
    pub fn emissions_factor(&self, period: &str, fuel: Fuel) -> f64 {
        self.emissions
            .get(period)
            .and_then(|factors| factors.get(fuel.factor_key()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Limit factor for `use_type` in `period`, if the table defines one.
    pub fn limit_factor(&self, use_type: &str, period: &str) -> Option<f64> {
        self.limits
            .get(use_type)
            .and_then(|by_period| by_period.get(period))
            .copied()
    }

    pub fn has_use_type(&self, use_type: &str) -> bool {
        self.limits.contains_key(use_type)
    }

    /// Use types with limit factors, sorted by name.
    pub fn use_types(&self) -> impl Iterator<Item = &str> {
        self.limits.keys().map(String::as_str)
    }

    /// Consistency findings for the loaded tables.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diag = Diagnostics::new();

        for period in &self.periods {
            if !self.emissions.contains_key(period) {
                diag.add_warning_with_entity(
                    "table",
                    "period has limit factors but no emissions factors; emissions will be zero",
                    period,
                );
            }
        }

        for (period, factors) in &self.emissions {
            for (key, value) in factors {
                let entity = format!("{period}/{key}");
                if Fuel::from_factor_key(key).is_none() {
                    diag.add_warning_with_entity(
                        "table",
                        "emissions factor key matches no known fuel",
                        &entity,
                    );
                }
                if *value < 0.0 {
                    diag.add_error_with_entity("table", "negative emissions factor", &entity);
                }
            }
        }

        for (use_type, by_period) in &self.limits {
            for (period, value) in by_period {
                if *value < 0.0 {
                    diag.add_error_with_entity(
                        "table",
                        "negative limit factor",
                        &format!("{use_type}/{period}"),
                    );
                }
            }
        }

        if !self.penalty_rate.is_finite() || self.penalty_rate < 0.0 {
            diag.add_error("config", "penalty rate must be a non-negative number");
        }

        diag
    }
}
