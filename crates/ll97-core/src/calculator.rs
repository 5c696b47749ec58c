//! Period-by-period emissions, limits, overage and penalty.
//!
//! For every compliance period in the loaded [`FactorTables`]:
//!
//! 1. emissions per fuel = usage × period factor (missing factor = 0)
//! 2. limit per use type = area × limit factor, or `None` when the table has
//!    no entry for the pair; the total sums only the present limits
//! 3. with a positive total limit, overage = max(0, emissions − limit) and the
//!    building complies iff emissions ≤ limit; with no applicable limit, every
//!    tCO2e is overage and only a zero-emissions building complies
//! 4. penalty = overage × penalty rate when overage > 0
//!
//! The calculation is a pure function of its inputs: no I/O, no hidden state.

use crate::building::{
    BuildingInput, CalculationResult, Fuel, PeriodResult, UseTypeArea, UtilityUsage,
};
use crate::factors::FactorTables;
use crate::units::{Dollars, SquareFeet, Tco2e};
use std::collections::BTreeMap;

/// Sum floor area per use type.
///
/// Rows with an empty use-type name or a non-positive area are dropped. Use
/// types absent from the limit table are kept; they simply contribute no
/// limit later on.
pub fn aggregate_areas(use_types: &[UseTypeArea]) -> BTreeMap<String, SquareFeet> {
    let mut areas: BTreeMap<String, SquareFeet> = BTreeMap::new();
    for entry in use_types {
        if entry.use_type.is_empty() || !entry.area.is_positive() {
            continue;
        }
        let total = areas.entry(entry.use_type.clone()).or_default();
        *total = *total + entry.area;
    }
    areas
}

/// Compute results for every compliance period in `tables`.
pub fn calculate(
    tables: &FactorTables,
    building: &BuildingInput,
    usage: &UtilityUsage,
) -> CalculationResult {
    let areas = aggregate_areas(&building.use_types);
    let periods = tables
        .periods()
        .iter()
        .map(|period| calculate_period(tables, period, &areas, usage))
        .collect();

    CalculationResult {
        building_name: building.building_name.clone(),
        areas,
        utility_usage: *usage,
        periods,
    }
}

/// Compute the result for a single period from already-aggregated areas.
pub fn calculate_period(
    tables: &FactorTables,
    period: &str,
    areas: &BTreeMap<String, SquareFeet>,
    usage: &UtilityUsage,
) -> PeriodResult {
    let emissions_by_fuel: BTreeMap<Fuel, Tco2e> = Fuel::ALL
        .into_iter()
        .map(|fuel| {
            let factor = tables.emissions_factor(period, fuel);
            (fuel, Tco2e(usage.get(fuel) * factor))
        })
        .collect();
    let total_emissions: Tco2e = emissions_by_fuel.values().sum();

    let limits: BTreeMap<String, Option<Tco2e>> = areas
        .iter()
        .map(|(use_type, area)| {
            let limit = tables
                .limit_factor(use_type, period)
                .map(|factor| area.times_intensity(factor));
            (use_type.clone(), limit)
        })
        .collect();
    let total_limit: Tco2e = limits.values().flatten().sum();

    let (overage, compliance, emissions_below_limit) = if total_limit.is_positive() {
        (
            (total_emissions - total_limit).max(Tco2e::ZERO),
            total_emissions <= total_limit,
            (total_limit - total_emissions).max(Tco2e::ZERO),
        )
    } else {
        // No applicable limit: everything emitted is overage.
        (total_emissions, total_emissions == Tco2e::ZERO, Tco2e::ZERO)
    };

    let penalty = if overage.is_positive() {
        overage.times_rate(tables.penalty_rate())
    } else {
        Dollars::ZERO
    };

    PeriodResult {
        label: period.to_string(),
        limits,
        total_limit,
        total_emissions,
        overage,
        penalty,
        compliance,
        emissions_below_limit,
        emissions_by_fuel,
    }
}
