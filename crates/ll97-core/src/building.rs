//! Building inputs and calculation outputs.
//!
//! Field names serialize in camelCase so the types can be handed straight to
//! the JSON front end.

use crate::units::{Dollars, SquareFeet, Tco2e};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fuels with reported annual usage.
///
/// Declaration order is the display order in tables and the key order of
/// per-fuel maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Fuel {
    Electricity,
    Gas,
    #[serde(rename = "fuelOil2")]
    FuelOil2,
    #[serde(rename = "fuelOil4")]
    FuelOil4,
    Steam,
}

impl Fuel {
    pub const ALL: [Fuel; 5] = [
        Fuel::Electricity,
        Fuel::Gas,
        Fuel::FuelOil2,
        Fuel::FuelOil4,
        Fuel::Steam,
    ];

    /// Key of this fuel's factor in the emissions factor table.
    pub fn factor_key(self) -> &'static str {
        match self {
            Fuel::Electricity => "electricity_kwh",
            Fuel::Gas => "gas_therms",
            Fuel::FuelOil2 => "fuel_oil_2_gallons",
            Fuel::FuelOil4 => "fuel_oil_4_gallons",
            Fuel::Steam => "steam_mlb",
        }
    }

    /// Field name used in request payloads.
    pub fn field_name(self) -> &'static str {
        match self {
            Fuel::Electricity => "electricity",
            Fuel::Gas => "gas",
            Fuel::FuelOil2 => "fuelOil2",
            Fuel::FuelOil4 => "fuelOil4",
            Fuel::Steam => "steam",
        }
    }

    /// Human-readable label including the usage unit.
    pub fn label(self) -> &'static str {
        match self {
            Fuel::Electricity => "Electricity (kWh)",
            Fuel::Gas => "Gas (therms)",
            Fuel::FuelOil2 => "Fuel Oil #2 (gal)",
            Fuel::FuelOil4 => "Fuel Oil #4 (gal)",
            Fuel::Steam => "Steam (MLb)",
        }
    }

    pub fn from_factor_key(key: &str) -> Option<Fuel> {
        Fuel::ALL.into_iter().find(|fuel| fuel.factor_key() == key)
    }
}

/// Annual utility usage, one quantity per fuel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityUsage {
    pub electricity: f64,
    pub gas: f64,
    #[serde(rename = "fuelOil2")]
    pub fuel_oil_2: f64,
    #[serde(rename = "fuelOil4")]
    pub fuel_oil_4: f64,
    pub steam: f64,
}

impl UtilityUsage {
    pub fn get(&self, fuel: Fuel) -> f64 {
        match fuel {
            Fuel::Electricity => self.electricity,
            Fuel::Gas => self.gas,
            Fuel::FuelOil2 => self.fuel_oil_2,
            Fuel::FuelOil4 => self.fuel_oil_4,
            Fuel::Steam => self.steam,
        }
    }

    pub fn set(&mut self, fuel: Fuel, value: f64) {
        match fuel {
            Fuel::Electricity => self.electricity = value,
            Fuel::Gas => self.gas = value,
            Fuel::FuelOil2 => self.fuel_oil_2 = value,
            Fuel::FuelOil4 => self.fuel_oil_4 = value,
            Fuel::Steam => self.steam = value,
        }
    }

    /// Usage per fuel in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Fuel, f64)> + '_ {
        Fuel::ALL.into_iter().map(move |fuel| (fuel, self.get(fuel)))
    }
}

/// One row of the building's floor-area breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseTypeArea {
    #[serde(default)]
    pub use_type: String,
    #[serde(default)]
    pub area: SquareFeet,
}

impl UseTypeArea {
    pub fn new(use_type: impl Into<String>, area: f64) -> Self {
        Self {
            use_type: use_type.into(),
            area: SquareFeet(area),
        }
    }
}

/// Building identity and floor-area breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingInput {
    pub building_name: String,
    pub use_types: Vec<UseTypeArea>,
}

impl BuildingInput {
    pub fn new(building_name: impl Into<String>) -> Self {
        Self {
            building_name: building_name.into(),
            use_types: Vec::new(),
        }
    }

    pub fn with_use_type(mut self, use_type: impl Into<String>, area: f64) -> Self {
        self.use_types.push(UseTypeArea::new(use_type, area));
        self
    }
}

/// Emissions, limit and penalty figures for one compliance period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodResult {
    pub label: String,
    /// Limit per use type; `None` when the limit table has no factor for the
    /// (use type, period) pair.
    pub limits: BTreeMap<String, Option<Tco2e>>,
    pub total_limit: Tco2e,
    pub total_emissions: Tco2e,
    pub overage: Tco2e,
    pub penalty: Dollars,
    pub compliance: bool,
    pub emissions_below_limit: Tco2e,
    pub emissions_by_fuel: BTreeMap<Fuel, Tco2e>,
}

/// Full calculation output for one building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub building_name: String,
    pub areas: BTreeMap<String, SquareFeet>,
    pub utility_usage: UtilityUsage,
    pub periods: Vec<PeriodResult>,
}

impl CalculationResult {
    pub fn period(&self, label: &str) -> Option<&PeriodResult> {
        self.periods.iter().find(|p| p.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_factor_keys_roundtrip() {
        for fuel in Fuel::ALL {
            assert_eq!(Fuel::from_factor_key(fuel.factor_key()), Some(fuel));
        }
        assert_eq!(Fuel::from_factor_key("coal_tons"), None);
    }

    #[test]
    fn test_fuel_serializes_as_payload_field() {
        for fuel in Fuel::ALL {
            let json = serde_json::to_string(&fuel).unwrap();
            assert_eq!(json, format!("\"{}\"", fuel.field_name()));
        }
    }

    #[test]
    fn test_utility_usage_field_names() {
        let usage: UtilityUsage =
            serde_json::from_str(r#"{"electricity": 10, "fuelOil2": 3, "steam": 1.5}"#).unwrap();
        assert_eq!(usage.get(Fuel::Electricity), 10.0);
        assert_eq!(usage.get(Fuel::FuelOil2), 3.0);
        assert_eq!(usage.get(Fuel::Gas), 0.0);
        assert_eq!(usage.get(Fuel::Steam), 1.5);
    }

    #[test]
    fn test_set_and_iter_follow_fuel_order() {
        let mut usage = UtilityUsage::default();
        usage.set(Fuel::FuelOil4, 7.0);
        let fuels: Vec<Fuel> = usage.iter().map(|(fuel, _)| fuel).collect();
        assert_eq!(fuels, Fuel::ALL.to_vec());
        assert_eq!(usage.fuel_oil_4, 7.0);
    }

    #[test]
    fn test_building_input_defaults() {
        let building: BuildingInput = serde_json::from_str("{}").unwrap();
        assert!(building.building_name.is_empty());
        assert!(building.use_types.is_empty());
    }
}
