//! Request payloads as sent by the web front end.
//!
//! Browsers send whatever the form produced: numbers, `null`, numeric
//! strings, sometimes an empty string. Numeric fields here accept all of
//! those (`null` and `""` become 0) and reject anything else, which surfaces
//! as a malformed request.

use anyhow::{Context, Result};
use ll97_core::{BuildingInput, UseTypeArea, UtilityUsage};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Building description, utility usage and optional chart image.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildingPayload {
    #[serde(deserialize_with = "nullable_string")]
    pub building_name: String,
    #[serde(deserialize_with = "nullable_vec")]
    pub use_types: Vec<UseTypePayload>,
    #[serde(deserialize_with = "lenient_f64")]
    pub electricity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub gas: f64,
    #[serde(rename = "fuelOil2", deserialize_with = "lenient_f64")]
    pub fuel_oil_2: f64,
    #[serde(rename = "fuelOil4", deserialize_with = "lenient_f64")]
    pub fuel_oil_4: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub steam: f64,
    /// PNG (or other raster) chart as a data URL or raw base64.
    pub chart_image_base64: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UseTypePayload {
    #[serde(deserialize_with = "nullable_string")]
    pub use_type: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub area: f64,
}

impl BuildingPayload {
    pub fn building(&self) -> BuildingInput {
        BuildingInput {
            building_name: self.building_name.clone(),
            use_types: self
                .use_types
                .iter()
                .map(|row| UseTypeArea::new(row.use_type.clone(), row.area))
                .collect(),
        }
    }

    pub fn usage(&self) -> UtilityUsage {
        UtilityUsage {
            electricity: self.electricity,
            gas: self.gas,
            fuel_oil_2: self.fuel_oil_2,
            fuel_oil_4: self.fuel_oil_4,
            steam: self.steam,
        }
    }
}

pub fn parse_payload(text: &str) -> Result<BuildingPayload> {
    serde_json::from_str(text).context("parsing building payload")
}

pub fn load_payload(path: &Path) -> Result<BuildingPayload> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading payload '{}'", path.display()))?;
    parse_payload(&text).with_context(|| format!("in '{}'", path.display()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => 0.0,
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed
                    .parse::<f64>()
                    .map_err(|_| de::Error::custom(format!("'{trimmed}' is not a number")))?
            }
        }
    };
    if !value.is_finite() {
        return Err(de::Error::custom("numeric fields must be finite"));
    }
    Ok(value)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ll97_core::{Fuel, SquareFeet};

    #[test]
    fn test_full_payload() {
        let payload = parse_payload(
            r#"{
                "buildingName": "Tower One",
                "useTypes": [{"useType": "Office", "area": 10000}],
                "electricity": 1000, "gas": 0, "fuelOil2": 0, "fuelOil4": 0, "steam": 0,
                "chartImageBase64": "data:image/png;base64,AAAA"
            }"#,
        )
        .unwrap();
        assert_eq!(payload.building_name, "Tower One");
        assert_eq!(payload.building().use_types[0].area, SquareFeet(10_000.0));
        assert_eq!(payload.usage().get(Fuel::Electricity), 1_000.0);
        assert_eq!(
            payload.chart_image_base64.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_missing_and_null_fields_default_to_zero() {
        let payload = parse_payload(
            r#"{"buildingName": null, "useTypes": null, "gas": null, "steam": ""}"#,
        )
        .unwrap();
        assert_eq!(payload.building_name, "");
        assert!(payload.use_types.is_empty());
        assert_eq!(payload.usage(), UtilityUsage::default());
        assert!(payload.chart_image_base64.is_none());
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let payload = parse_payload(
            r#"{"electricity": " 1500.5 ", "useTypes": [{"useType": "Hotel", "area": "200"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.electricity, 1_500.5);
        assert_eq!(payload.use_types[0].area, 200.0);
    }

    #[test]
    fn test_non_numeric_values_are_rejected() {
        assert!(parse_payload(r#"{"gas": "lots"}"#).is_err());
        assert!(parse_payload(r#"{"gas": true}"#).is_err());
        assert!(parse_payload(r#"{"gas": "NaN"}"#).is_err());
        assert!(parse_payload(r#"{"useTypes": [{"area": [1]}]}"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(parse_payload("{\"buildingName\": ").is_err());
    }
}
