use ll97_io::{load_factor_tables, load_payload, resolve_factor_tables};
use std::fs;
use tempfile::tempdir;

const EMISSIONS: &str = r#"
// test coefficients
{
  "2024-2029": { "electricity_kwh": 0.0005, "gas_therms": 0.005 },
  "2030-2034": { "electricity_kwh": 0.0005 }
}
"#;

const LIMITS: &str = r#"
// test limits
{
  "Office": { "2024-2029": 0.01, "2030-2034": 0.00001 },
  "Hotel": { "2035-2039": 0.002 }
}
"#;

#[test]
fn load_tables_from_disk_and_calculate() {
    let dir = tempdir().unwrap();
    let emissions = dir.path().join("emissions.json");
    let limits = dir.path().join("limits.json");
    fs::write(&emissions, EMISSIONS).unwrap();
    fs::write(&limits, LIMITS).unwrap();

    let tables = load_factor_tables(&emissions, &limits).unwrap();
    assert_eq!(tables.periods(), ["2024-2029", "2030-2034", "2035-2039"]);

    let payload_path = dir.path().join("payload.json");
    fs::write(
        &payload_path,
        r#"{"buildingName": "Disk", "useTypes": [{"useType": "Office", "area": 10000}], "electricity": 1000}"#,
    )
    .unwrap();
    let payload = load_payload(&payload_path).unwrap();
    let result = ll97_core::calculate(&tables, &payload.building(), &payload.usage());

    let first = result.period("2024-2029").unwrap();
    assert!(first.compliance);
    let second = result.period("2030-2034").unwrap();
    assert!((second.penalty.value() - 107.2).abs() < 1e-6);
}

#[test]
fn mixed_sources_use_bundled_for_missing_table() {
    let dir = tempdir().unwrap();
    let limits = dir.path().join("limits.json");
    fs::write(&limits, LIMITS).unwrap();

    let tables = resolve_factor_tables(None, Some(&limits), 268.0).unwrap();
    assert_eq!(tables.limit_table().len(), 2);
    // bundled emissions table still provides electricity factors
    assert!(tables.emissions_factor("2024-2029", ll97_core::Fuel::Electricity) > 0.0);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let absent = dir.path().join("nope.json");
    let err = resolve_factor_tables(Some(&absent), None, 268.0).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn malformed_table_is_an_error() {
    let dir = tempdir().unwrap();
    let emissions = dir.path().join("emissions.json");
    fs::write(&emissions, "// only a comment\n{ \"2024-2029\": [1, 2] }").unwrap();
    assert!(resolve_factor_tables(Some(&emissions), None, 268.0).is_err());
}
