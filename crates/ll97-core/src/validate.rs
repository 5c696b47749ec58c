//! Input checks that report problems without rejecting the building.

use crate::building::{BuildingInput, UtilityUsage};
use crate::diagnostics::Diagnostics;
use crate::factors::FactorTables;
use std::collections::BTreeSet;

/// Collect warnings about a building and its usage against `tables`.
///
/// Nothing here changes what [`crate::calculate`] returns; the findings are
/// for logging and for the CLI `validate` command.
pub fn validate_building(
    tables: &FactorTables,
    building: &BuildingInput,
    usage: &UtilityUsage,
) -> Diagnostics {
    let mut diag = Diagnostics::new();
    let mut unknown = BTreeSet::new();

    for (idx, row) in building.use_types.iter().enumerate() {
        let entity = if row.use_type.is_empty() {
            format!("row {}", idx + 1)
        } else {
            row.use_type.clone()
        };
        if row.area.value() < 0.0 {
            diag.add_warning_with_entity("input", "negative area", &entity);
        }
        if row.use_type.is_empty() {
            diag.add_warning_with_entity("input", "use type name is empty; row ignored", &entity);
        } else if !row.area.is_positive() {
            diag.add_warning_with_entity("input", "area is not positive; row ignored", &entity);
        } else if !tables.has_use_type(&row.use_type) {
            unknown.insert(row.use_type.clone());
        }
    }

    for use_type in unknown {
        diag.add_warning_with_entity(
            "reference",
            "use type has no limit factors; it contributes no limit",
            &use_type,
        );
    }

    for (fuel, value) in usage.iter() {
        if value < 0.0 {
            diag.add_warning_with_entity("input", "negative usage", fuel.field_name());
        }
    }

    diag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::{EmissionsFactorTable, LimitFactorTable};
    use std::collections::BTreeMap;

    fn tables() -> FactorTables {
        let mut limits = LimitFactorTable::new();
        limits.insert(
            "Office".into(),
            BTreeMap::from([("2024-2029".to_string(), 0.00758)]),
        );
        FactorTables::new(EmissionsFactorTable::new(), limits)
    }

    #[test]
    fn test_clean_input_has_no_issues() {
        let building = BuildingInput::new("HQ").with_use_type("Office", 5_000.0);
        let usage = UtilityUsage {
            electricity: 100.0,
            ..UtilityUsage::default()
        };
        assert!(!validate_building(&tables(), &building, &usage).has_issues());
    }

    #[test]
    fn test_reports_each_problem() {
        let building = BuildingInput::new("Odd")
            .with_use_type("Office", -20.0)
            .with_use_type("", 100.0)
            .with_use_type("Spaceport", 10.0)
            .with_use_type("Spaceport", 30.0);
        let usage = UtilityUsage {
            gas: -1.0,
            ..UtilityUsage::default()
        };
        let diag = validate_building(&tables(), &building, &usage);

        // negative area + ignored Office row, empty name, one unknown use type, negative gas
        assert_eq!(diag.warning_count(), 5);
        assert_eq!(diag.issues_by_category("reference").count(), 1);
        assert!(!diag.has_errors());
        assert!(diag
            .issues
            .iter()
            .any(|issue| issue.entity.as_deref() == Some("gas")));
    }
}
