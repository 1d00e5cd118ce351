//! Unit-selection check.

use crate::types::{FieldRule, InvestigationRecord};

/// Key under which the selected unit for `field_id` is entered.
pub fn unit_key(field_id: &str) -> String {
    format!("{}_unit", field_id)
}

/// True when no unit is required, or when a unit entry is present.
///
/// Only the presence of the unit key is checked, never its content.
pub fn validate_unit(rule: &FieldRule, record: &InvestigationRecord) -> bool {
    match &rule.unit_list {
        None => true,
        Some(units) if units.is_empty() => true,
        Some(_) => record
            .entered_values
            .as_ref()
            .is_some_and(|values| values.contains_key(&unit_key(&rule.field_id))),
    }
}
