//! Mandatory-presence check.

use crate::coercion::is_blank;
use crate::types::{FieldRule, InvestigationRecord};

/// True when a mandatory field has no usable value.
///
/// Missing value maps, missing keys and blank strings all count as absent.
/// Non-string values (numbers, null, lists) are never blank.
pub fn is_mandatory_invalid(rule: &FieldRule, record: &InvestigationRecord) -> bool {
    if !rule.mandatory {
        return false;
    }

    let Some(values) = &record.entered_values else {
        return true;
    };

    match values.get(&rule.field_id) {
        None => true,
        Some(value) => is_blank(value),
    }
}
