//! Record and field orchestration.
//!
//! A batch is validated in two passes over the caller's records:
//!
//! 1. **Lab-technician pre-check** (lab technicians only): when nobody in the
//!    batch entered results, or in community mode, every record without
//!    results is rejected and its dropdown toggled.
//! 2. **Per-field pass** over records that have no id or have results: each
//!    record's form-layout rules are checked in order, stopping at the first
//!    failing field.
//!
//! Records that hold an empty value map, or expose no rules, are accepted in
//! pass 2 and reset the overall verdict to valid, even after an earlier
//! rejection.
//!
//! Every check computes an [`Annotation`]; only the orchestrator writes to
//! records.

use tracing::{debug, error, warn};

use crate::checks::{is_mandatory_invalid, validate_unit, ConstraintChecks, StandardChecks, Verdict};
use crate::coercion::is_blank;
use crate::config::ValidatorConfig;
use crate::types::{Annotation, FieldRule, InvestigationRecord};
use crate::{ValidationError, ValidationFault};

/// Message attached to records missing required data.
pub const REQUIRED_DATA_MESSAGE: &str = "Please enter required data";

/// Message used when the constraint group cannot reach a verdict.
pub const CHECK_FAULT_MESSAGE: &str = "Validation error occurred";

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    pub valid: bool,
    pub annotation: Annotation,
}

impl FieldOutcome {
    fn pass() -> Self {
        Self {
            valid: true,
            annotation: Annotation::default(),
        }
    }

    fn fail(annotation: Annotation) -> Self {
        Self {
            valid: false,
            annotation,
        }
    }
}

/// Outcome of the per-field pass for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordOutcome {
    /// Nothing to check: the batch verdict is forced back to valid
    Accepted,

    /// Rules were walked
    Checked { valid: bool, annotation: Annotation },
}

/// Validates investigation records against their form-layout rules.
#[derive(Debug, Clone, Default)]
pub struct InvestigationValidator<C = StandardChecks> {
    community: bool,
    checks: C,
}

impl InvestigationValidator {
    pub fn new(community: bool) -> Self {
        Self {
            community,
            checks: StandardChecks,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.community)
    }
}

impl<C: ConstraintChecks> InvestigationValidator<C> {
    /// Use a different constraint group.
    pub fn with_checks(community: bool, checks: C) -> Self {
        Self { community, checks }
    }

    pub fn is_community(&self) -> bool {
        self.community
    }

    /// Validate a batch of records in place.
    ///
    /// `None` means there is nothing that can be validated and yields
    /// `Ok(false)`; an empty batch is vacuously valid. The records' error
    /// message, error flag and dropdown state are updated as a side effect.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Failed`] when a record's form response is
    /// structurally unusable.
    pub fn validate(
        &self,
        lab_technician: bool,
        records: Option<&mut [InvestigationRecord]>,
    ) -> Result<bool, ValidationError> {
        let Some(records) = records else {
            warn!("no investigation records supplied, validation failed");
            return Ok(false);
        };

        self.validate_records(lab_technician, records)
            .map_err(|fault| {
                error!(%fault, "validation error");
                ValidationError::Failed(fault.to_string())
            })
    }

    fn validate_records(
        &self,
        lab_technician: bool,
        records: &mut [InvestigationRecord],
    ) -> Result<bool, ValidationFault> {
        let mut is_valid = true;

        if lab_technician && !self.lab_technician_precheck(records) {
            is_valid = false;
        }

        for record in records
            .iter_mut()
            .filter(|r| r.record_id.is_none() || r.has_entered_results())
        {
            match self.check_record(record)? {
                RecordOutcome::Accepted => {
                    debug!(test = %record.test_name, "record accepted without field checks");
                    is_valid = true;
                    Annotation::accepted().apply(record);
                }
                RecordOutcome::Checked { valid, annotation } => {
                    debug!(test = %record.test_name, valid, "record fields checked");
                    annotation.apply(record);
                    if !valid {
                        is_valid = false;
                    }
                }
            }
        }

        Ok(is_valid)
    }

    /// Returns false when any record was rejected. Visits every record.
    fn lab_technician_precheck(&self, records: &mut [InvestigationRecord]) -> bool {
        let any_results_entered = records.iter().any(InvestigationRecord::has_entered_results);
        if !self.community && any_results_entered {
            return true;
        }

        let mut passed = true;
        for record in records.iter_mut().filter(|r| !r.has_entered_results()) {
            debug!(test = %record.test_name, "no results entered");
            Annotation::rejected(REQUIRED_DATA_MESSAGE)
                .toggled()
                .apply(record);
            passed = false;
        }
        passed
    }

    fn check_record(&self, record: &InvestigationRecord) -> Result<RecordOutcome, ValidationFault> {
        if record.has_empty_values() {
            return Ok(RecordOutcome::Accepted);
        }

        let rules = match &record.form_response {
            Some(response) => response.form_layout()?,
            None => None,
        };
        let Some(rules) = rules.filter(|rules| !rules.is_empty()) else {
            return Ok(RecordOutcome::Accepted);
        };

        let mut annotation = Annotation::default();
        for rule in &rules {
            let outcome = self.evaluate_field(rule, record);
            annotation = annotation.then(outcome.annotation);
            if !outcome.valid {
                return Ok(RecordOutcome::Checked {
                    valid: false,
                    annotation,
                });
            }
        }

        Ok(RecordOutcome::Checked {
            valid: true,
            annotation,
        })
    }

    /// Check one field and annotate the record with the result.
    pub fn validate_field(&self, rule: &FieldRule, record: &mut InvestigationRecord) -> bool {
        let outcome = self.evaluate_field(rule, record);
        outcome.annotation.apply(record);
        outcome.valid
    }

    /// Mandatory check first, then the free-text checks.
    pub fn evaluate_field(&self, rule: &FieldRule, record: &InvestigationRecord) -> FieldOutcome {
        if is_mandatory_invalid(rule, record) {
            return FieldOutcome::fail(Annotation::rejected(REQUIRED_DATA_MESSAGE));
        }

        if !rule.kind.is_free_text() {
            return FieldOutcome::pass();
        }

        self.evaluate_free_text(rule, record)
    }

    /// Check a free-text field and annotate the record with the result.
    pub fn validate_free_text(&self, rule: &FieldRule, record: &mut InvestigationRecord) -> bool {
        let outcome = self.evaluate_free_text(rule, record);
        outcome.annotation.apply(record);
        outcome.valid
    }

    /// A fault in the constraint group fails that group only; the unit
    /// check still runs.
    fn evaluate_free_text(&self, rule: &FieldRule, record: &InvestigationRecord) -> FieldOutcome {
        let Some(value) = record.value(&rule.field_id) else {
            return FieldOutcome::pass();
        };

        if is_blank(value) && !rule.mandatory {
            return FieldOutcome::pass();
        }

        let verdict = self.checks.check(value, rule).unwrap_or_else(|fault| {
            error!(field = %rule.field_id, %fault, "constraint check error");
            Verdict::fail(CHECK_FAULT_MESSAGE)
        });
        let unit_valid = validate_unit(rule, record);
        let valid = verdict.valid && unit_valid;

        let mut annotation = Annotation::flag(valid);
        if let Some(message) = verdict.message {
            annotation = annotation.with_message(format!("{} ({})", message, rule.title));
        }

        FieldOutcome { valid, annotation }
    }
}
