use labform_core::{
    validate, EnteredValues, FieldRule, FormResponse, InvestigationBatch, InvestigationRecord,
    InvestigationValidator, ValidationError, REQUIRED_DATA_MESSAGE,
};
use serde_json::{json, Value};

fn values(pairs: &[(&str, Value)]) -> EnteredValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn investigation() -> InvestigationRecord {
    InvestigationRecord::new("Test", "Doctor", "2024-01-01")
}

/// Validate a single record carrying one rule and one entered value.
fn validate_single(rule: FieldRule, value: Value) -> (bool, InvestigationRecord) {
    let field_id = rule.field_id.clone();
    let mut records = vec![investigation()
        .with_id("inv-1")
        .with_values(values(&[(field_id.as_str(), value)]))
        .with_rules(vec![rule])];
    let valid = validate(false, false, Some(&mut records[..])).unwrap();
    (valid, records.remove(0))
}

#[test]
fn absent_batch_is_invalid() {
    assert!(!validate(false, false, None).unwrap());
}

#[test]
fn empty_batch_is_valid() {
    assert!(validate(false, true, Some(&mut [])).unwrap());
}

#[test]
fn minimum_length_message() {
    let (valid, record) = validate_single(
        FieldRule::free_text("test_field", "Test Field").with_min_length(5),
        json!("abc"),
    );
    assert!(!valid);
    assert!(record
        .error_message
        .unwrap()
        .contains("Minimum length required: 5"));
}

#[test]
fn range_between_bounds() {
    let rule = FieldRule::free_text("test_field", "Test Field")
        .with_min_value(10.0)
        .with_max_value(100.0);

    let (valid, record) = validate_single(rule.clone(), json!("5.0"));
    assert!(!valid);
    assert!(record
        .error_message
        .unwrap()
        .contains("Value must be between 10.0 and 100.0"));

    let (valid, record) = validate_single(rule, json!("50.0"));
    assert!(valid);
    assert!(record.error_flag);
}

#[test]
fn range_single_bounds() {
    let (_, record) = validate_single(
        FieldRule::free_text("test_field", "Test Field").with_min_value(10.0),
        json!("5.0"),
    );
    assert_eq!(
        record.error_message.as_deref(),
        Some("Minimum value required: 10.0 (Test Field)")
    );

    let (_, record) = validate_single(
        FieldRule::free_text("test_field", "Test Field").with_max_value(100.0),
        json!("150.0"),
    );
    assert_eq!(
        record.error_message.as_deref(),
        Some("Maximum value allowed: 100.0 (Test Field)")
    );
}

#[test]
fn unit_selection_required() {
    let rule = FieldRule::free_text("test_field", "Test Field")
        .with_units(vec![json!({ "unit": "mg/dL" })]);

    let (valid, _) = validate_single(rule.clone(), json!("100"));
    assert!(!valid);

    let mut records = vec![investigation()
        .with_values(values(&[
            ("test_field", json!("100")),
            ("test_field_unit", json!("mg/dL")),
        ]))
        .with_rules(vec![rule])];
    assert!(validate(false, false, Some(&mut records[..])).unwrap());
}

#[test]
fn exact_content_length() {
    let rule = FieldRule::free_text("test_field", "Test Field").with_content_length(4);

    let (valid, record) = validate_single(rule.clone(), json!("12345"));
    assert!(!valid);
    assert_eq!(
        record.error_message.as_deref(),
        Some("Length must be exactly 4 characters (Test Field)")
    );

    let (valid, _) = validate_single(rule, json!("1234"));
    assert!(valid);
}

#[test]
fn empty_value_map_is_always_valid() {
    let mut records = vec![investigation()
        .with_values(EnteredValues::new())
        .with_rules(vec![FieldRule::free_text("test_field", "Test Field").mandatory()])];

    assert!(validate(false, false, Some(&mut records[..])).unwrap());
    assert_eq!(records[0].error_message, None);
    assert!(records[0].error_flag);
}

#[test]
fn non_free_text_ignores_content() {
    let (valid, record) = validate_single(
        FieldRule::new("Spinner", "test_field", "Test Field").with_min_length(10),
        json!("a"),
    );
    assert!(valid);
    assert_eq!(record.error_message, None);
}

#[test]
fn lab_technician_without_results_marks_every_record() {
    let mut records = vec![
        investigation().with_id("inv-1"),
        investigation().with_id("inv-2"),
    ];
    records[1].dropdown_expanded = true;

    assert!(!validate(false, true, Some(&mut records[..])).unwrap());
    assert!(records[0].dropdown_expanded);
    assert!(!records[1].dropdown_expanded);
    for record in &records {
        assert_eq!(record.error_message.as_deref(), Some(REQUIRED_DATA_MESSAGE));
        assert!(!record.error_flag);
    }
}

#[test]
fn lab_technician_with_results_is_not_forced_invalid() {
    let mut records = vec![investigation().with_values(values(&[("test_field", json!("value"))]))];
    assert!(validate(false, true, Some(&mut records[..])).unwrap());
}

#[test]
fn structural_mismatch_surfaces_as_validation_error() {
    let mut records = vec![investigation()
        .with_values(values(&[("test_field", json!("value"))]))
        .with_form_response(FormResponse(json!({ "formLayout": [{ "title": "no id" }] })))];

    let result = InvestigationValidator::new(false).validate(false, Some(&mut records[..]));
    assert!(matches!(result, Err(ValidationError::Failed(_))));
}

#[test]
fn batch_fixture_end_to_end() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/lipid_batch.yaml");
    let mut batch = InvestigationBatch::from_file(path).unwrap();

    let report = InvestigationValidator::new(false)
        .validate_batch(&mut batch)
        .unwrap();

    // The blood-group record has no failing fields, so it does not reset
    // the verdict set by the lipid record.
    assert!(!report.valid);
    assert_eq!(
        report.records[0].error_message.as_deref(),
        Some("Value must be between 0.0 and 190.0 (LDL)")
    );
    assert!(!report.records[0].error_flag);
    assert_eq!(report.records[1].error_message, None);
    assert!(report.records[1].error_flag);
}
