//! Length, range and exact-length constraints for free-text fields.
//!
//! The three constraints are mutually exclusive, tried in a fixed order:
//!
//! 1. minimum length (string values only)
//! 2. numeric range, when either bound is set
//! 3. exact content length
//!
//! The first whose precondition holds is the only one evaluated. Minimum
//! length only claims the value when it fails, so a string that is long
//! enough still goes on to the range check. A set range bound, on the other
//! hand, always shadows the exact-length constraint.

use serde_json::Value;

use crate::coercion::{display_value, format_number, to_number};
use crate::types::FieldRule;

use super::Verdict;

pub fn check_constraints(value: &Value, rule: &FieldRule) -> Verdict {
    if let (Some(min_length), Value::String(text)) = (rule.min_length, value) {
        if rule.kind.is_free_text() && text.chars().count() < min_length {
            return Verdict::fail(format!("Minimum length required: {}", min_length));
        }
    }

    if rule.min_value.is_some() || rule.max_value.is_some() {
        return check_range(value, rule.min_value, rule.max_value);
    }

    if let Some(expected) = rule.content_length {
        if display_value(value).chars().count() != expected {
            return Verdict::fail(format!(
                "Length must be exactly {} characters",
                expected
            ));
        }
    }

    Verdict::pass()
}

/// Non-numeric input is not a range failure.
fn check_range(value: &Value, min: Option<f64>, max: Option<f64>) -> Verdict {
    let Some(number) = to_number(value) else {
        return Verdict::pass();
    };

    match (min, max) {
        (Some(min), Some(max)) if number < min || number > max => Verdict::fail(format!(
            "Value must be between {} and {}",
            format_number(min),
            format_number(max)
        )),
        (Some(min), None) if number < min => {
            Verdict::fail(format!("Minimum value required: {}", format_number(min)))
        }
        (None, Some(max)) if number > max => {
            Verdict::fail(format!("Maximum value allowed: {}", format_number(max)))
        }
        _ => Verdict::pass(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field() -> FieldRule {
        FieldRule::free_text("result", "Result")
    }

    #[test]
    fn test_min_length() {
        let rule = field().with_min_length(5);
        assert_eq!(
            check_constraints(&json!("abc"), &rule),
            Verdict::fail("Minimum length required: 5")
        );
        assert!(check_constraints(&json!("abcde"), &rule).is_pass());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let rule = field().with_min_length(4);
        assert!(!check_constraints(&json!("µµµ"), &rule).is_pass());
    }

    #[test]
    fn test_min_length_ignores_numbers() {
        let rule = field().with_min_length(5);
        assert!(check_constraints(&json!(12), &rule).is_pass());
    }

    #[test]
    fn test_min_length_only_for_free_text() {
        let rule = FieldRule::new("Spinner", "result", "Result").with_min_length(5);
        assert!(check_constraints(&json!("abc"), &rule).is_pass());
    }

    #[test]
    fn test_range_between() {
        let rule = field().with_min_value(10.0).with_max_value(100.0);
        assert_eq!(
            check_constraints(&json!("5.0"), &rule),
            Verdict::fail("Value must be between 10.0 and 100.0")
        );
        assert_eq!(
            check_constraints(&json!(150), &rule),
            Verdict::fail("Value must be between 10.0 and 100.0")
        );
        assert!(check_constraints(&json!("50.0"), &rule).is_pass());
        assert!(check_constraints(&json!("10"), &rule).is_pass());
        assert!(check_constraints(&json!("100"), &rule).is_pass());
    }

    #[test]
    fn test_range_min_only() {
        let rule = field().with_min_value(10.0);
        assert_eq!(
            check_constraints(&json!("5.0"), &rule),
            Verdict::fail("Minimum value required: 10.0")
        );
        assert!(check_constraints(&json!("1e6"), &rule).is_pass());
    }

    #[test]
    fn test_range_max_only() {
        let rule = field().with_max_value(100.0);
        assert_eq!(
            check_constraints(&json!("150.0"), &rule),
            Verdict::fail("Maximum value allowed: 100.0")
        );
        assert!(check_constraints(&json!(-4), &rule).is_pass());
    }

    #[test]
    fn test_range_skips_non_numeric() {
        let rule = field().with_min_value(10.0).with_max_value(100.0);
        assert!(check_constraints(&json!("high"), &rule).is_pass());
        assert!(check_constraints(&json!([1]), &rule).is_pass());
    }

    #[test]
    fn test_exact_content_length() {
        let rule = field().with_content_length(4);
        assert_eq!(
            check_constraints(&json!("12345"), &rule),
            Verdict::fail("Length must be exactly 4 characters")
        );
        assert!(check_constraints(&json!("1234"), &rule).is_pass());
        assert!(check_constraints(&json!(1234), &rule).is_pass());
    }

    #[test]
    fn test_short_string_stops_at_min_length() {
        let rule = field()
            .with_min_length(5)
            .with_min_value(10.0)
            .with_content_length(2);
        assert_eq!(
            check_constraints(&json!("1"), &rule),
            Verdict::fail("Minimum length required: 5")
        );
    }

    #[test]
    fn test_long_enough_string_falls_through_to_range() {
        let rule = field().with_min_length(2).with_min_value(10.0);
        assert_eq!(
            check_constraints(&json!("5.0"), &rule),
            Verdict::fail("Minimum value required: 10.0")
        );
        assert!(check_constraints(&json!("12.0"), &rule).is_pass());
    }

    #[test]
    fn test_boolean_is_range_checked() {
        let rule = field().with_min_value(10.0);
        assert_eq!(
            check_constraints(&json!(true), &rule),
            Verdict::fail("Minimum value required: 10.0")
        );
    }

    #[test]
    fn test_range_shadows_content_length() {
        let rule = field().with_max_value(100.0).with_content_length(2);
        // in range, so the exact-length constraint is never reached
        assert!(check_constraints(&json!("5"), &rule).is_pass());
        assert!(check_constraints(&json!("abc"), &rule).is_pass());
    }

    #[test]
    fn test_max_length_not_enforced() {
        let rule = field().with_max_length(2);
        assert!(check_constraints(&json!("much too long"), &rule).is_pass());
    }

    #[test]
    fn test_unconstrained_passes() {
        assert!(check_constraints(&json!("anything"), &field()).is_pass());
    }
}
