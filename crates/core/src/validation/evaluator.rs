//! Rule evaluator: pure logic, no I/O.

use chrono::NaiveDate;
use validator::ValidateRange;

use crate::clock::Clock;
use crate::patient::{FieldValue, PatientFormValues};
use crate::types::Field;

use super::rules::{FieldRule, FieldViolation, RuleCheck, ValidationResult};
use super::schema::{patient_registration_rules, rules_for};

/// Evaluate `rules` against a record.
///
/// Only the first failing rule of each field is reported. Errors come back
/// in field order.
pub fn evaluate_rules(
    rules: &[FieldRule],
    values: &PatientFormValues,
    today: NaiveDate,
) -> ValidationResult {
    let mut errors: Vec<FieldViolation> = Vec::new();

    for rule in rules {
        if errors.iter().any(|v| v.field == rule.field) {
            continue;
        }
        if let Some(violation) = evaluate_single_rule(rule, values, today) {
            errors.push(violation);
        }
    }

    errors.sort_by_key(|v| v.field);
    ValidationResult { errors }
}

/// Validate the whole record against the registration rules.
pub fn validate(values: &PatientFormValues, today: NaiveDate) -> ValidationResult {
    evaluate_rules(patient_registration_rules(), values, today)
}

/// Validate a record using `clock` for "today".
pub fn validate_now(values: &PatientFormValues, clock: &impl Clock) -> ValidationResult {
    validate(values, clock.today())
}

/// Validate a single field, as a form does on blur.
pub fn validate_field(
    values: &PatientFormValues,
    field: Field,
    today: NaiveDate,
) -> Option<FieldViolation> {
    rules_for(field).find_map(|rule| evaluate_single_rule(rule, values, today))
}

fn evaluate_single_rule(
    rule: &FieldRule,
    values: &PatientFormValues,
    today: NaiveDate,
) -> Option<FieldViolation> {
    let value = values.get(rule.field);

    let failed = match rule.check {
        RuleCheck::Required => value.is_blank(),
        RuleCheck::RequiredIf { flag } => {
            values.get(flag) == FieldValue::Flag(true) && value.is_blank()
        }
        RuleCheck::OneOf(allowed) => match value {
            FieldValue::Text(s) if !value.is_blank() => {
                !allowed.iter().any(|option| *option == s)
            }
            _ => false,
        },
        RuleCheck::NotAfterToday => match value {
            FieldValue::Date(Some(date)) => date > today,
            _ => false,
        },
        RuleCheck::MinValue(min) => match value {
            FieldValue::Number(Some(n)) => !n.validate_range(Some(min), None, None, None),
            _ => false,
        },
    };

    failed.then(|| violation(rule))
}

fn violation(rule: &FieldRule) -> FieldViolation {
    FieldViolation {
        field: rule.field,
        kind: rule.kind(),
        message: rule.message.to_string(),
    }
}
