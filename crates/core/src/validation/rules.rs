//! Validation rule and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Field;

use super::schema::validated_fields;

/// What a rule checks about its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck {
    /// The field must not be blank.
    Required,
    /// The field must not be blank while the sibling `flag` is set.
    RequiredIf { flag: Field },
    /// A non-blank text value must be one of the listed options.
    OneOf(&'static [&'static str]),
    /// A present date must not be later than today.
    NotAfterToday,
    /// A present number must be at least the bound.
    MinValue(i32),
}

impl RuleCheck {
    pub fn kind(self) -> ViolationKind {
        match self {
            RuleCheck::Required | RuleCheck::RequiredIf { .. } => ViolationKind::Required,
            RuleCheck::OneOf(_) | RuleCheck::NotAfterToday | RuleCheck::MinValue(_) => {
                ViolationKind::Invalid
            }
        }
    }
}

/// A single declarative rule: field, predicate, and the message shown when
/// the predicate fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub check: RuleCheck,
    pub message: &'static str,
}

impl FieldRule {
    pub fn kind(&self) -> ViolationKind {
        self.check.kind()
    }
}

/// Whether a value was missing or present-but-wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    Required,
    Invalid,
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: Field,
    pub kind: ViolationKind,
    pub message: String,
}

/// Aggregated result of evaluating the rule set against one record.
///
/// Holds at most one violation per field, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldViolation] {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldViolation> {
        self.errors.iter().find(|v| v.field == field)
    }

    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.error_for(field).map(|v| v.message.as_str())
    }

    /// One entry per validated field: its message, or `None` when valid.
    pub fn to_field_map(&self) -> BTreeMap<Field, Option<String>> {
        validated_fields()
            .into_iter()
            .map(|field| (field, self.message_for(field).map(str::to_string)))
            .collect()
    }
}
