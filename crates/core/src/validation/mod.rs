//! Field validation rule set.
//!
//! Provides rule and result types, the declarative patient-registration
//! schema, and a pure-logic evaluator. Time-relative rules compare against
//! a caller-supplied "today".

pub mod evaluator;
pub mod rules;
pub mod schema;

pub use evaluator::{evaluate_rules, validate, validate_field, validate_now};
pub use rules::{FieldRule, FieldViolation, RuleCheck, ValidationResult, ViolationKind};
pub use schema::{patient_registration_rules, rules_for, validated_fields};
