//! The patient-registration rule set.
//!
//! Rules are listed in evaluation order. Within a field the first failing
//! rule wins, so presence checks come before value checks.

use crate::types::{Field, GENDER_OPTIONS};

use super::rules::{FieldRule, RuleCheck};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const GIVEN_NAME_REQUIRED: &str = "Given name is required";
pub const FAMILY_NAME_REQUIRED: &str = "Family name is required";
pub const GENDER_REQUIRED: &str = "Gender is required";
pub const BIRTHDATE_REQUIRED: &str = "Birthdate is required";
pub const BIRTHDATE_IN_FUTURE: &str = "Birthdate cannot be in the future";
pub const YEARS_NEGATIVE: &str = "Years cannot be less than 0";
pub const MONTHS_NEGATIVE: &str = "Months cannot be less than 0";
pub const DEATH_DATE_IN_FUTURE: &str = "Date of Death cannot be in the future";

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

const LOCAL_LANGUAGE_NAME: RuleCheck = RuleCheck::RequiredIf {
    flag: Field::AddNameInLocalLanguage,
};

static PATIENT_REGISTRATION_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::GivenName,
        check: RuleCheck::Required,
        message: GIVEN_NAME_REQUIRED,
    },
    FieldRule {
        field: Field::FamilyName,
        check: RuleCheck::Required,
        message: FAMILY_NAME_REQUIRED,
    },
    FieldRule {
        field: Field::AdditionalGivenName,
        check: LOCAL_LANGUAGE_NAME,
        message: GIVEN_NAME_REQUIRED,
    },
    FieldRule {
        field: Field::AdditionalFamilyName,
        check: LOCAL_LANGUAGE_NAME,
        message: FAMILY_NAME_REQUIRED,
    },
    FieldRule {
        field: Field::Gender,
        check: RuleCheck::Required,
        message: GENDER_REQUIRED,
    },
    FieldRule {
        field: Field::Gender,
        check: RuleCheck::OneOf(GENDER_OPTIONS),
        message: GENDER_REQUIRED,
    },
    FieldRule {
        field: Field::Birthdate,
        check: RuleCheck::Required,
        message: BIRTHDATE_REQUIRED,
    },
    FieldRule {
        field: Field::Birthdate,
        check: RuleCheck::NotAfterToday,
        message: BIRTHDATE_IN_FUTURE,
    },
    FieldRule {
        field: Field::YearsEstimated,
        check: RuleCheck::MinValue(0),
        message: YEARS_NEGATIVE,
    },
    FieldRule {
        field: Field::MonthsEstimated,
        check: RuleCheck::MinValue(0),
        message: MONTHS_NEGATIVE,
    },
    FieldRule {
        field: Field::DeathDate,
        check: RuleCheck::NotAfterToday,
        message: DEATH_DATE_IN_FUTURE,
    },
];

/// The full rule table, in evaluation order.
pub fn patient_registration_rules() -> &'static [FieldRule] {
    PATIENT_REGISTRATION_RULES
}

/// Rules attached to one field, in evaluation order.
pub fn rules_for(field: Field) -> impl Iterator<Item = &'static FieldRule> {
    PATIENT_REGISTRATION_RULES
        .iter()
        .filter(move |rule| rule.field == field)
}

/// Fields that carry at least one rule, in form order.
pub fn validated_fields() -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|field| rules_for(*field).next().is_some())
        .collect()
}
