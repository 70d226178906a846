//! Field names and the gender option list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// A field of the patient-registration form.
///
/// Variants are declared in form order; `Ord` follows that order so
/// results keyed by `Field` list errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    GivenName,
    MiddleName,
    FamilyName,
    AddNameInLocalLanguage,
    AdditionalGivenName,
    AdditionalMiddleName,
    AdditionalFamilyName,
    Gender,
    Birthdate,
    BirthdateEstimated,
    YearsEstimated,
    MonthsEstimated,
    DeathDate,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 13] = [
        Field::GivenName,
        Field::MiddleName,
        Field::FamilyName,
        Field::AddNameInLocalLanguage,
        Field::AdditionalGivenName,
        Field::AdditionalMiddleName,
        Field::AdditionalFamilyName,
        Field::Gender,
        Field::Birthdate,
        Field::BirthdateEstimated,
        Field::YearsEstimated,
        Field::MonthsEstimated,
        Field::DeathDate,
    ];

    /// The form-level (camelCase) name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::GivenName => "givenName",
            Field::MiddleName => "middleName",
            Field::FamilyName => "familyName",
            Field::AddNameInLocalLanguage => "addNameInLocalLanguage",
            Field::AdditionalGivenName => "additionalGivenName",
            Field::AdditionalMiddleName => "additionalMiddleName",
            Field::AdditionalFamilyName => "additionalFamilyName",
            Field::Gender => "gender",
            Field::Birthdate => "birthdate",
            Field::BirthdateEstimated => "birthdateEstimated",
            Field::YearsEstimated => "yearsEstimated",
            Field::MonthsEstimated => "monthsEstimated",
            Field::DeathDate => "deathDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Allowed values of the `gender` select input, in display order.
pub const GENDER_OPTIONS: &[&str] = &[
    Gender::Male.as_str(),
    Gender::Female.as_str(),
    Gender::Other.as_str(),
    Gender::Unknown.as_str(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Other, Gender::Unknown];

    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unknown => "Unknown",
        }
    }

    /// Exact, case-sensitive match against the option list.
    pub fn parse(s: &str) -> Option<Self> {
        Gender::ALL.into_iter().find(|g| g.as_str() == s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
