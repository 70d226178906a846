//! Patient-registration form values.
//!
//! [`PatientFormValues`] is the record the rule set validates. Its serde form
//! uses the camelCase field names of the registration form. Absent dates and
//! numbers may arrive as either `null` or `""`; both deserialize to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidateLength;

use crate::error::CoreError;
use crate::estimated_age::estimate_birthdate;
use crate::types::{Field, Gender};

/// Date format produced by `<input type="date">`.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientFormValues {
    #[serde(deserialize_with = "null_as_empty")]
    pub given_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub middle_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub family_name: String,
    #[serde(deserialize_with = "null_as_false")]
    pub add_name_in_local_language: bool,
    #[serde(deserialize_with = "null_as_empty")]
    pub additional_given_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub additional_middle_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub additional_family_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub gender: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub birthdate: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_false")]
    pub birthdate_estimated: bool,
    #[serde(deserialize_with = "blank_as_none")]
    pub years_estimated: Option<i32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub months_estimated: Option<i32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub death_date: Option<NaiveDate>,
}

/// Borrowed view of a single field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
    Date(Option<NaiveDate>),
    Number(Option<i32>),
}

impl FieldValue<'_> {
    /// Whether the value counts as "not entered".
    ///
    /// Text is blank when empty after trimming; dates and numbers are blank
    /// when absent. Flags are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.trim().validate_length(Some(1u64), None, None),
            FieldValue::Flag(_) => false,
            FieldValue::Date(d) => d.is_none(),
            FieldValue::Number(n) => n.is_none(),
        }
    }
}

impl PatientFormValues {
    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::GivenName => FieldValue::Text(&self.given_name),
            Field::MiddleName => FieldValue::Text(&self.middle_name),
            Field::FamilyName => FieldValue::Text(&self.family_name),
            Field::AddNameInLocalLanguage => FieldValue::Flag(self.add_name_in_local_language),
            Field::AdditionalGivenName => FieldValue::Text(&self.additional_given_name),
            Field::AdditionalMiddleName => FieldValue::Text(&self.additional_middle_name),
            Field::AdditionalFamilyName => FieldValue::Text(&self.additional_family_name),
            Field::Gender => FieldValue::Text(&self.gender),
            Field::Birthdate => FieldValue::Date(self.birthdate),
            Field::BirthdateEstimated => FieldValue::Flag(self.birthdate_estimated),
            Field::YearsEstimated => FieldValue::Number(self.years_estimated),
            Field::MonthsEstimated => FieldValue::Number(self.months_estimated),
            Field::DeathDate => FieldValue::Date(self.death_date),
        }
    }

    /// The selected gender, if it is one of the allowed options.
    pub fn gender(&self) -> Option<Gender> {
        Gender::parse(&self.gender)
    }

    /// Set a field from the raw string an HTML input produces.
    ///
    /// Text is stored verbatim. Dates and numbers treat `""` as absent.
    /// Malformed dates, numbers, and flags are rejected and leave the
    /// record unchanged. A hand-entered birthdate replaces any estimate:
    /// `birthdate_estimated` and both estimate fields are cleared.
    pub fn apply_input(&mut self, field: Field, raw: &str) -> Result<(), CoreError> {
        match field {
            Field::GivenName => self.given_name = raw.to_string(),
            Field::MiddleName => self.middle_name = raw.to_string(),
            Field::FamilyName => self.family_name = raw.to_string(),
            Field::AdditionalGivenName => self.additional_given_name = raw.to_string(),
            Field::AdditionalMiddleName => self.additional_middle_name = raw.to_string(),
            Field::AdditionalFamilyName => self.additional_family_name = raw.to_string(),
            Field::Gender => self.gender = raw.to_string(),
            Field::AddNameInLocalLanguage => {
                self.add_name_in_local_language = parse_flag(field, raw)?;
            }
            Field::BirthdateEstimated => self.birthdate_estimated = parse_flag(field, raw)?,
            Field::Birthdate => {
                self.birthdate = parse_date(field, raw)?;
                self.birthdate_estimated = false;
                self.years_estimated = None;
                self.months_estimated = None;
            }
            Field::DeathDate => self.death_date = parse_date(field, raw)?,
            Field::YearsEstimated => self.years_estimated = parse_number(field, raw)?,
            Field::MonthsEstimated => self.months_estimated = parse_number(field, raw)?,
        }
        Ok(())
    }

    /// Derive `birthdate` from the estimated age.
    ///
    /// Applies when at least one of years/months is entered and neither is
    /// negative; a missing half counts as zero. Sets `birthdate_estimated`
    /// and returns `true` when the birthdate was replaced. Once both halves
    /// are cleared, an estimated birthdate is withdrawn along with its flag.
    pub fn apply_estimated_age(&mut self, today: NaiveDate) -> bool {
        if self.years_estimated.is_none() && self.months_estimated.is_none() {
            if !self.birthdate_estimated {
                return false;
            }
            self.birthdate = None;
            self.birthdate_estimated = false;
            return true;
        }
        let years = self.years_estimated.unwrap_or(0);
        let months = self.months_estimated.unwrap_or(0);
        match estimate_birthdate(years, months, today) {
            Some(birthdate) => {
                self.birthdate = Some(birthdate);
                self.birthdate_estimated = true;
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw input parsing
// ---------------------------------------------------------------------------

fn invalid_input(field: Field, raw: &str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidInput {
        field,
        value: raw.to_string(),
        reason: reason.into(),
    }
}

fn parse_flag(field: Field, raw: &str) -> Result<bool, CoreError> {
    match raw.trim() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" | "" => Ok(false),
        _ => Err(invalid_input(field, raw, "expected a boolean")),
    }
}

fn parse_date(field: Field, raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let raw_trimmed = raw.trim();
    if raw_trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw_trimmed, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|e| invalid_input(field, raw, format!("expected YYYY-MM-DD: {e}")))
}

fn parse_number(field: Field, raw: &str) -> Result<Option<i32>, CoreError> {
    let raw_trimmed = raw.trim();
    if raw_trimmed.is_empty() {
        return Ok(None);
    }
    raw_trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|e| invalid_input(field, raw, format!("expected an integer: {e}")))
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Text(String),
    }

    match Option::<Raw<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Value(value)) => Ok(Some(value)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => Err(serde::de::Error::custom(format!(
            "unrecognized value {s:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        assert!(FieldValue::Text("   ").is_blank());
        assert!(FieldValue::Text("").is_blank());
        assert!(!FieldValue::Text(" A ").is_blank());
    }

    #[test]
    fn absent_date_and_number_are_blank() {
        assert!(FieldValue::Date(None).is_blank());
        assert!(FieldValue::Number(None).is_blank());
        assert!(!FieldValue::Number(Some(0)).is_blank());
        assert!(!FieldValue::Flag(false).is_blank());
    }

    #[test]
    fn get_returns_matching_field() {
        let values = PatientFormValues {
            family_name: "Aaronson".into(),
            years_estimated: Some(30),
            ..Default::default()
        };
        assert_eq!(values.get(Field::FamilyName), FieldValue::Text("Aaronson"));
        assert_eq!(values.get(Field::YearsEstimated), FieldValue::Number(Some(30)));
        assert_eq!(values.get(Field::DeathDate), FieldValue::Date(None));
    }

    #[test]
    fn gender_accessor_parses_selection() {
        let mut values = PatientFormValues::default();
        assert_eq!(values.gender(), None);
        values.gender = "Other".into();
        assert_eq!(values.gender(), Some(Gender::Other));
    }

    #[test]
    fn apply_input_sets_text_verbatim() {
        let mut values = PatientFormValues::default();
        values.apply_input(Field::AdditionalGivenName, " Aaron ").unwrap();
        assert_eq!(values.additional_given_name, " Aaron ");
    }

    #[test]
    fn apply_input_parses_dates() {
        let mut values = PatientFormValues::default();
        values.apply_input(Field::Birthdate, "1990-09-10").unwrap();
        assert_eq!(values.birthdate, Some(date(1990, 9, 10)));

        values.apply_input(Field::Birthdate, "").unwrap();
        assert_eq!(values.birthdate, None);
    }

    #[test]
    fn apply_input_rejects_malformed_date() {
        let mut values = PatientFormValues {
            death_date: Some(date(2020, 1, 1)),
            ..Default::default()
        };
        assert_matches!(
            values.apply_input(Field::DeathDate, "01/01/2020"),
            Err(CoreError::InvalidInput { field: Field::DeathDate, .. })
        );
        assert_eq!(values.death_date, Some(date(2020, 1, 1)));
    }

    #[test]
    fn apply_input_parses_negative_numbers() {
        let mut values = PatientFormValues::default();
        values.apply_input(Field::MonthsEstimated, "-10").unwrap();
        assert_eq!(values.months_estimated, Some(-10));
    }

    #[test]
    fn apply_input_rejects_non_numeric() {
        let mut values = PatientFormValues::default();
        assert_matches!(
            values.apply_input(Field::YearsEstimated, "thirty"),
            Err(CoreError::InvalidInput { field: Field::YearsEstimated, .. })
        );
    }

    #[test]
    fn apply_input_parses_checkbox_values() {
        let mut values = PatientFormValues::default();
        values.apply_input(Field::AddNameInLocalLanguage, "on").unwrap();
        assert!(values.add_name_in_local_language);
        values.apply_input(Field::AddNameInLocalLanguage, "").unwrap();
        assert!(!values.add_name_in_local_language);
        assert!(values.apply_input(Field::AddNameInLocalLanguage, "yes").is_err());
    }

    #[test]
    fn deserializes_empty_string_and_null_as_absent() {
        let values: PatientFormValues = serde_json::from_value(json!({
            "givenName": "Aaron",
            "familyName": null,
            "birthdate": "",
            "deathDate": null,
            "yearsEstimated": "",
            "monthsEstimated": 2
        }))
        .unwrap();
        assert_eq!(values.given_name, "Aaron");
        assert_eq!(values.family_name, "");
        assert_eq!(values.birthdate, None);
        assert_eq!(values.death_date, None);
        assert_eq!(values.years_estimated, None);
        assert_eq!(values.months_estimated, Some(2));
    }

    #[test]
    fn deserializes_null_flags_as_false() {
        let values: PatientFormValues = serde_json::from_value(json!({
            "addNameInLocalLanguage": null,
            "birthdateEstimated": null
        }))
        .unwrap();
        assert!(!values.add_name_in_local_language);
        assert!(!values.birthdate_estimated);
    }

    #[test]
    fn apply_input_writes_only_the_named_field() {
        for field in Field::ALL {
            let mut values = PatientFormValues::default();
            let raw = match field {
                Field::AddNameInLocalLanguage | Field::BirthdateEstimated => "true",
                Field::Birthdate | Field::DeathDate => "2000-01-01",
                Field::YearsEstimated | Field::MonthsEstimated => "7",
                _ => "Other",
            };
            values.apply_input(field, raw).unwrap();
            for other in Field::ALL.into_iter().filter(|f| *f != field) {
                assert_eq!(
                    values.get(other),
                    PatientFormValues::default().get(other),
                    "writing {field} changed {other}"
                );
            }
            assert_ne!(values.get(field), PatientFormValues::default().get(field), "{field}");
        }
    }

    #[test]
    fn typed_birthdate_replaces_estimate() {
        let mut values = PatientFormValues {
            years_estimated: Some(30),
            months_estimated: Some(1),
            ..Default::default()
        };
        values.apply_estimated_age(date(2024, 6, 15));
        values.apply_input(Field::Birthdate, "2000-01-01").unwrap();
        assert_eq!(values.birthdate, Some(date(2000, 1, 1)));
        assert!(!values.birthdate_estimated);
        assert_eq!(values.years_estimated, None);
        assert_eq!(values.months_estimated, None);
    }

    #[test]
    fn clearing_estimate_withdraws_estimated_birthdate() {
        let mut values = PatientFormValues {
            years_estimated: Some(30),
            ..Default::default()
        };
        values.apply_estimated_age(date(2024, 6, 15));
        values.apply_input(Field::YearsEstimated, "").unwrap();
        assert!(values.apply_estimated_age(date(2024, 6, 15)));
        assert_eq!(values.birthdate, None);
        assert!(!values.birthdate_estimated);
    }

    #[test]
    fn clearing_estimate_keeps_typed_birthdate() {
        let mut values = PatientFormValues {
            birthdate: Some(date(1990, 9, 10)),
            ..Default::default()
        };
        assert!(!values.apply_estimated_age(date(2024, 6, 15)));
        assert_eq!(values.birthdate, Some(date(1990, 9, 10)));
    }

    #[test]
    fn deserializes_iso_dates() {
        let values: PatientFormValues =
            serde_json::from_value(json!({ "birthdate": "1990-09-10" })).unwrap();
        assert_eq!(values.birthdate, Some(date(1990, 9, 10)));
    }

    #[test]
    fn rejects_garbage_date_string() {
        let result = serde_json::from_value::<PatientFormValues>(json!({ "birthdate": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_value(PatientFormValues::default()).unwrap();
        assert_eq!(json["addNameInLocalLanguage"], false);
        assert!(json["deathDate"].is_null());
    }

    #[test]
    fn estimated_age_sets_birthdate() {
        let mut values = PatientFormValues {
            years_estimated: Some(30),
            months_estimated: Some(1),
            ..Default::default()
        };
        assert!(values.apply_estimated_age(date(2024, 6, 15)));
        assert_eq!(values.birthdate, Some(date(1994, 5, 15)));
        assert!(values.birthdate_estimated);
    }

    #[test]
    fn estimated_age_treats_missing_half_as_zero() {
        let mut values = PatientFormValues {
            months_estimated: Some(6),
            ..Default::default()
        };
        assert!(values.apply_estimated_age(date(2024, 6, 15)));
        assert_eq!(values.birthdate, Some(date(2023, 12, 15)));
    }

    #[test]
    fn negative_estimate_leaves_birthdate_alone() {
        let mut values = PatientFormValues {
            birthdate: Some(date(1990, 9, 10)),
            years_estimated: Some(-10),
            months_estimated: Some(2),
            ..Default::default()
        };
        assert!(!values.apply_estimated_age(date(2024, 6, 15)));
        assert_eq!(values.birthdate, Some(date(1990, 9, 10)));
        assert!(!values.birthdate_estimated);
    }

    #[test]
    fn no_estimate_is_a_no_op() {
        let mut values = PatientFormValues::default();
        assert!(!values.apply_estimated_age(date(2024, 6, 15)));
        assert_eq!(values.birthdate, None);
    }
}
