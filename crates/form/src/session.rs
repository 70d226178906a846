//! Form session: values, touched fields, and the latest validation result.
//!
//! A session plays the part of a form-state library. Raw input arrives via
//! [`FormSession::change`], focus loss via [`FormSession::blur`]. Errors are
//! recomputed according to [`FormConfig`] and surfaced only for fields the
//! user has touched. [`FormSession::submit`] touches every field.

use std::collections::{BTreeMap, BTreeSet};

use registration_core::clock::{Clock, SystemClock};
use registration_core::patient::PatientFormValues;
use registration_core::types::Field;
use registration_core::validation::{validate, ValidationResult};

use crate::config::FormConfig;
use crate::error::FormError;

#[derive(Debug, Clone)]
pub struct FormSession<C = SystemClock> {
    values: PatientFormValues,
    touched: BTreeSet<Field>,
    result: ValidationResult,
    clock: C,
    config: FormConfig,
}

impl FormSession<SystemClock> {
    /// Session on the wall clock with default triggers.
    pub fn with_defaults(values: PatientFormValues) -> Self {
        Self::new(values, SystemClock, FormConfig::default())
    }
}

impl<C: Clock> FormSession<C> {
    pub fn new(values: PatientFormValues, clock: C, config: FormConfig) -> Self {
        let mut session = Self {
            values,
            touched: BTreeSet::new(),
            result: ValidationResult::default(),
            clock,
            config,
        };
        session.revalidate();
        session
    }

    pub fn values(&self) -> &PatientFormValues {
        &self.values
    }

    pub fn config(&self) -> FormConfig {
        self.config
    }

    /// Apply raw input to `field`.
    ///
    /// An estimated-age change also re-derives the birthdate; a typed
    /// birthdate discards the estimate. Rejected input leaves the values and
    /// the last result untouched.
    pub fn change(&mut self, field: Field, raw: &str) -> Result<(), FormError> {
        if let Err(e) = self.values.apply_input(field, raw) {
            tracing::warn!(field = %field, error = %e, "Rejected form input");
            return Err(e.into());
        }
        tracing::debug!(field = %field, "Form field changed");

        if matches!(field, Field::YearsEstimated | Field::MonthsEstimated)
            && self.values.apply_estimated_age(self.clock.today())
        {
            tracing::debug!(
                birthdate = ?self.values.birthdate,
                "Birthdate updated from estimated age"
            );
        }

        if self.config.validate_on_change {
            self.revalidate();
        }
        Ok(())
    }

    /// Mark `field` as touched.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        tracing::debug!(field = %field, "Form field blurred");

        if self.config.validate_on_blur {
            self.revalidate();
        }
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Touch every field, re-validate, and hand back the values if valid.
    pub fn submit(&mut self) -> Result<&PatientFormValues, FormError> {
        self.touched.extend(Field::ALL);
        self.revalidate();

        if self.result.is_valid() {
            tracing::info!("Registration form submitted");
            Ok(&self.values)
        } else {
            tracing::info!(
                error_count = self.result.errors.len(),
                "Registration form submission blocked"
            );
            Err(FormError::Invalid(self.result.clone()))
        }
    }

    /// Latest full result, including errors on untouched fields.
    pub fn errors(&self) -> &ValidationResult {
        &self.result
    }

    /// Message to display for `field`, if it is touched and invalid.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.is_touched(field) {
            self.result.message_for(field)
        } else {
            None
        }
    }

    pub fn visible_errors(&self) -> BTreeMap<Field, String> {
        self.result
            .errors
            .iter()
            .filter(|v| self.is_touched(v.field))
            .map(|v| (v.field, v.message.clone()))
            .collect()
    }

    /// Replace the values and forget touched state.
    pub fn reset(&mut self, values: PatientFormValues) {
        self.values = values;
        self.touched.clear();
        self.revalidate();
        tracing::debug!("Form reset");
    }

    fn revalidate(&mut self) {
        self.result = validate(&self.values, self.clock.today());
        tracing::trace!(error_count = self.result.errors.len(), "Form revalidated");
    }
}
