use std::sync::Once;

use chrono::NaiveDate;
use registration_core::clock::FixedClock;
use registration_core::patient::PatientFormValues;
use registration_form::{FormConfig, FormSession};

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to debug output for this crate.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "registration_form=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// The pinned "today" every session in these tests uses.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Build a session over `values` with default triggers and a fixed clock.
pub fn build_session(values: PatientFormValues) -> FormSession<FixedClock> {
    init_tracing();
    FormSession::new(values, FixedClock(today()), FormConfig::default())
}
