//! `registration-form` library crate.
//!
//! Form-state collaborator for the patient-registration rule set: applies
//! raw input, tracks touched fields, and decides when validation re-runs
//! and which errors are visible.

pub mod config;
pub mod error;
pub mod session;

pub use config::FormConfig;
pub use error::FormError;
pub use session::FormSession;
