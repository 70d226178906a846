//! `registration-core` library crate.
//!
//! Patient-registration form model and its field validation rule set.
//! Everything here is pure logic: no I/O, no logging, no global state.

pub mod clock;
pub mod error;
pub mod estimated_age;
pub mod patient;
pub mod types;
pub mod validation;
