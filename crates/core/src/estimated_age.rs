//! Birthdate derivation from an estimated age.

use chrono::{Months, NaiveDate};

/// Compute the birthdate implied by an age of `years` years and `months`
/// months as of `today`.
///
/// Subtraction is done in whole calendar months; a day that does not exist
/// in the target month is clamped to that month's last day. Returns `None`
/// for negative inputs or when the result falls outside chrono's range.
pub fn estimate_birthdate(years: i32, months: i32, today: NaiveDate) -> Option<NaiveDate> {
    let years = u32::try_from(years).ok()?;
    let months = u32::try_from(months).ok()?;
    let total = years.checked_mul(12)?.checked_add(months)?;
    today.checked_sub_months(Months::new(total))
}
