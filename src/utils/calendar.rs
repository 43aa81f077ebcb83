//! Calendar helpers used by renewal-date computation.

use chrono::{Datelike, NaiveDate};

use crate::error::SubscriptionError;

/// Returns the number of calendar days in `year` (365 or 366).
///
/// # Errors
///
/// Returns [`SubscriptionError::DateOutOfRange`] when `year` is outside the
/// range `chrono` can represent.
///
/// # Examples
///
/// ```
/// use website_subscriptions::utils::calendar::days_in_year;
///
/// assert_eq!(days_in_year(2023).unwrap(), 365);
/// assert_eq!(days_in_year(2024).unwrap(), 366);
/// ```
pub fn days_in_year(year: i32) -> Result<u32, SubscriptionError> {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|last| last.ordinal())
        .ok_or_else(|| SubscriptionError::date_out_of_range(format!("year {year}")))
}
