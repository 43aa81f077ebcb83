//! Subscription renewal scheduling.
//!
//! A renewal date is one "year's worth of days" after the subscription date,
//! where the day count is taken from the calendar year *following* the
//! subscription year:
//!
//! ```text
//! renewal = start + days_in_year(start.year + 1)
//! ```
//!
//! Subscribing on 2023-03-01 therefore renews on 2024-03-01 (2024 has 366
//! days), while subscribing on 2023-01-15 renews on 2024-01-16, because the
//! extra leap day is counted even though it falls after the renewal.
//!
//! [`RenewalPolicy::override_ttl_days`] replaces the computed day count
//! verbatim when set (see `SUBSCRIPTION_TTL_DAYS` in [`crate::config`]).

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::SubscriptionError;
use crate::utils::calendar::days_in_year;

/// Source of "today's date" for subscription bookkeeping.
///
/// Substitute [`FixedClock`] (or the generated `MockClock` in unit tests) to
/// make renewal dates deterministic.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen on a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Explicit configuration for renewal-date computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewalPolicy {
    /// Fixed subscription length in days. `None` uses the leap-year-aware
    /// day count of the year after the subscription date.
    pub override_ttl_days: Option<u32>,
}

impl RenewalPolicy {
    pub fn with_ttl_days(days: u32) -> Self {
        Self {
            override_ttl_days: Some(days),
        }
    }

    /// Number of days a subscription starting on `start` lasts.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::DateOutOfRange`] if the following year
    /// cannot be represented.
    pub fn ttl_days(&self, start: NaiveDate) -> Result<u32, SubscriptionError> {
        match self.override_ttl_days {
            Some(days) => Ok(days),
            None => {
                let next_year = start.year().checked_add(1).ok_or_else(|| {
                    SubscriptionError::date_out_of_range(format!("year after {}", start.year()))
                })?;
                days_in_year(next_year)
            }
        }
    }

    /// Computes the renewal date of a subscription starting on `start`.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::DateOutOfRange`] if the result overflows
    /// the supported calendar.
    pub fn renewal_date(&self, start: NaiveDate) -> Result<NaiveDate, SubscriptionError> {
        let ttl = self.ttl_days(start)?;
        start
            .checked_add_days(Days::new(u64::from(ttl)))
            .ok_or_else(|| {
                SubscriptionError::date_out_of_range(format!("{start} + {ttl} days"))
            })
    }
}
