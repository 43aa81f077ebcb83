//! Utility functions shared across the crate.
//!
//! - [`calendar`] - Day counts for renewal-date computation

pub mod calendar;
