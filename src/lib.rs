//! # Website Subscriptions
//!
//! In-memory subscription bookkeeping for customers that register websites
//! under plan-based quotas.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Plans, customers, websites, quota and renewal rules
//! - **Application Layer** ([`application`]) - Plan catalog and customer registry
//! - **Configuration** ([`config`]) - Environment-driven settings
//!
//! ## Rules
//!
//! - A plan's type decides its website limit: single 1, plus 3, infinite unlimited
//! - A customer holds at most one plan; the renewal date is set exactly when a plan is
//! - Every website addition is checked against the active plan
//! - A website belongs to at most one customer at a time
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use website_subscriptions::prelude::*;
//!
//! let plan = Arc::new(Plan::new("Single", Decimal::new(4900, 2), PlanType::Single).unwrap());
//! let mut customer = Customer::new("foo", "bar", "foo@bar.com");
//! customer.subscribe_plan(plan).unwrap();
//!
//! let id = Website::create_for("https://example.com", &mut customer).unwrap();
//! assert_eq!(customer.websites().get(id).unwrap().customer(), Some(customer.id()));
//!
//! let rejected = Website::create_for("https://example.org", &mut customer).unwrap_err();
//! assert_eq!(rejected.reason, SubscriptionError::QuotaExceeded { allowed: 1 });
//! ```
//!
//! ## Configuration
//!
//! `SUBSCRIPTION_TTL_DAYS` overrides the renewal day count; see [`config`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod utils;

pub use error::SubscriptionError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{PlanCatalog, SubscriptionService};
    pub use crate::domain::entities::{
        Customer, CustomerId, Plan, PlanType, Website, WebsiteId, WebsitePatch, reassign,
    };
    pub use crate::domain::{AddReport, Clock, FixedClock, RenewalPolicy, Rejected, SystemClock};
    pub use crate::error::SubscriptionError;
}
