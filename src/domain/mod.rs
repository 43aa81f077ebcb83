//! Domain layer containing business entities and rules.
//!
//! This module implements the invariant-enforcement core: which plan a
//! customer holds, when it renews, and how many websites it may register.
//! It has no dependencies on configuration or presentation code.
//!
//! # Architecture
//!
//! - [`entities`] - Plans, customers, and websites
//! - [`website_manager`] - Per-customer website collection and quota gate
//! - [`renewal`] - Clock abstraction and renewal-date policy
//!
//! # Quota Flow
//!
//! 1. A website is handed to [`entities::Customer::websites_mut`] (or
//!    [`entities::Website::assign_to`])
//! 2. The active plan is checked via [`entities::Plan::admits`]
//! 3. The website is moved into the [`WebsiteManager`] and its back-reference
//!    is set, or it is returned unassigned inside a [`Rejected`]

pub mod entities;
pub mod renewal;
pub mod website_manager;

pub use renewal::{Clock, FixedClock, RenewalPolicy, SystemClock};
pub use website_manager::{AddReport, Rejected, WebsiteManager, WebsitesMut};
