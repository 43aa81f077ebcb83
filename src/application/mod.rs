//! Application layer services implementing business workflows.
//!
//! This layer orchestrates domain operations on behalf of callers that work
//! with ids and plan types rather than entity references.
//!
//! # Available Services
//!
//! - [`services::subscription_service::SubscriptionService`] - Customer registry, plan changes, website transfers
//! - [`services::plan_catalog::PlanCatalog`] - The plans offered to customers

pub mod services;
