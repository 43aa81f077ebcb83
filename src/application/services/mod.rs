//! Business logic services for the application layer.

pub mod plan_catalog;
pub mod subscription_service;

pub use plan_catalog::PlanCatalog;
pub use subscription_service::SubscriptionService;
