//! Core domain entities representing the subscription data model.
//!
//! # Entity Types
//!
//! - [`Plan`] - A subscription offering and its website limit
//! - [`Customer`] - The aggregate root holding a subscription and websites
//! - [`Website`] - A resource registered to at most one customer
//!
//! # Design Pattern
//!
//! Entities are identified by opaque ids ([`CustomerId`], [`WebsiteId`])
//! rather than by reference. A website points back to its owner through a
//! `CustomerId`, while the owning customer holds the website by value.
//! Partial updates use patch structs ([`WebsitePatch`]).

pub mod customer;
pub mod plan;
pub mod website;

pub use customer::{Customer, CustomerId};
pub use plan::{Plan, PlanType};
pub use website::{Website, WebsiteId, WebsitePatch, reassign};
