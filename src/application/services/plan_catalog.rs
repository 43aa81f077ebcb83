//! Catalog of plans offered to customers.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entities::{Plan, PlanType};
use crate::error::SubscriptionError;

/// One shared [`Plan`] per [`PlanType`].
///
/// Customers subscribed through the same catalog share the same `Arc<Plan>`.
#[derive(Debug, Clone, Default)]
pub struct PlanCatalog {
    plans: Vec<Arc<Plan>>,
}

impl PlanCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard offering: Single (49.00), Plus (99.00), Infinite (249.00).
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for (name, cents, plan_type) in [
            ("Single", 4900, PlanType::Single),
            ("Plus", 9900, PlanType::Plus),
            ("Infinite", 24900, PlanType::Infinite),
        ] {
            let plan = Plan::new(name, Decimal::new(cents, 2), plan_type)
                .expect("standard plans have non-negative prices");
            catalog.insert(plan);
        }
        catalog
    }

    /// Adds a plan, replacing any existing plan of the same type.
    pub fn insert(&mut self, plan: Plan) -> Arc<Plan> {
        let plan = Arc::new(plan);
        match self
            .plans
            .iter_mut()
            .find(|p| p.plan_type() == plan.plan_type())
        {
            Some(slot) => *slot = Arc::clone(&plan),
            None => self.plans.push(Arc::clone(&plan)),
        }
        plan
    }

    /// Returns the plan offered for `plan_type`.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidArgument`] if the catalog has no
    /// plan of that type.
    pub fn get(&self, plan_type: PlanType) -> Result<Arc<Plan>, SubscriptionError> {
        self.plans
            .iter()
            .find(|p| p.plan_type() == plan_type)
            .cloned()
            .ok_or_else(|| {
                SubscriptionError::invalid_argument(format!(
                    "No '{plan_type}' plan in the catalog"
                ))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Plan>> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
