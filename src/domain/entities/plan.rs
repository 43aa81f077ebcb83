//! Subscription plan entity.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SubscriptionError;

/// Plan tier. The tier alone decides the maximum number of websites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// One website.
    Single,
    /// Up to three websites.
    Plus,
    /// Unlimited websites.
    Infinite,
}

impl PlanType {
    pub const ALL: [PlanType; 3] = [PlanType::Single, PlanType::Plus, PlanType::Infinite];

    /// Websites allowed by this tier. `0` is the unlimited sentinel and is
    /// only produced by [`PlanType::Infinite`].
    pub fn max_websites(&self) -> u32 {
        match self {
            PlanType::Single => 1,
            PlanType::Plus => 3,
            PlanType::Infinite => 0,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, PlanType::Infinite)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Single => "single",
            PlanType::Plus => "plus",
            PlanType::Infinite => "infinite",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(PlanType::Single),
            "plus" => Ok(PlanType::Plus),
            "infinite" => Ok(PlanType::Infinite),
            _ => Err(SubscriptionError::invalid_argument(format!(
                "The plan type has to be one of these values: single, plus, infinite. Plan inserted: {s}"
            ))),
        }
    }
}

/// A subscription plan that defines how many websites a customer can manage.
///
/// Plans are immutable once built and are shared between customers through
/// `Arc<Plan>`. Two plans are equal when all of their fields are equal.
///
/// # Unlimited sentinel
///
/// `total_websites_allowed == 0` means "unlimited" only for
/// [`PlanType::Infinite`]. On a single or plus plan an explicit `0` means no
/// websites at all. Prefer [`Plan::website_limit`], which folds both cases
/// into an `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    name: String,
    price: Decimal,
    plan_type: PlanType,
    total_websites_allowed: u32,
}

impl Plan {
    /// Creates a plan whose website limit is derived from `plan_type`.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidArgument`] if `price` is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use website_subscriptions::domain::entities::{Plan, PlanType};
    ///
    /// let plan = Plan::new("Plus", Decimal::new(9900, 2), PlanType::Plus).unwrap();
    /// assert_eq!(plan.total_websites_allowed(), 3);
    /// ```
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        plan_type: PlanType,
    ) -> Result<Self, SubscriptionError> {
        Self::with_websites_allowed(name, price, plan_type, plan_type.max_websites())
    }

    /// Creates a plan with an explicit website limit.
    ///
    /// The limit may lower the tier's cap but never raise it. For
    /// [`PlanType::Infinite`] the value is ignored and stored as `0`, the
    /// unlimited sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidArgument`] if `price` is negative
    /// or the limit exceeds the cap of a single (1) or plus (3) plan.
    pub fn with_websites_allowed(
        name: impl Into<String>,
        price: Decimal,
        plan_type: PlanType,
        total_websites_allowed: u32,
    ) -> Result<Self, SubscriptionError> {
        if price < Decimal::ZERO {
            return Err(SubscriptionError::invalid_argument(format!(
                "Plan price must not be negative, got {price}"
            )));
        }

        if !plan_type.is_unlimited() && total_websites_allowed > plan_type.max_websites() {
            return Err(SubscriptionError::invalid_argument(format!(
                "The plan type '{plan_type}' only allows {} website(s) max, got {total_websites_allowed}",
                plan_type.max_websites()
            )));
        }

        let total_websites_allowed = if plan_type.is_unlimited() {
            0
        } else {
            total_websites_allowed
        };

        Ok(Self {
            name: name.into(),
            price,
            plan_type,
            total_websites_allowed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn plan_type(&self) -> PlanType {
        self.plan_type
    }

    /// Raw website limit; `0` is the unlimited sentinel on infinite plans.
    pub fn total_websites_allowed(&self) -> u32 {
        self.total_websites_allowed
    }

    /// Website limit, or `None` when the plan is unlimited.
    pub fn website_limit(&self) -> Option<u32> {
        if self.plan_type.is_unlimited() {
            None
        } else {
            Some(self.total_websites_allowed)
        }
    }

    /// Returns true if a customer already holding `current` websites may add
    /// one more.
    pub fn admits(&self, current: usize) -> bool {
        match self.website_limit() {
            None => true,
            Some(limit) => current < limit as usize,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plan: {}", self.plan_type)
    }
}
