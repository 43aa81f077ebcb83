//! Customer aggregate: identity, subscription, and owned websites.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::plan::Plan;
use crate::domain::renewal::{Clock, RenewalPolicy, SystemClock};
use crate::domain::website_manager::{WebsiteManager, WebsitesMut};
use crate::error::SubscriptionError;

/// Identity of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A customer that can hold one subscription plan and manage websites.
///
/// `renewal_date` is present exactly when a subscription is active. Plans are
/// shared (`Arc<Plan>`) so the same offering can back many customers.
pub struct Customer {
    id: CustomerId,
    pub name: String,
    pub password: String,
    pub email: String,
    subscription: Option<Arc<Plan>>,
    subscription_date: Option<NaiveDate>,
    renewal_date: Option<NaiveDate>,
    websites: WebsiteManager,
    clock: Arc<dyn Clock>,
    policy: RenewalPolicy,
}

impl Customer {
    /// Creates a customer without a subscription, using the system clock and
    /// the default renewal policy.
    pub fn new(
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let id = CustomerId::new();
        Self {
            id,
            name: name.into(),
            password: password.into(),
            email: email.into(),
            subscription: None,
            subscription_date: None,
            renewal_date: None,
            websites: WebsiteManager::new(id),
            clock: Arc::new(SystemClock),
            policy: RenewalPolicy::default(),
        }
    }

    /// Creates a customer already subscribed to `plan`. The renewal date is
    /// computed immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::DateOutOfRange`] if the renewal date
    /// cannot be represented.
    pub fn with_subscription(
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        plan: Arc<Plan>,
    ) -> Result<Self, SubscriptionError> {
        let mut customer = Self::new(name, password, email);
        customer.subscribe_plan(plan)?;
        Ok(customer)
    }

    /// Replaces the date source. Affects subscriptions made afterwards.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the renewal policy. Affects subscriptions made afterwards.
    pub fn with_policy(mut self, policy: RenewalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn subscription(&self) -> Option<&Arc<Plan>> {
        self.subscription.as_ref()
    }

    pub fn subscription_date(&self) -> Option<NaiveDate> {
        self.subscription_date
    }

    pub fn renewal_date(&self) -> Option<NaiveDate> {
        self.renewal_date
    }

    pub fn policy(&self) -> RenewalPolicy {
        self.policy
    }

    pub fn websites(&self) -> &WebsiteManager {
        &self.websites
    }

    /// Mutable access to the websites, gated by the current plan's quota.
    pub fn websites_mut(&mut self) -> WebsitesMut<'_> {
        WebsitesMut::new(self.subscription.as_deref(), &mut self.websites)
    }

    /// Returns true if the customer may register one more website.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NoSubscription`] without a plan.
    pub fn can_add_website(&self) -> Result<bool, SubscriptionError> {
        let plan = self
            .subscription
            .as_deref()
            .ok_or(SubscriptionError::NoSubscription)?;
        Ok(plan.admits(self.websites.count()))
    }

    /// Website limit of the active plan, `None` without a plan.
    ///
    /// An infinite plan reports its raw sentinel (`0`); use
    /// [`Plan::website_limit`] to distinguish "unlimited".
    pub fn total_websites_allowed(&self) -> Option<u32> {
        self.subscription
            .as_deref()
            .map(Plan::total_websites_allowed)
    }

    pub(crate) fn quota_exceeded(&self) -> SubscriptionError {
        SubscriptionError::QuotaExceeded {
            allowed: self.total_websites_allowed().unwrap_or(0),
        }
    }

    /// Subscribes to `plan`.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::AlreadySubscribed`] if a plan is active
    /// - [`SubscriptionError::DateOutOfRange`] if the renewal date overflows
    pub fn subscribe_plan(&mut self, plan: Arc<Plan>) -> Result<&Arc<Plan>, SubscriptionError> {
        if let Some(current) = &self.subscription {
            return Err(SubscriptionError::AlreadySubscribed {
                current: current.to_string(),
            });
        }

        let renewal = self.start_period()?;
        tracing::info!(
            customer = %self.id,
            plan_type = %plan.plan_type(),
            renewal_date = %renewal,
            "plan subscribed"
        );

        Ok(&*self.subscription.insert(plan))
    }

    /// Replaces the active plan with `new_plan` and restarts the renewal
    /// period. Plans are compared by value.
    ///
    /// Websites already registered are kept even if the new plan allows
    /// fewer; further additions are checked against the new limit.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::NoSubscription`] if no plan is active
    /// - [`SubscriptionError::SamePlan`] if `new_plan` equals the current one
    /// - [`SubscriptionError::DateOutOfRange`] if the renewal date overflows
    pub fn change_plan(&mut self, new_plan: Arc<Plan>) -> Result<(), SubscriptionError> {
        let current = self
            .subscription
            .as_deref()
            .ok_or(SubscriptionError::NoSubscription)?;

        if *current == *new_plan {
            return Err(SubscriptionError::SamePlan {
                plan: new_plan.to_string(),
            });
        }

        let from = current.plan_type();
        let renewal = self.start_period()?;
        tracing::info!(
            customer = %self.id,
            from = %from,
            to = %new_plan.plan_type(),
            renewal_date = %renewal,
            "plan changed"
        );
        self.subscription = Some(new_plan);

        Ok(())
    }

    /// Cancels the active plan, clearing the subscription and renewal dates.
    /// Registered websites are kept.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NoSubscription`] if no plan is active.
    pub fn remove_subscription(&mut self) -> Result<Arc<Plan>, SubscriptionError> {
        let plan = self
            .subscription
            .take()
            .ok_or(SubscriptionError::NoSubscription)?;

        self.subscription_date = None;
        self.renewal_date = None;
        tracing::info!(customer = %self.id, plan_type = %plan.plan_type(), "subscription removed");

        Ok(plan)
    }

    /// Starts a new subscription period today. Dates are only written once
    /// the renewal date is known to be representable.
    fn start_period(&mut self) -> Result<NaiveDate, SubscriptionError> {
        let today = self.clock.today();
        let renewal = self.policy.renewal_date(today)?;

        self.subscription_date = Some(today);
        self.renewal_date = Some(renewal);

        Ok(renewal)
    }
}

impl fmt::Debug for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("password", &"***")
            .field("email", &self.email)
            .field("subscription", &self.subscription)
            .field("subscription_date", &self.subscription_date)
            .field("renewal_date", &self.renewal_date)
            .field("websites", &self.websites)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PlanType, Website};
    use crate::domain::renewal::{FixedClock, MockClock};
    use rust_decimal::Decimal;

    fn plan(name: &str, cents: i64, plan_type: PlanType) -> Arc<Plan> {
        Arc::new(Plan::new(name, Decimal::new(cents, 2), plan_type).unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer_at(today: NaiveDate) -> Customer {
        Customer::new("foo", "bar", "foo@bar.com").with_clock(Arc::new(FixedClock(today)))
    }

    #[test]
    fn test_new_customer_has_no_subscription() {
        let customer = Customer::new("foo", "bar", "foo@bar.com");

        assert!(customer.subscription().is_none());
        assert!(customer.subscription_date().is_none());
        assert!(customer.renewal_date().is_none());
        assert!(customer.total_websites_allowed().is_none());
        assert_eq!(customer.to_string(), "Customer: foo");
    }

    #[test]
    fn test_subscribe_plan() {
        let mut customer = customer_at(date(2024, 3, 1));
        let single = plan("Single", 4900, PlanType::Single);

        let subscribed = customer.subscribe_plan(single.clone()).unwrap();

        assert!(Arc::ptr_eq(subscribed, &single));
        assert_eq!(customer.subscription_date(), Some(date(2024, 3, 1)));
        assert_eq!(customer.renewal_date(), Some(date(2025, 3, 1)));
        assert_eq!(customer.total_websites_allowed(), Some(1));
    }

    #[test]
    fn test_subscribe_twice_fails() {
        let mut customer = customer_at(date(2024, 3, 1));
        customer
            .subscribe_plan(plan("Single", 4900, PlanType::Single))
            .unwrap();

        let err = customer
            .subscribe_plan(plan("Infinite", 24900, PlanType::Infinite))
            .unwrap_err();

        assert_eq!(
            err,
            SubscriptionError::AlreadySubscribed {
                current: "Plan: single".to_string()
            }
        );
        assert_eq!(
            customer.subscription().unwrap().plan_type(),
            PlanType::Single
        );
    }

    #[test]
    fn test_change_plan() {
        let mut customer = customer_at(date(2024, 3, 1));
        let plus = plan("Plus", 9900, PlanType::Plus);
        let infinite = plan("Infinite", 24900, PlanType::Infinite);

        assert_eq!(
            customer.change_plan(infinite.clone()).unwrap_err(),
            SubscriptionError::NoSubscription
        );

        customer.subscribe_plan(plus.clone()).unwrap();
        assert!(matches!(
            customer.change_plan(plus.clone()).unwrap_err(),
            SubscriptionError::SamePlan { .. }
        ));

        customer.change_plan(infinite.clone()).unwrap();
        assert!(Arc::ptr_eq(customer.subscription().unwrap(), &infinite));
    }

    #[test]
    fn test_change_to_equal_plan_value_is_same_plan() {
        let mut customer = customer_at(date(2024, 3, 1));
        customer
            .subscribe_plan(plan("Plus", 9900, PlanType::Plus))
            .unwrap();

        let err = customer
            .change_plan(plan("Plus", 9900, PlanType::Plus))
            .unwrap_err();
        assert_eq!(err.code(), "same_plan");
    }

    #[test]
    fn test_change_plan_resets_renewal_date() {
        let mut clock = MockClock::new();
        let mut days = vec![date(2023, 6, 10), date(2024, 3, 1)].into_iter();
        clock
            .expect_today()
            .times(2)
            .returning(move || days.next().unwrap());

        let mut customer =
            Customer::new("foo", "bar", "foo@bar.com").with_clock(Arc::new(clock));
        customer
            .subscribe_plan(plan("Single", 4900, PlanType::Single))
            .unwrap();
        assert_eq!(customer.renewal_date(), Some(date(2024, 6, 10)));

        customer
            .change_plan(plan("Plus", 9900, PlanType::Plus))
            .unwrap();
        assert_eq!(customer.subscription_date(), Some(date(2024, 3, 1)));
        assert_eq!(customer.renewal_date(), Some(date(2025, 3, 1)));
    }

    #[test]
    fn test_remove_subscription() {
        let mut customer = customer_at(date(2024, 3, 1));

        assert_eq!(
            customer.remove_subscription().unwrap_err(),
            SubscriptionError::NoSubscription
        );

        customer
            .subscribe_plan(plan("Single", 4900, PlanType::Single))
            .unwrap();
        let removed = customer.remove_subscription().unwrap();

        assert_eq!(removed.plan_type(), PlanType::Single);
        assert!(customer.subscription().is_none());
        assert!(customer.subscription_date().is_none());
        assert!(customer.renewal_date().is_none());

        // A fresh subscription is allowed again.
        customer
            .subscribe_plan(plan("Plus", 9900, PlanType::Plus))
            .unwrap();
        assert!(customer.renewal_date().is_some());
    }

    #[test]
    fn test_can_add_website_requires_subscription() {
        let customer = Customer::new("foo", "bar", "foo@bar.com");
        assert_eq!(
            customer.can_add_website().unwrap_err(),
            SubscriptionError::NoSubscription
        );
    }

    #[test]
    fn test_can_add_website_follows_plan_limit() {
        let mut customer = customer_at(date(2024, 3, 1));
        customer
            .subscribe_plan(plan("Single", 4900, PlanType::Single))
            .unwrap();
        assert!(customer.can_add_website().unwrap());

        Website::create_for("https://foo.bar", &mut customer).unwrap();
        assert!(!customer.can_add_website().unwrap());
        assert!(matches!(
            customer.quota_exceeded(),
            SubscriptionError::QuotaExceeded { allowed: 1 }
        ));
    }

    #[test]
    fn test_downgrade_keeps_existing_websites() {
        let mut customer = customer_at(date(2024, 3, 1));
        customer
            .subscribe_plan(plan("Plus", 9900, PlanType::Plus))
            .unwrap();
        customer
            .websites_mut()
            .add([Website::new("https://a.bar"), Website::new("https://b.bar")])
            .into_result()
            .unwrap();

        customer
            .change_plan(plan("Single", 4900, PlanType::Single))
            .unwrap();

        assert_eq!(customer.websites().count(), 2);
        assert!(!customer.can_add_website().unwrap());
    }

    #[test]
    fn test_with_subscription_computes_renewal() {
        let plus = plan("Plus", 9900, PlanType::Plus);
        let customer = Customer::with_subscription("foo", "bar", "foo@bar.com", plus).unwrap();

        let start = customer.subscription_date().unwrap();
        let renewal = customer.renewal_date().unwrap();
        let expected = RenewalPolicy::default().renewal_date(start).unwrap();
        assert_eq!(renewal, expected);
    }

    #[test]
    fn test_policy_override() {
        let mut customer =
            customer_at(date(2024, 3, 1)).with_policy(RenewalPolicy::with_ttl_days(30));
        customer
            .subscribe_plan(plan("Single", 4900, PlanType::Single))
            .unwrap();

        assert_eq!(customer.renewal_date(), Some(date(2024, 3, 31)));
    }

    #[test]
    fn test_debug_hides_password() {
        let customer = Customer::new("foo", "hunter2", "foo@bar.com");
        let debug = format!("{customer:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }
}
