//! Customer subscription service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::plan_catalog::PlanCatalog;
use crate::domain::entities::{Customer, CustomerId, PlanType, Website, WebsiteId, reassign};
use crate::domain::{AddReport, Clock, RenewalPolicy, SystemClock};
use crate::error::SubscriptionError;

/// In-memory registry of customers subscribed to catalog plans.
///
/// Works with customers by id and plans by type, so callers never juggle
/// `Arc<Plan>` or two mutable customers at once. Every customer registered
/// here shares the service's clock and renewal policy.
///
/// Not synchronized: wrap the service in a lock if it is shared between
/// threads, since quota checks and additions are a check-then-act sequence.
pub struct SubscriptionService {
    catalog: PlanCatalog,
    customers: HashMap<CustomerId, Customer>,
    clock: Arc<dyn Clock>,
    policy: RenewalPolicy,
}

impl SubscriptionService {
    /// Creates a service using the system clock.
    pub fn new(catalog: PlanCatalog, policy: RenewalPolicy) -> Self {
        Self::with_clock(catalog, policy, Arc::new(SystemClock))
    }

    pub fn with_clock(catalog: PlanCatalog, policy: RenewalPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            customers: HashMap::new(),
            clock,
            policy,
        }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Registers a new customer without a subscription.
    pub fn register_customer(
        &mut self,
        name: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> CustomerId {
        let customer = Customer::new(name, password, email)
            .with_clock(Arc::clone(&self.clock))
            .with_policy(self.policy);
        let id = customer.id();

        tracing::debug!(customer = %id, name = %customer.name, "customer registered");
        self.customers.insert(id, customer);
        id
    }

    /// # Errors
    ///
    /// Returns [`SubscriptionError::CustomerNotFound`] for an unknown id.
    pub fn customer(&self, id: CustomerId) -> Result<&Customer, SubscriptionError> {
        self.customers
            .get(&id)
            .ok_or(SubscriptionError::CustomerNotFound { customer: id })
    }

    /// # Errors
    ///
    /// Returns [`SubscriptionError::CustomerNotFound`] for an unknown id.
    pub fn customer_mut(&mut self, id: CustomerId) -> Result<&mut Customer, SubscriptionError> {
        self.customers
            .get_mut(&id)
            .ok_or(SubscriptionError::CustomerNotFound { customer: id })
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Subscribes a customer to the catalog plan of `plan_type` and returns
    /// the renewal date.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::CustomerNotFound`] for an unknown id
    /// - [`SubscriptionError::InvalidArgument`] if the catalog lacks the plan
    /// - [`SubscriptionError::AlreadySubscribed`] if a plan is active
    pub fn subscribe(
        &mut self,
        customer: CustomerId,
        plan_type: PlanType,
    ) -> Result<NaiveDate, SubscriptionError> {
        let plan = self.catalog.get(plan_type)?;
        let customer = self.customer_mut(customer)?;
        customer.subscribe_plan(plan)?;
        Self::renewal_of(customer)
    }

    /// Moves a customer to another catalog plan and returns the new renewal
    /// date.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::CustomerNotFound`] for an unknown id
    /// - [`SubscriptionError::InvalidArgument`] if the catalog lacks the plan
    /// - [`SubscriptionError::NoSubscription`] if no plan is active
    /// - [`SubscriptionError::SamePlan`] if the customer already holds it
    pub fn change_plan(
        &mut self,
        customer: CustomerId,
        plan_type: PlanType,
    ) -> Result<NaiveDate, SubscriptionError> {
        let plan = self.catalog.get(plan_type)?;
        let customer = self.customer_mut(customer)?;
        customer.change_plan(plan)?;
        Self::renewal_of(customer)
    }

    /// Cancels a customer's subscription.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::CustomerNotFound`] for an unknown id
    /// - [`SubscriptionError::NoSubscription`] if no plan is active
    pub fn cancel(&mut self, customer: CustomerId) -> Result<(), SubscriptionError> {
        self.customer_mut(customer)?.remove_subscription()?;
        Ok(())
    }

    /// Creates websites for `urls` and registers them with the customer one
    /// by one.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::CustomerNotFound`] for an unknown id.
    /// Quota failures are reported per website in the [`AddReport`].
    pub fn add_websites<I, S>(
        &mut self,
        customer: CustomerId,
        urls: I,
    ) -> Result<AddReport, SubscriptionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let customer = self.customer_mut(customer)?;
        Ok(customer
            .websites_mut()
            .add(urls.into_iter().map(Website::new)))
    }

    /// Detaches a website from its customer and returns it.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::CustomerNotFound`] for an unknown id
    /// - [`SubscriptionError::NotFound`] if the customer does not own it
    pub fn remove_website(
        &mut self,
        customer: CustomerId,
        website: WebsiteId,
    ) -> Result<Website, SubscriptionError> {
        self.customer_mut(customer)?.websites_mut().remove(website)
    }

    /// Moves a website between two registered customers. The destination's
    /// quota is checked first; on failure the website stays with `from`.
    ///
    /// # Errors
    ///
    /// - [`SubscriptionError::CustomerNotFound`] for an unknown id
    /// - [`SubscriptionError::NotFound`] if `from` does not own the website
    /// - [`SubscriptionError::NoSubscription`] / [`SubscriptionError::QuotaExceeded`]
    ///   if `to` cannot take it
    pub fn transfer_website(
        &mut self,
        website: WebsiteId,
        from: CustomerId,
        to: CustomerId,
    ) -> Result<(), SubscriptionError> {
        if from == to {
            self.customer(from)?.websites().get(website)?;
            return Ok(());
        }

        let [source, target] = self.customers.get_disjoint_mut([&from, &to]);
        let source = source.ok_or(SubscriptionError::CustomerNotFound { customer: from })?;
        let target = target.ok_or(SubscriptionError::CustomerNotFound { customer: to })?;

        reassign(website, source, target)?;
        tracing::info!(website = %website, from = %from, to = %to, "website transferred");

        Ok(())
    }

    fn renewal_of(customer: &Customer) -> Result<NaiveDate, SubscriptionError> {
        customer
            .renewal_date()
            .ok_or(SubscriptionError::NoSubscription)
    }
}
