//! Website entity and customer assignment.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::customer::{Customer, CustomerId};
use crate::domain::website_manager::Rejected;
use crate::error::SubscriptionError;

/// Identity of a website. Stands in for object identity: two websites with
/// the same URL are still different websites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebsiteId(Uuid);

impl WebsiteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WebsiteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WebsiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A website owned by at most one customer.
///
/// A website is either unassigned (`customer() == None`) or stored inside
/// exactly one customer's [`crate::domain::WebsiteManager`]. Ownership moves
/// into the manager on assignment and back out on removal, so the
/// back-reference can only be set by the manager itself. Websites are not
/// `Clone`, so the same website can never be handed to two managers:
///
/// ```compile_fail
/// use website_subscriptions::domain::entities::{Customer, Website};
///
/// let mut customer = Customer::new("foo", "bar", "foo@bar.com");
/// let website = Website::new("https://foo.bar");
/// let _ = customer.websites_mut().add_one(website);
/// let _ = customer.websites_mut().add_one(website);
/// ```
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Website {
    id: WebsiteId,
    pub url: String,
    customer: Option<CustomerId>,
}

/// Partial update for a registered website.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct WebsitePatch {
    pub url: Option<String>,
}

impl WebsitePatch {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

impl Website {
    /// Creates an unassigned website.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: WebsiteId::new(),
            url: url.into(),
            customer: None,
        }
    }

    /// Creates a website and registers it with `customer` in one step.
    ///
    /// # Errors
    ///
    /// Returns the rejected website (still unassigned) when the customer has
    /// no subscription or has reached the plan limit.
    pub fn create_for(
        url: impl Into<String>,
        customer: &mut Customer,
    ) -> Result<WebsiteId, Rejected> {
        Self::new(url).assign_to(customer)
    }

    pub fn id(&self) -> WebsiteId {
        self.id
    }

    /// Owning customer, if any.
    pub fn customer(&self) -> Option<CustomerId> {
        self.customer
    }

    pub fn is_assigned(&self) -> bool {
        self.customer.is_some()
    }

    /// Validates the customer's quota, then moves the website into the
    /// customer's manager.
    ///
    /// # Errors
    ///
    /// On failure nothing changes: the website is handed back unassigned
    /// together with the reason ([`SubscriptionError::NoSubscription`] or
    /// [`SubscriptionError::QuotaExceeded`]).
    pub fn assign_to(self, customer: &mut Customer) -> Result<WebsiteId, Rejected> {
        customer.websites_mut().add_one(self)
    }

    pub(crate) fn attach(&mut self, customer: CustomerId) {
        self.customer = Some(customer);
    }

    pub(crate) fn detach(&mut self) {
        self.customer = None;
    }

    pub(crate) fn apply(&mut self, patch: WebsitePatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Website: {}", self.url)
    }
}

/// Moves a website from one customer to another.
///
/// The destination's quota is checked before the website leaves `from`, so a
/// failed reassignment leaves it registered where it was.
///
/// # Errors
///
/// - [`SubscriptionError::NotFound`] if `from` does not own the website
/// - [`SubscriptionError::NoSubscription`] / [`SubscriptionError::QuotaExceeded`]
///   if `to` cannot take another website
pub fn reassign(
    website: WebsiteId,
    from: &mut Customer,
    to: &mut Customer,
) -> Result<WebsiteId, SubscriptionError> {
    from.websites().get(website)?;

    if !to.can_add_website()? {
        return Err(to.quota_exceeded());
    }

    let detached = from.websites_mut().remove(website)?;
    to.websites_mut()
        .add_one(detached)
        .map_err(|rejected| rejected.reason)
}
