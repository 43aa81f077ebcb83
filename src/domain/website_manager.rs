//! Per-customer website collection with plan quota enforcement.
//!
//! A [`WebsiteManager`] is owned by exactly one [`Customer`]. Read access goes
//! through [`Customer::websites`]; anything that changes membership goes
//! through [`Customer::websites_mut`], which pairs the manager with the
//! customer's current plan so every add is checked against the quota.
//!
//! # Batch semantics
//!
//! [`WebsitesMut::add`] evaluates websites one at a time, in order. Each
//! accepted website stays accepted even if a later one is rejected; nothing
//! is rolled back. The returned [`AddReport`] lists both outcomes.
//!
//! [`Customer`]: crate::domain::entities::Customer
//! [`Customer::websites`]: crate::domain::entities::Customer::websites
//! [`Customer::websites_mut`]: crate::domain::entities::Customer::websites_mut

use std::ops::Deref;

use crate::domain::entities::{CustomerId, Plan, Website, WebsiteId, WebsitePatch};
use crate::error::SubscriptionError;

/// Ordered set of websites registered to one customer.
#[derive(Debug)]
pub struct WebsiteManager {
    owner: CustomerId,
    websites: Vec<Website>,
}

impl WebsiteManager {
    pub(crate) fn new(owner: CustomerId) -> Self {
        Self {
            owner,
            websites: Vec::new(),
        }
    }

    /// Customer that owns this collection.
    pub fn owner(&self) -> CustomerId {
        self.owner
    }

    /// Returns the registered website with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NotFound`] if it is not a member.
    pub fn get(&self, id: WebsiteId) -> Result<&Website, SubscriptionError> {
        self.websites
            .iter()
            .find(|w| w.id() == id)
            .ok_or(SubscriptionError::NotFound { website: id })
    }

    /// All registered websites in insertion order.
    pub fn all(&self) -> &[Website] {
        &self.websites
    }

    pub fn iter(&self) -> impl Iterator<Item = &Website> {
        self.websites.iter()
    }

    pub fn count(&self) -> usize {
        self.websites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.websites.is_empty()
    }

    pub fn contains(&self, id: WebsiteId) -> bool {
        self.position(id).is_some()
    }

    pub(crate) fn update(
        &mut self,
        id: WebsiteId,
        patch: WebsitePatch,
    ) -> Result<&Website, SubscriptionError> {
        let index = self
            .position(id)
            .ok_or(SubscriptionError::NotFound { website: id })?;

        let website = &mut self.websites[index];
        website.apply(patch);
        tracing::debug!(customer = %self.owner, website = %id, url = %website.url, "website updated");

        Ok(&*website)
    }

    pub(crate) fn remove(&mut self, id: WebsiteId) -> Result<Website, SubscriptionError> {
        let index = self
            .position(id)
            .ok_or(SubscriptionError::NotFound { website: id })?;

        let mut website = self.websites.remove(index);
        website.detach();
        tracing::debug!(customer = %self.owner, website = %id, "website removed");

        Ok(website)
    }

    fn position(&self, id: WebsiteId) -> Option<usize> {
        self.websites.iter().position(|w| w.id() == id)
    }

    fn push(&mut self, mut website: Website) -> WebsiteId {
        let id = website.id();
        website.attach(self.owner);
        tracing::debug!(customer = %self.owner, website = %id, url = %website.url, "website added");
        self.websites.push(website);
        id
    }
}

/// Mutable view over a customer's websites bound to the customer's plan.
///
/// Dereferences to [`WebsiteManager`] for lookups. The manager itself is
/// never handed out mutably, so membership only changes through this view:
///
/// ```compile_fail
/// use website_subscriptions::domain::entities::Customer;
///
/// let mut a = Customer::new("a", "pw", "a@example.com");
/// let mut b = Customer::new("b", "pw", "b@example.com");
/// std::mem::swap(&mut *a.websites_mut(), &mut *b.websites_mut());
/// ```
pub struct WebsitesMut<'a> {
    plan: Option<&'a Plan>,
    manager: &'a mut WebsiteManager,
}

impl<'a> WebsitesMut<'a> {
    pub(crate) fn new(plan: Option<&'a Plan>, manager: &'a mut WebsiteManager) -> Self {
        Self { plan, manager }
    }

    /// Returns true if one more website fits in the current plan.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NoSubscription`] without a plan.
    pub fn can_add(&self) -> Result<bool, SubscriptionError> {
        let plan = self.plan.ok_or(SubscriptionError::NoSubscription)?;
        Ok(plan.admits(self.manager.count()))
    }

    /// Registers a single website.
    ///
    /// # Errors
    ///
    /// Returns the website, unassigned, with [`SubscriptionError::NoSubscription`]
    /// or [`SubscriptionError::QuotaExceeded`].
    pub fn add_one(&mut self, website: Website) -> Result<WebsiteId, Rejected> {
        match self.can_add() {
            Ok(true) => Ok(self.manager.push(website)),
            Ok(false) => {
                let allowed = self.plan.map_or(0, Plan::total_websites_allowed);
                tracing::warn!(
                    customer = %self.manager.owner,
                    url = %website.url,
                    allowed,
                    "website quota exceeded"
                );
                Err(Rejected {
                    website,
                    reason: SubscriptionError::QuotaExceeded { allowed },
                })
            }
            Err(reason) => Err(Rejected { website, reason }),
        }
    }

    /// Applies `patch` to a registered website. Membership is unchanged, so
    /// the quota is not checked again.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NotFound`] if it is not a member.
    pub fn update(
        &mut self,
        id: WebsiteId,
        patch: WebsitePatch,
    ) -> Result<&Website, SubscriptionError> {
        self.manager.update(id, patch)
    }

    /// Removes a website and hands it back with its customer reference
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::NotFound`] if it is not a member.
    pub fn remove(&mut self, id: WebsiteId) -> Result<Website, SubscriptionError> {
        self.manager.remove(id)
    }

    /// Registers websites one by one. See the module docs for batch semantics.
    pub fn add<I>(&mut self, websites: I) -> AddReport
    where
        I: IntoIterator<Item = Website>,
    {
        let mut report = AddReport::default();

        for website in websites {
            match self.add_one(website) {
                Ok(id) => report.added.push(id),
                Err(rejected) => report.rejected.push(rejected),
            }
        }

        report
    }
}

impl Deref for WebsitesMut<'_> {
    type Target = WebsiteManager;

    fn deref(&self) -> &Self::Target {
        self.manager
    }
}

/// A website that could not be registered, returned unassigned.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{website} rejected: {reason}")]
pub struct Rejected {
    pub website: Website,
    pub reason: SubscriptionError,
}

/// Outcome of a batch add.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Ids of accepted websites, in order.
    pub added: Vec<WebsiteId>,
    /// Websites that were turned away, in order.
    pub rejected: Vec<Rejected>,
}

impl AddReport {
    /// True when every website was accepted.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Converts the report into a plain result, failing with the first
    /// rejection if there was any.
    pub fn into_result(self) -> Result<Vec<WebsiteId>, Rejected> {
        match self.rejected.into_iter().next() {
            Some(rejected) => Err(rejected),
            None => Ok(self.added),
        }
    }
}
