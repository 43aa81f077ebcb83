mod common;

use common::{infinite_plan, plus_plan, single_plan, subscribed_customer, websites};
use website_subscriptions::prelude::*;

#[test]
fn test_single_plan_allows_only_one_website() {
    let mut customer = subscribed_customer(single_plan());

    customer
        .websites_mut()
        .add_one(Website::new("https://foo.bar"))
        .unwrap();
    assert_eq!(customer.websites().count(), 1);

    let rejected = customer
        .websites_mut()
        .add_one(Website::new("https://foobar.bar"))
        .unwrap_err();
    assert_eq!(rejected.reason, SubscriptionError::QuotaExceeded { allowed: 1 });
    assert_eq!(customer.websites().count(), 1);
}

#[test]
fn test_plus_plan_allows_three_websites() {
    let mut customer = subscribed_customer(plus_plan());

    let report = customer.websites_mut().add(websites(3));
    assert!(report.is_complete());
    assert_eq!(customer.websites().count(), 3);

    let rejected = customer
        .websites_mut()
        .add_one(Website::new("https://bar.foo"))
        .unwrap_err();
    assert_eq!(rejected.reason, SubscriptionError::QuotaExceeded { allowed: 3 });
}

#[test]
fn test_infinite_plan_allows_unlimited_websites() {
    const TOTAL_WEBSITES: usize = 100_000;
    let mut customer = subscribed_customer(infinite_plan());

    let report = customer.websites_mut().add(websites(TOTAL_WEBSITES));

    assert!(report.is_complete());
    assert_eq!(report.added.len(), TOTAL_WEBSITES);
    assert_eq!(customer.websites().count(), TOTAL_WEBSITES);
    assert!(customer.can_add_website().unwrap());
}

#[test]
fn test_can_not_add_website_without_subscription() {
    let mut customer = Customer::new("foo", "bar", "foo@bar.com");

    assert_eq!(
        customer.can_add_website().unwrap_err(),
        SubscriptionError::NoSubscription
    );

    let report = customer.websites_mut().add(websites(2));
    assert!(report.added.is_empty());
    assert!(
        report
            .rejected
            .iter()
            .all(|r| r.reason == SubscriptionError::NoSubscription)
    );
}

#[test]
fn test_website_crud_operations() {
    let mut customer = subscribed_customer(single_plan());
    let website = Website::new("https://example.com");
    let id = website.id();

    customer.websites_mut().add_one(website).unwrap();
    assert!(customer.websites().all().iter().any(|w| w.id() == id));
    assert_eq!(
        customer.websites().get(id).unwrap().customer(),
        Some(customer.id())
    );

    let old_url = customer.websites().get(id).unwrap().url.clone();
    customer
        .websites_mut()
        .update(id, WebsitePatch::url("https://foo.bar"))
        .unwrap();
    let new_url = &customer.websites().get(id).unwrap().url;
    assert_ne!(&old_url, new_url);
    assert_eq!(new_url, "https://foo.bar");

    let count = customer.websites().count();
    let removed = customer.websites_mut().remove(id).unwrap();
    assert!(!customer.websites().all().iter().any(|w| w.id() == id));
    assert!(removed.customer().is_none());
    assert_eq!(customer.websites().count(), count - 1);

    assert_eq!(
        customer.websites_mut().remove(id).unwrap_err(),
        SubscriptionError::NotFound { website: id }
    );
}

#[test]
fn test_website_can_initialize_with_valid_customer() {
    let mut customer = subscribed_customer(single_plan());
    assert_eq!(customer.websites().count(), 0);

    let id = Website::create_for("https://bar.foo", &mut customer).unwrap();

    assert_eq!(customer.websites().count(), 1);
    assert_eq!(
        customer.websites().get(id).unwrap().customer(),
        Some(customer.id())
    );
}

#[test]
fn test_website_does_not_initialize_with_full_customer() {
    let mut customer = subscribed_customer(single_plan());
    Website::create_for("https://foo.bar", &mut customer).unwrap();
    assert_eq!(customer.websites().count(), 1);

    let rejected = Website::create_for("https://example.com", &mut customer).unwrap_err();

    assert!(rejected.website.customer().is_none());
    assert_eq!(rejected.reason.code(), "quota_exceeded");
    assert_eq!(customer.websites().count(), 1);
}

#[test]
fn test_batch_add_keeps_accepted_items() {
    let mut customer = subscribed_customer(plus_plan());
    customer
        .websites_mut()
        .add_one(Website::new("https://first.bar"))
        .unwrap();

    let report = customer.websites_mut().add(websites(4));

    assert_eq!(report.added.len(), 2);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(customer.websites().count(), 3);
    let urls: Vec<_> = report.rejected.iter().map(|r| r.website.url.as_str()).collect();
    assert_eq!(urls, ["https://foo2.bar", "https://foo3.bar"]);
}

#[test]
fn test_rejected_website_can_be_retried_after_upgrade() {
    let mut customer = subscribed_customer(single_plan());
    Website::create_for("https://foo.bar", &mut customer).unwrap();
    let rejected = Website::create_for("https://bar.foo", &mut customer).unwrap_err();

    customer.change_plan(plus_plan()).unwrap();
    let id = rejected.website.assign_to(&mut customer).unwrap();

    assert_eq!(customer.websites().count(), 2);
    assert!(customer.websites().contains(id));
}

#[test]
fn test_reassign_between_customers() {
    let mut first = subscribed_customer(single_plan());
    let mut second = subscribed_customer(single_plan());
    let id = Website::create_for("https://foo.bar", &mut first).unwrap();

    reassign(id, &mut first, &mut second).unwrap();

    assert!(first.websites().is_empty());
    assert_eq!(
        second.websites().get(id).unwrap().customer(),
        Some(second.id())
    );

    // Second is now full; moving another website there fails without side effects.
    let other = Website::create_for("https://bar.foo", &mut first).unwrap();
    assert_eq!(
        reassign(other, &mut first, &mut second).unwrap_err(),
        SubscriptionError::QuotaExceeded { allowed: 1 }
    );
    assert!(first.websites().contains(other));
}

#[test]
fn test_cancelled_customer_keeps_websites_but_can_not_add() {
    let mut customer = subscribed_customer(plus_plan());
    customer.websites_mut().add(websites(2));

    customer.remove_subscription().unwrap();

    assert_eq!(customer.websites().count(), 2);
    let rejected = customer
        .websites_mut()
        .add_one(Website::new("https://late.bar"))
        .unwrap_err();
    assert_eq!(rejected.reason, SubscriptionError::NoSubscription);
}
