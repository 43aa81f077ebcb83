#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use website_subscriptions::prelude::*;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn single_plan() -> Arc<Plan> {
    Arc::new(Plan::new("Single", Decimal::new(4900, 2), PlanType::Single).unwrap())
}

pub fn plus_plan() -> Arc<Plan> {
    Arc::new(Plan::new("Plus", Decimal::new(9900, 2), PlanType::Plus).unwrap())
}

pub fn infinite_plan() -> Arc<Plan> {
    Arc::new(Plan::new("Infinite", Decimal::new(24900, 2), PlanType::Infinite).unwrap())
}

/// Customer without a subscription whose clock is frozen on `today`.
pub fn customer_on(today: NaiveDate) -> Customer {
    Customer::new("foo", "bar", "foo@bar.com").with_clock(Arc::new(FixedClock(today)))
}

/// Customer subscribed to `plan` on 2024-03-01.
pub fn subscribed_customer(plan: Arc<Plan>) -> Customer {
    let mut customer = customer_on(date(2024, 3, 1));
    customer.subscribe_plan(plan).unwrap();
    customer
}

pub fn websites(count: usize) -> Vec<Website> {
    (0..count)
        .map(|i| Website::new(format!("https://foo{i}.bar")))
        .collect()
}
