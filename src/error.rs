//! Domain error type shared by plans, customers, and website managers.

use crate::domain::entities::{CustomerId, WebsiteId};

/// Errors raised when a subscription or website-quota rule is violated.
///
/// Every error is local to the operation that produced it. Nothing is
/// committed when an operation fails, except for the websites that a
/// batch add already accepted before a later item was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Customer has no active subscription")]
    NoSubscription,

    #[error("Customer is already subscribed to a plan ({current})")]
    AlreadySubscribed { current: String },

    #[error("Plan ({plan}) is already associated with the customer")]
    SamePlan { plan: String },

    #[error("Customer can't have more websites. Total allowed: {allowed}")]
    QuotaExceeded { allowed: u32 },

    #[error("Website {website} is not registered with this customer")]
    NotFound { website: WebsiteId },

    #[error("Customer {customer} not found")]
    CustomerNotFound { customer: CustomerId },

    #[error("Date out of supported range: {message}")]
    DateOutOfRange { message: String },
}

impl SubscriptionError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn date_out_of_range(message: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NoSubscription => "no_subscription",
            Self::AlreadySubscribed { .. } => "already_subscribed",
            Self::SamePlan { .. } => "same_plan",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::NotFound { .. } => "not_found",
            Self::CustomerNotFound { .. } => "customer_not_found",
            Self::DateOutOfRange { .. } => "date_out_of_range",
        }
    }
}
