//! Subscriptions: a customer's enrollment in a plan.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::CardParams;
use crate::form::{format_percent, FormBody, FormEncode};
use crate::list::{ListItem, ListParams};
use crate::params::Params;
use crate::plan::Plan;
use crate::timestamp::to_datetime;

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In a trial period.
    Trialing,
    /// Active and billing.
    Active,
    /// Latest payment failed; retrying.
    PastDue,
    /// Canceled.
    Canceled,
    /// Retries exhausted without payment.
    Unpaid,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Parameters for creating a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionParams {
    /// Customer the subscription belongs to. Part of the path, not the body.
    pub customer: String,
    /// Plan ID.
    pub plan: String,
    /// Card token. Takes precedence over `card`.
    pub token: Option<String>,
    /// Card to attach.
    pub card: Option<CardParams>,
    /// Coupon to apply.
    pub coupon: Option<String>,
    /// Trial end (Unix timestamp).
    pub trial_end: Option<i64>,
    /// Quantity of the plan.
    pub quantity: Option<u64>,
    /// Platform fee percentage.
    pub application_fee_percent: Option<f64>,
    /// Metadata and expansion.
    pub params: Params,
}

impl SubscriptionParams {
    /// Create parameters with the required fields.
    #[must_use]
    pub fn new(customer: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            plan: plan.into(),
            token: None,
            card: None,
            coupon: None,
            trial_end: None,
            quantity: None,
            application_fee_percent: None,
            params: Params::default(),
        }
    }
}

impl FormEncode for SubscriptionParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add("plan", self.plan.clone());

        if let Some(token) = &self.token {
            body.add("card", token.clone());
        } else if let Some(card) = &self.card {
            card.encode_details(body, true);
        }

        body.add_opt("coupon", self.coupon.as_ref());
        body.add_opt("trial_end", self.trial_end);
        body.add_opt("quantity", self.quantity);
        body.add_opt(
            "application_fee_percent",
            self.application_fee_percent.map(format_percent),
        );
        self.params.encode_into(body);
    }
}

/// Parameters for updating a subscription.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionUpdateParams {
    /// Customer the subscription belongs to. Part of the path, not the body.
    pub customer: String,
    /// New plan ID.
    pub plan: Option<String>,
    /// Disable proration for a plan change.
    pub no_prorate: bool,
    /// Card token. Takes precedence over `card`.
    pub token: Option<String>,
    /// Card to attach.
    pub card: Option<CardParams>,
    /// Coupon to apply.
    pub coupon: Option<String>,
    /// Trial end (Unix timestamp).
    pub trial_end: Option<i64>,
    /// Quantity of the plan.
    pub quantity: Option<u64>,
    /// Platform fee percentage.
    pub application_fee_percent: Option<f64>,
    /// Metadata and expansion.
    pub params: Params,
}

impl SubscriptionUpdateParams {
    /// Create empty update parameters for a customer's subscription.
    #[must_use]
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            ..Self::default()
        }
    }
}

impl FormEncode for SubscriptionUpdateParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add_opt("plan", self.plan.as_ref());

        if self.no_prorate {
            body.add("prorate", "false");
        }

        if let Some(token) = &self.token {
            body.add("card", token.clone());
        } else if let Some(card) = &self.card {
            match &card.token {
                Some(token) => body.add("card", token.clone()),
                None => card.encode_details(body, true),
            }
        }

        body.add_opt("coupon", self.coupon.as_ref());
        body.add_opt("trial_end", self.trial_end);
        body.add_opt("quantity", self.quantity);
        body.add_opt(
            "application_fee_percent",
            self.application_fee_percent.map(format_percent),
        );
        self.params.encode_into(body);
    }
}

/// Parameters for canceling a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionCancelParams {
    /// Customer the subscription belongs to. Part of the path, not the body.
    pub customer: String,
    /// Cancel at the end of the current period instead of immediately.
    pub at_period_end: bool,
    /// Metadata and expansion.
    pub params: Params,
}

impl SubscriptionCancelParams {
    /// Cancel immediately.
    #[must_use]
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            ..Self::default()
        }
    }
}

impl FormEncode for SubscriptionCancelParams {
    fn encode_into(&self, body: &mut FormBody) {
        if self.at_period_end {
            body.add("at_period_end", "true");
        }
        self.params.encode_into(body);
    }
}

/// Parameters for listing a customer's subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionListParams {
    /// Customer whose subscriptions to list. Part of the path.
    pub customer: String,
    /// Paging controls.
    pub list: ListParams,
    /// Metadata and expansion.
    pub params: Params,
}

impl SubscriptionListParams {
    /// List a customer's subscriptions with server-default paging.
    #[must_use]
    pub fn new(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            ..Self::default()
        }
    }
}

impl FormEncode for SubscriptionListParams {
    fn encode_into(&self, body: &mut FormBody) {
        self.params.encode_into(body);
    }
}

/// A discount applied to a subscription.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Discount {
    /// The coupon object that created the discount.
    #[serde(default)]
    pub coupon: serde_json::Value,
    /// Customer ID.
    #[serde(default)]
    pub customer: Option<String>,
    /// Start (Unix timestamp).
    #[serde(default)]
    pub start: i64,
    /// End (Unix timestamp), if the discount expires.
    #[serde(default)]
    pub end: Option<i64>,
}

/// A subscription record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: String,
    /// Whether the subscription ends at the current period's end.
    #[serde(default)]
    pub cancel_at_period_end: bool,
    /// Customer ID.
    #[serde(default)]
    pub customer: String,
    /// The subscribed plan.
    #[serde(default)]
    pub plan: Option<Plan>,
    /// Quantity of the plan.
    #[serde(default)]
    pub quantity: u64,
    /// Lifecycle state.
    pub status: SubscriptionStatus,
    /// Platform fee percentage.
    #[serde(default)]
    pub application_fee_percent: Option<f64>,
    /// Cancellation time (Unix).
    #[serde(default)]
    pub canceled_at: Option<i64>,
    /// Start time (Unix).
    #[serde(default)]
    pub start: i64,
    /// Current period start (Unix).
    #[serde(default)]
    pub current_period_start: i64,
    /// Current period end (Unix).
    #[serde(default)]
    pub current_period_end: i64,
    /// Applied discount.
    #[serde(default)]
    pub discount: Option<Discount>,
    /// End time (Unix), once ended.
    #[serde(default)]
    pub ended_at: Option<i64>,
    /// Metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Trial start (Unix).
    #[serde(default)]
    pub trial_start: Option<i64>,
    /// Trial end (Unix).
    #[serde(default)]
    pub trial_end: Option<i64>,
}

impl Subscription {
    /// Start time.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.start)
    }

    /// End of the current billing period.
    #[must_use]
    pub fn current_period_end_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.current_period_end)
    }

    /// Whether the subscription is usable (active or trialing).
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Active | SubscriptionStatus::Trialing
        )
    }
}

impl ListItem for Subscription {
    fn id(&self) -> &str {
        &self.id
    }
}
