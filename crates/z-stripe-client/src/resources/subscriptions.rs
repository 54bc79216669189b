//! `/customers/{customer}/subscriptions` operations.

use z_stripe_core::{
    FormEncode, Params, Subscription, SubscriptionCancelParams, SubscriptionListParams,
    SubscriptionParams, SubscriptionUpdateParams,
};

use super::Requestor;
use crate::backend::Method;
use crate::config::{default_config, Config};
use crate::error::ClientError;
use crate::iter::ListIter;

/// Client for a customer's subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriptionClient {
    requestor: Requestor,
}

fn collection_path(customer: &str) -> String {
    format!("/customers/{customer}/subscriptions")
}

fn item_path(customer: &str, id: &str) -> String {
    format!("/customers/{customer}/subscriptions/{id}")
}

impl SubscriptionClient {
    /// Create a client from explicit configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            requestor: Requestor::new(config),
        }
    }

    /// Create a client from the process-wide default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no default configuration can be loaded.
    pub fn from_default() -> Result<Self, ClientError> {
        Ok(Self::new(default_config()?))
    }

    /// Subscribe a customer to a plan.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn create(&self, params: &SubscriptionParams) -> Result<Subscription, ClientError> {
        self.requestor
            .call(
                Method::Post,
                &collection_path(&params.customer),
                Some(params.to_form()),
            )
            .await
    }

    /// Retrieve a customer's subscription.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn get(
        &self,
        customer: &str,
        id: &str,
        params: Option<&Params>,
    ) -> Result<Subscription, ClientError> {
        self.requestor
            .call(
                Method::Get,
                &item_path(customer, id),
                params.map(FormEncode::to_form),
            )
            .await
    }

    /// Update a subscription.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn update(
        &self,
        id: &str,
        params: &SubscriptionUpdateParams,
    ) -> Result<Subscription, ClientError> {
        self.requestor
            .call(
                Method::Post,
                &item_path(&params.customer, id),
                Some(params.to_form()),
            )
            .await
    }

    /// Cancel a subscription, now or at the end of the current period.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn cancel(
        &self,
        id: &str,
        params: &SubscriptionCancelParams,
    ) -> Result<(), ClientError> {
        tracing::debug!(
            subscription = %id,
            at_period_end = params.at_period_end,
            "Canceling subscription"
        );

        self.requestor
            .call_empty(
                Method::Delete,
                &item_path(&params.customer, id),
                Some(params.to_form()),
            )
            .await
    }

    /// Iterate over a customer's subscriptions.
    #[must_use]
    pub fn list(&self, params: &SubscriptionListParams) -> ListIter<Subscription> {
        self.requestor.list(
            collection_path(&params.customer),
            Some(params.list.clone()),
            params.to_form(),
        )
    }
}
