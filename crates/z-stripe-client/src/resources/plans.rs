//! `/plans` operations.

use z_stripe_core::{FormEncode, Params, Plan, PlanListParams, PlanParams, PlanUpdateParams};

use super::Requestor;
use crate::backend::Method;
use crate::config::{default_config, Config};
use crate::error::ClientError;
use crate::iter::ListIter;

/// Client for the plans API.
#[derive(Debug, Clone)]
pub struct PlanClient {
    requestor: Requestor,
}

impl PlanClient {
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

    /// Create a plan.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn create(&self, params: &PlanParams) -> Result<Plan, ClientError> {
        self.requestor
            .call(Method::Post, "/plans", Some(params.to_form()))
            .await
    }

    /// Retrieve a plan.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn get(&self, id: &str, params: Option<&Params>) -> Result<Plan, ClientError> {
        self.requestor
            .call(
                Method::Get,
                &format!("/plans/{id}"),
                params.map(FormEncode::to_form),
            )
            .await
    }

    /// Update a plan's name or statement text.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn update(
        &self,
        id: &str,
        params: Option<&PlanUpdateParams>,
    ) -> Result<Plan, ClientError> {
        self.requestor
            .call(
                Method::Post,
                &format!("/plans/{id}"),
                params.map(FormEncode::to_form),
            )
            .await
    }

    /// Delete a plan.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.requestor
            .call_empty(Method::Delete, &format!("/plans/{id}"), None)
            .await
    }

    /// Iterate over all plans.
    #[must_use]
    pub fn list(&self, params: Option<&PlanListParams>) -> ListIter<Plan> {
        let base = params.map(FormEncode::to_form).unwrap_or_default();
        let list = params.map(|p| p.list.clone());
        self.requestor.list("/plans".to_string(), list, base)
    }
}
