//! `/disputes` operations.

use z_stripe_core::{Dispute, DisputeListParams, DisputeParams, FormEncode, Params};

use super::Requestor;
use crate::backend::Method;
use crate::config::{default_config, Config};
use crate::error::ClientError;
use crate::iter::ListIter;

/// Client for the disputes API.
#[derive(Debug, Clone)]
pub struct DisputeClient {
    requestor: Requestor,
}

impl DisputeClient {
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

    /// Retrieve a dispute.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn get(&self, id: &str, params: Option<&Params>) -> Result<Dispute, ClientError> {
        self.requestor
            .call(
                Method::Get,
                &format!("/disputes/{id}"),
                params.map(FormEncode::to_form),
            )
            .await
    }

    /// Submit evidence or metadata for a dispute.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn update(
        &self,
        id: &str,
        params: Option<&DisputeParams>,
    ) -> Result<Dispute, ClientError> {
        self.requestor
            .call(
                Method::Post,
                &format!("/disputes/{id}"),
                params.map(FormEncode::to_form),
            )
            .await
    }

    /// Concede a dispute.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn close(&self, id: &str) -> Result<Dispute, ClientError> {
        self.requestor
            .call(Method::Post, &format!("/disputes/{id}/close"), None)
            .await
    }

    /// Iterate over disputes.
    #[must_use]
    pub fn list(&self, params: Option<&DisputeListParams>) -> ListIter<Dispute> {
        let base = params.map(FormEncode::to_form).unwrap_or_default();
        let list = params.map(|p| p.list.clone());
        self.requestor.list("/disputes".to_string(), list, base)
    }
}
