//! `/events` operations.

use z_stripe_core::{Event, EventListParams, FormEncode, Params};

use super::Requestor;
use crate::backend::Method;
use crate::config::{default_config, Config};
use crate::error::ClientError;
use crate::iter::ListIter;

/// Client for the events API.
#[derive(Debug, Clone)]
pub struct EventClient {
    requestor: Requestor,
}

impl EventClient {
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

    /// Retrieve an event.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the call fails.
    pub async fn get(&self, id: &str, params: Option<&Params>) -> Result<Event, ClientError> {
        self.requestor
            .call(
                Method::Get,
                &format!("/events/{id}"),
                params.map(FormEncode::to_form),
            )
            .await
    }

    /// Iterate over events, newest first.
    #[must_use]
    pub fn list(&self, params: Option<&EventListParams>) -> ListIter<Event> {
        let base = params.map(FormEncode::to_form).unwrap_or_default();
        let list = params.map(|p| p.list.clone());
        self.requestor.list("/events".to_string(), list, base)
    }
}
