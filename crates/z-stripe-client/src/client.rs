//! Entry point bundling the resource clients.

use crate::backend::ClientOptions;
use crate::config::{default_config, Config};
use crate::error::ClientError;
use crate::resources::{DisputeClient, EventClient, PlanClient, SubscriptionClient};

/// Stripe API client.
///
/// Holds one [`Config`] and hands out resource clients that share it.
#[derive(Debug, Clone)]
pub struct StripeClient {
    config: Config,
}

impl StripeClient {
    /// Create a client for `api_key` using the default HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the backend cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self::with_config(Config::new(api_key)?))
    }

    /// Create a client with custom HTTP options.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the backend cannot be built.
    pub fn with_options(
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        Ok(Self::with_config(Config::with_options(api_key, options)?))
    }

    /// Create a client from explicit configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Create a client from the process-wide default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no default configuration can be loaded.
    pub fn from_default() -> Result<Self, ClientError> {
        Ok(Self::with_config(default_config()?.clone()))
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plans API.
    #[must_use]
    pub fn plans(&self) -> PlanClient {
        PlanClient::new(&self.config)
    }

    /// Subscriptions API.
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionClient {
        SubscriptionClient::new(&self.config)
    }

    /// Disputes API.
    #[must_use]
    pub fn disputes(&self) -> DisputeClient {
        DisputeClient::new(&self.config)
    }

    /// Events API.
    #[must_use]
    pub fn events(&self) -> EventClient {
        EventClient::new(&self.config)
    }
}
