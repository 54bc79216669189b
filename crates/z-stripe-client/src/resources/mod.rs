//! Resource clients.
//!
//! Each client follows the same shape: encode the typed parameters (no
//! parameters means no body, so the server applies its defaults), pick the
//! verb and path for the operation, call the backend with the configured key,
//! and decode the response. Backend errors are returned as-is.

pub mod disputes;
pub mod events;
pub mod plans;
pub mod subscriptions;

use std::sync::Arc;

use futures::FutureExt;
use serde::de::DeserializeOwned;
use z_stripe_core::{FormBody, List, ListItem, ListParams};

use crate::backend::{Backend, Method};
use crate::config::Config;
use crate::error::ClientError;
use crate::iter::ListIter;

pub use disputes::DisputeClient;
pub use events::EventClient;
pub use plans::PlanClient;
pub use subscriptions::SubscriptionClient;

/// Backend and key shared by the resource clients.
#[derive(Debug, Clone)]
pub(crate) struct Requestor {
    backend: Arc<dyn Backend>,
    key: String,
}

impl Requestor {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            backend: Arc::clone(&config.backend),
            key: config.api_key.clone(),
        }
    }

    /// Call and decode the response into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<FormBody>,
    ) -> Result<T, ClientError> {
        let value = self
            .backend
            .call(method, path, &self.key, body.as_ref())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Call and discard the response body.
    pub(crate) async fn call_empty(
        &self,
        method: Method,
        path: &str,
        body: Option<FormBody>,
    ) -> Result<(), ClientError> {
        self.backend
            .call(method, path, &self.key, body.as_ref())
            .await?;
        Ok(())
    }

    /// Lazy iterator over `GET path`.
    pub(crate) fn list<T>(
        &self,
        path: String,
        list: Option<ListParams>,
        base: FormBody,
    ) -> ListIter<T>
    where
        T: DeserializeOwned + ListItem + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let key = self.key.clone();

        ListIter::new(list, base, move |body: FormBody| {
            let backend = Arc::clone(&backend);
            let key = key.clone();
            let path = path.clone();
            async move {
                let value = backend.call(Method::Get, &path, &key, Some(&body)).await?;
                let page: List<T> = serde_json::from_value(value)?;
                Ok::<_, ClientError>(page)
            }
            .boxed()
        })
    }
}
