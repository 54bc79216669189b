//! The network boundary.
//!
//! Resource clients never talk to HTTP directly. They hand a method, path,
//! API key and form body to a [`Backend`], which returns the decoded JSON
//! response or an error. [`HttpBackend`] is the production implementation;
//! tests substitute their own.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use z_stripe_core::FormBody;

use crate::error::{ApiErrorResponse, ClientError};

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Retrieve or list. The body travels as the query string.
    Get,
    /// Create or update. The body travels as a form.
    Post,
    /// Delete or cancel. The body travels as the query string.
    Delete,
}

impl Method {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executes one API call.
#[async_trait]
pub trait Backend: Send + Sync + fmt::Debug {
    /// Perform `method` on `path` (relative, leading slash) with `key`.
    ///
    /// Returns the JSON response body, or `Value::Null` for an empty body.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-2xx status, or an
    /// undecodable response body.
    async fn call(
        &self,
        method: Method,
        path: &str,
        key: &str,
        body: Option<&FormBody>,
    ) -> Result<serde_json::Value, ClientError>;
}

/// Options for the HTTP backend.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL (default: `https://api.stripe.com/v1`).
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// `Stripe-Version` header to pin, if any.
    pub api_version: Option<String>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: HttpBackend::DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            api_version: None,
            user_agent: format!("z-stripe/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Options pointing at a different base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// `reqwest`-backed [`Backend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    api_version: Option<String>,
}

impl HttpBackend {
    /// Stripe API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.stripe.com/v1";

    /// Create a backend with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_options(ClientOptions::default())
    }

    /// Create a backend with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn with_options(options: ClientOptions) -> Result<Self, ClientError> {
        let base_url = options.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_version: options.api_version,
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a response into JSON or an API error.
    async fn handle_response(
        method: Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            tracing::debug!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                "Stripe API responded"
            );
            if body.is_empty() {
                return Ok(serde_json::Value::Null);
            }
            return Ok(serde_json::from_slice(&body)?);
        }

        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Stripe API returned an error"
        );

        Err(ApiErrorResponse::into_error(&body, status.as_u16()))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn call(
        &self,
        method: Method,
        path: &str,
        key: &str,
        body: Option<&FormBody>,
    ) -> Result<serde_json::Value, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        }
        .basic_auth(key, Option::<&str>::None);

        if let Some(version) = &self.api_version {
            request = request.header("Stripe-Version", version);
        }

        if let Some(body) = body {
            request = match method {
                Method::Post => request.form(body.pairs()),
                Method::Get | Method::Delete => request.query(body.pairs()),
            };
        }

        tracing::debug!(
            method = %method,
            path = %path,
            params = body.map_or(0, FormBody::len),
            "Calling Stripe API"
        );

        let response = request.send().await?;
        Self::handle_response(method, path, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_trims_trailing_slash() {
        let backend =
            HttpBackend::with_options(ClientOptions::with_base_url("http://localhost:12111/v1/"))
                .unwrap();
        assert_eq!(backend.base_url(), "http://localhost:12111/v1");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = HttpBackend::with_options(ClientOptions::with_base_url("/")).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.base_url, "https://api.stripe.com/v1");
        assert_eq!(options.timeout_seconds, 30);
        assert!(options.user_agent.starts_with("z-stripe/"));
    }

    #[test]
    fn method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
