//! Client configuration and the process-wide default.
//!
//! # Initialization order
//!
//! Call [`init`] once during startup, before any client is built with
//! `from_default()`. If [`init`] was never called, the first call to
//! [`default_config`] loads [`Config::from_env`] and keeps it for the rest of
//! the process. Once set, the default never changes; clients that need a
//! different key or backend take an explicit [`Config`].

use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::backend::{Backend, ClientOptions, HttpBackend};
use crate::error::ClientError;

static DEFAULT_CONFIG: OnceLock<Config> = OnceLock::new();

/// Secrets file locations checked by [`Config::from_env`], in order.
const SECRET_PATHS: [&str; 3] = [
    ".secrets/stripe.json",
    "z-stripe/.secrets/stripe.json",
    "../.secrets/stripe.json",
];

/// API key and backend used by resource clients.
#[derive(Debug, Clone)]
pub struct Config {
    /// Stripe secret API key (`sk_test_...` or `sk_live_...`).
    pub api_key: String,
    /// Backend that executes calls.
    pub backend: Arc<dyn Backend>,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    api_key: String,
    #[serde(default)]
    api_base: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    timeout_seconds: Option<u64>,
}

impl Config {
    /// Configuration using the default HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the backend cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    /// Configuration using an HTTP backend with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the backend cannot be built.
    pub fn with_options(
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClientError::Configuration("API key is empty".into()));
        }
        let backend = HttpBackend::with_options(options)?;
        Ok(Self::with_backend(api_key, Arc::new(backend)))
    }

    /// Configuration using a caller-supplied backend.
    #[must_use]
    pub fn with_backend(api_key: impl Into<String>, backend: Arc<dyn Backend>) -> Self {
        Self {
            api_key: api_key.into(),
            backend,
        }
    }

    /// Load configuration from a secrets file or environment variables.
    ///
    /// Secrets files are tried first (see `SECRET_PATHS`). A file that cannot
    /// be read or parsed is skipped. Otherwise `STRIPE_API_KEY`,
    /// `STRIPE_API_BASE`, `STRIPE_API_VERSION` and `STRIPE_TIMEOUT_SECONDS`
    /// are read.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is found or the backend cannot be built.
    pub fn from_env() -> Result<Self, ClientError> {
        if let Some(config) = Self::from_first_secrets_file(&SECRET_PATHS) {
            return Ok(config);
        }

        tracing::debug!("Stripe secrets file not found, using environment variables");

        let api_key = std::env::var("STRIPE_API_KEY")
            .map_err(|_| ClientError::Configuration("STRIPE_API_KEY is not set".into()))?;

        let mut options = ClientOptions::default();
        if let Ok(base_url) = std::env::var("STRIPE_API_BASE") {
            options.base_url = base_url;
        }
        options.api_version = std::env::var("STRIPE_API_VERSION").ok();
        if let Some(timeout) = std::env::var("STRIPE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            options.timeout_seconds = timeout;
        }

        Self::with_options(api_key, options)
    }

    /// Load configuration from a JSON secrets file.
    ///
    /// The file holds `api_key` and, optionally, `api_base`, `api_version`
    /// and `timeout_seconds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the backend
    /// cannot be built.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let secrets: StripeSecrets = serde_json::from_str(&contents)?;

        tracing::info!(path = %path.display(), "Loaded Stripe secrets from file");

        let mut options = ClientOptions::default();
        if let Some(base_url) = secrets.api_base {
            options.base_url = base_url;
        }
        options.api_version = secrets.api_version;
        if let Some(timeout) = secrets.timeout_seconds {
            options.timeout_seconds = timeout;
        }

        Self::with_options(secrets.api_key, options)
    }

    /// First of `paths` that loads, skipping missing and unusable files.
    fn from_first_secrets_file<P: AsRef<Path>>(paths: &[P]) -> Option<Self> {
        paths
            .iter()
            .map(AsRef::<Path>::as_ref)
            .filter(|path| path.exists())
            .find_map(|path| match Self::from_secrets_file(path) {
                Ok(config) => Some(config),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Skipping unusable Stripe secrets file"
                    );
                    None
                }
            })
    }
}

/// Set the process-wide default configuration.
///
/// # Errors
///
/// Returns an error if a default is already set, either by an earlier
/// `init` or by a lazy [`default_config`] load.
pub fn init(config: Config) -> Result<(), ClientError> {
    DEFAULT_CONFIG
        .set(config)
        .map_err(|_| ClientError::Configuration("default configuration already set".into()))
}

/// The process-wide default configuration.
///
/// # Errors
///
/// Returns an error if [`init`] was never called and [`Config::from_env`] fails.
pub fn default_config() -> Result<&'static Config, ClientError> {
    if let Some(config) = DEFAULT_CONFIG.get() {
        return Ok(config);
    }
    let config = Config::from_env()?;
    Ok(DEFAULT_CONFIG.get_or_init(|| config))
}
