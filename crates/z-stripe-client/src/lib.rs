//! Z-Stripe client.
//!
//! Async client for the Stripe plans, subscriptions, disputes and events
//! APIs, with lazy cursor pagination over every list endpoint.
//!
//! # Example
//!
//! ```no_run
//! use z_stripe_client::{ListParams, PlanListParams, StripeClient};
//!
//! # async fn example() -> Result<(), z_stripe_client::ClientError> {
//! let client = StripeClient::new("sk_test_...")?;
//!
//! let params = PlanListParams {
//!     list: ListParams::new().limit(10),
//!     ..PlanListParams::default()
//! };
//! let mut plans = client.plans().list(Some(&params));
//! while let Some(plan) = plans.next().await? {
//!     println!("{} - {} {}", plan.id, plan.amount, plan.currency);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Default configuration
//!
//! Call [`init`] at startup to set the API key and backend used by every
//! `from_default()` constructor. Without it, [`default_config`] falls back to
//! [`Config::from_env`] on first use.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod backend;
mod client;
mod config;
mod error;
mod iter;
pub mod resources;
pub mod webhook;

pub use backend::{Backend, ClientOptions, HttpBackend, Method};
pub use client::StripeClient;
pub use config::{default_config, init, Config};
pub use error::ClientError;
pub use iter::{ListIter, PageFuture};
pub use resources::{DisputeClient, EventClient, PlanClient, SubscriptionClient};
pub use z_stripe_core::*;
