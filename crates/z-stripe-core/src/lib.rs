//! Core types for the z-stripe client.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Form encoding**: `FormBody`, the `FormEncode` trait and value formatters
//! - **Common parameters**: `Params` (metadata, expansion), `CardParams`
//! - **Pagination**: `ListParams`, `Filters`, `ListMeta`, `List`, `ListItem`
//! - **Resources**: plans, subscriptions, disputes and events, with their
//!   parameter objects and response records
//!
//! # Optional fields
//!
//! Every optional request field is an `Option`. `None` is never encoded;
//! `Some(value)` is always encoded, even when the value is zero. This keeps
//! "not specified" distinct from "explicitly zero".

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod card;
pub mod dispute;
pub mod event;
pub mod form;
pub mod list;
pub mod params;
pub mod plan;
pub mod subscription;
mod timestamp;

pub use card::CardParams;
pub use dispute::{
    BalanceTransaction, Dispute, DisputeListParams, DisputeParams, DisputeReason, DisputeStatus,
};
pub use event::{Event, EventData, EventListParams};
pub use form::{format_percent, FormBody, FormEncode};
pub use list::{Filter, Filters, List, ListItem, ListMeta, ListParams};
pub use params::Params;
pub use plan::{Plan, PlanInterval, PlanListParams, PlanParams, PlanUpdateParams};
pub use subscription::{
    Discount, Subscription, SubscriptionCancelParams, SubscriptionListParams, SubscriptionParams,
    SubscriptionStatus, SubscriptionUpdateParams,
};
