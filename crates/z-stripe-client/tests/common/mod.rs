//! Shared helpers for tests against a mock Stripe server.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::MockServer;

use z_stripe_client::{ClientOptions, Config, StripeClient};

pub const API_KEY: &str = "sk_test_mock";

/// Client whose HTTP backend points at `server`.
pub fn client_for(server: &MockServer) -> StripeClient {
    StripeClient::with_config(config_for(server))
}

pub fn config_for(server: &MockServer) -> Config {
    Config::with_options(API_KEY, ClientOptions::with_base_url(server.uri()))
        .expect("mock config")
}

pub fn plan_json(id: &str, amount: u64) -> Value {
    json!({
        "id": id,
        "object": "plan",
        "livemode": false,
        "amount": amount,
        "currency": "usd",
        "created": 1_400_000_000,
        "interval": "month",
        "interval_count": 1,
        "name": format!("Plan {id}"),
        "metadata": {}
    })
}

pub fn subscription_json(id: &str, customer: &str, plan: &str) -> Value {
    json!({
        "id": id,
        "object": "subscription",
        "cancel_at_period_end": false,
        "customer": customer,
        "plan": plan_json(plan, 2000),
        "quantity": 1,
        "status": "active",
        "start": 1_400_000_000,
        "current_period_start": 1_400_000_000,
        "current_period_end": 1_402_592_000,
        "metadata": {}
    })
}

pub fn dispute_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "object": "dispute",
        "livemode": false,
        "amount": 1000,
        "currency": "usd",
        "charge": "ch_1",
        "created": 1_400_000_000,
        "reason": "fraudulent",
        "status": status,
        "balance_transactions": [],
        "evidence": null,
        "metadata": {}
    })
}

pub fn event_json(id: &str, event_type: &str) -> Value {
    json!({
        "id": id,
        "object": "event",
        "livemode": false,
        "created": 1_400_000_000,
        "type": event_type,
        "pending_webhooks": 0,
        "request": "req_1",
        "data": { "object": { "id": "sub_1", "object": "subscription" } }
    })
}

/// A list envelope around `data`.
pub fn page(url: &str, data: Vec<Value>, has_more: bool) -> Value {
    json!({
        "object": "list",
        "url": url,
        "has_more": has_more,
        "data": data
    })
}
