//! Events: notifications of changes to other resources.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::form::{FormBody, FormEncode};
use crate::list::{ListItem, ListParams};
use crate::params::Params;
use crate::timestamp::to_datetime;

/// An event record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    /// Event ID.
    pub id: String,
    /// Whether the event happened in live mode.
    #[serde(default, rename = "livemode")]
    pub live: bool,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
    /// The affected object and, for updates, its previous values.
    pub data: EventData,
    /// Webhook deliveries still pending.
    #[serde(default)]
    pub pending_webhooks: u64,
    /// Event type (e.g., "customer.subscription.updated").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Originating request: an ID string, or an object with `id` in newer API versions.
    #[serde(default)]
    pub request: serde_json::Value,
}

/// Event payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventData {
    /// The object as it was when the event fired.
    #[serde(default)]
    pub object: serde_json::Value,
    /// Previous values of changed attributes (updates only).
    #[serde(default)]
    pub previous_attributes: Option<serde_json::Value>,
}

impl Event {
    /// String at the nested `keys` path of the event object.
    ///
    /// Returns `None` when any step is missing or the leaf is not a string.
    #[must_use]
    pub fn obj_value(&self, keys: &[&str]) -> Option<&str> {
        lookup(&self.data.object, keys)
    }

    /// String at the nested `keys` path of the previous attributes.
    #[must_use]
    pub fn prev_value(&self, keys: &[&str]) -> Option<&str> {
        self.data
            .previous_attributes
            .as_ref()
            .and_then(|prev| lookup(prev, keys))
    }

    /// ID of the request that caused the event, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match &self.request {
            serde_json::Value::String(id) => Some(id.as_str()),
            serde_json::Value::Object(map) => map.get("id").and_then(serde_json::Value::as_str),
            _ => None,
        }
    }

    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.created)
    }
}

fn lookup<'a>(root: &'a serde_json::Value, keys: &[&str]) -> Option<&'a str> {
    if keys.is_empty() {
        return None;
    }
    keys.iter()
        .try_fold(root, |node, key| node.get(*key))
        .and_then(serde_json::Value::as_str)
}

impl ListItem for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Parameters for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListParams {
    /// Only events created at this Unix time.
    pub created: Option<i64>,
    /// Only events of this type.
    pub event_type: Option<String>,
    /// Paging controls.
    pub list: ListParams,
    /// Metadata and expansion.
    pub params: Params,
}

impl FormEncode for EventListParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add_opt("created", self.created);
        body.add_opt("type", self.event_type.as_ref());
        self.params.encode_into(body);
    }
}
