//! Parameters shared by every operation.

use std::collections::BTreeMap;

use crate::form::{FormBody, FormEncode};

/// Metadata and expansion, accepted by every operation that takes parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Key/value metadata, encoded as `metadata[key]=value` in key order.
    pub metadata: BTreeMap<String, String>,
    /// Fields to expand in the response, encoded as `expand[]=field`.
    pub expand: Vec<String>,
}

impl Params {
    /// Create empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Request expansion of a response field.
    #[must_use]
    pub fn with_expand(mut self, field: impl Into<String>) -> Self {
        self.expand.push(field.into());
        self
    }
}

impl FormEncode for Params {
    fn encode_into(&self, body: &mut FormBody) {
        for (key, value) in &self.metadata {
            body.add(format!("metadata[{key}]"), value.clone());
        }
        for field in &self.expand {
            body.add("expand[]", field.clone());
        }
    }
}
