//! Form body encoding.
//!
//! Request parameters travel as `application/x-www-form-urlencoded` pairs for
//! `POST`, and as query string pairs for `GET` and `DELETE`. Both use the same
//! ordered multi-value body built here.

use std::fmt;

/// An ordered, multi-value key/value body.
///
/// Keys may repeat (`expand[]`, `include[]`); insertion order is preserved so
/// encoded requests are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    /// Create an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`, keeping any existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Append a value for `key` only when one is present.
    pub fn add_opt(&mut self, key: &str, value: Option<impl fmt::Display>) {
        if let Some(value) = value {
            self.add(key, value.to_string());
        }
    }

    /// Replace every value for `key` with a single value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.remove(key);
        self.add(key, value);
    }

    /// Remove every value for `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in insertion order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether any value exists for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Keys in insertion order (repeated keys appear once per value).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// The raw pairs, suitable for `reqwest`'s `form`/`query` builders.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the body holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append every pair of `other`.
    pub fn extend(&mut self, other: FormBody) {
        self.pairs.extend(other.pairs);
    }
}

/// Types that contribute fields to a form body.
///
/// Encoding is total: nothing is validated here. A missing field the remote
/// API requires surfaces as an API error from the call itself.
pub trait FormEncode {
    /// Append this value's fields to `body`.
    fn encode_into(&self, body: &mut FormBody);

    /// Encode into a fresh body.
    fn to_form(&self) -> FormBody {
        let mut body = FormBody::new();
        self.encode_into(&mut body);
        body
    }
}

/// Format a percentage with exactly two decimal digits.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}
