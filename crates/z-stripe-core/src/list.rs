//! Cursor pagination types.
//!
//! List endpoints return a page of records plus a `has_more` flag. The next
//! page is requested by passing the last record's ID as `starting_after`, or,
//! when paging backwards, as `ending_before`.

use serde::Deserialize;

use crate::form::{FormBody, FormEncode};

/// Paging controls common to every list operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Return records after this ID.
    pub starting_after: Option<String>,
    /// Return records before this ID. Takes precedence over `starting_after`.
    pub ending_before: Option<String>,
    /// Page size. Only positive values are sent.
    pub limit: Option<u32>,
    /// Additional filters.
    pub filters: Filters,
    /// Ask the API to include `total_count` in the list metadata.
    pub include_total_count: bool,
    /// Fetch a single page only, regardless of `has_more`.
    pub single: bool,
}

impl ListParams {
    /// Create empty list parameters (server defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Start after the given ID.
    #[must_use]
    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    /// End before the given ID, paging backwards.
    #[must_use]
    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    /// Add a filter. An empty `op` encodes as `key=value`.
    #[must_use]
    pub fn filter(
        mut self,
        key: impl Into<String>,
        op: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.add(key, op, value);
        self
    }

    /// Request `total_count` in the list metadata.
    #[must_use]
    pub fn include_total_count(mut self) -> Self {
        self.include_total_count = true;
        self
    }

    /// Stop after the first page.
    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Whether iteration walks backwards from `ending_before`.
    #[must_use]
    pub fn is_backward(&self) -> bool {
        self.ending_before.is_some()
    }

    /// Move the cursor past `id` in the current direction.
    pub fn advance(&mut self, id: impl Into<String>) {
        if self.is_backward() {
            self.ending_before = Some(id.into());
        } else {
            self.starting_after = Some(id.into());
        }
    }
}

impl FormEncode for ListParams {
    fn encode_into(&self, body: &mut FormBody) {
        if let Some(before) = &self.ending_before {
            body.add("ending_before", before.clone());
        } else if let Some(after) = &self.starting_after {
            body.add("starting_after", after.clone());
        }
        body.add_opt("limit", self.limit.filter(|limit| *limit > 0));
        if self.include_total_count {
            body.add("include[]", "total_count");
        }
        self.filters.encode_into(body);
    }
}

/// A single list filter such as `created[gte]=1400000000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Field name.
    pub key: String,
    /// Operator (`gt`, `gte`, `lt`, `lte`), or empty for equality.
    pub op: String,
    /// Filter value.
    pub value: String,
}

/// An ordered set of list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    filters: Vec<Filter>,
}

impl Filters {
    /// Add a filter.
    pub fn add(&mut self, key: impl Into<String>, op: impl Into<String>, value: impl Into<String>) {
        self.filters.push(Filter {
            key: key.into(),
            op: op.into(),
            value: value.into(),
        });
    }

    /// Whether no filters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterate the filters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }
}

impl FormEncode for Filters {
    fn encode_into(&self, body: &mut FormBody) {
        for filter in &self.filters {
            if filter.op.is_empty() {
                body.add(filter.key.clone(), filter.value.clone());
            } else {
                body.add(format!("{}[{}]", filter.key, filter.op), filter.value.clone());
            }
        }
    }
}

/// Metadata describing one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListMeta {
    /// Total number of records, when requested with `include_total_count`.
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Whether more records exist past this page.
    #[serde(default)]
    pub has_more: bool,
    /// URL of the list endpoint.
    #[serde(default)]
    pub url: Option<String>,
}

/// A page of records as returned by a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct List<T> {
    /// Page metadata.
    #[serde(flatten)]
    pub meta: ListMeta,
    /// Records on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// A record that can appear in a list and serve as a pagination cursor.
pub trait ListItem {
    /// The record's ID.
    fn id(&self) -> &str;
}
