//! Plans: recurring price definitions that subscriptions attach to.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::form::{FormBody, FormEncode};
use crate::list::{ListItem, ListParams};
use crate::params::Params;
use crate::timestamp::to_datetime;

/// Billing frequency of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    /// Daily.
    Day,
    /// Weekly.
    Week,
    /// Monthly.
    Month,
    /// Yearly.
    Year,
}

impl PlanInterval {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for PlanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown plan interval: {other}")),
        }
    }
}

/// Missing, null and unrecognized intervals all decode as `None`.
fn lenient_interval<'de, D>(deserializer: D) -> Result<Option<PlanInterval>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Parameters for creating a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanParams {
    /// Plan ID, chosen by the caller.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Amount in the currency's smallest unit.
    pub amount: u64,
    /// Three-letter currency code.
    pub currency: String,
    /// Billing frequency.
    pub interval: PlanInterval,
    /// Number of intervals between billings.
    pub interval_count: Option<u64>,
    /// Trial length in days.
    pub trial_period_days: Option<u64>,
    /// Text shown on the customer's statement.
    pub statement_description: Option<String>,
    /// Metadata and expansion.
    pub params: Params,
}

impl PlanParams {
    /// Create parameters with the required fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: u64,
        currency: impl Into<String>,
        interval: PlanInterval,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            currency: currency.into(),
            interval,
            interval_count: None,
            trial_period_days: None,
            statement_description: None,
            params: Params::default(),
        }
    }
}

impl FormEncode for PlanParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add("id", self.id.clone());
        body.add("name", self.name.clone());
        body.add("amount", self.amount.to_string());
        body.add("currency", self.currency.clone());
        body.add("interval", self.interval.as_str());
        body.add_opt("interval_count", self.interval_count);
        body.add_opt("trial_period_days", self.trial_period_days);
        body.add_opt("statement_description", self.statement_description.as_ref());
        self.params.encode_into(body);
    }
}

/// Parameters for updating a plan. Only name and statement text are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanUpdateParams {
    /// New display name.
    pub name: Option<String>,
    /// New statement text.
    pub statement_description: Option<String>,
    /// Metadata and expansion.
    pub params: Params,
}

impl FormEncode for PlanUpdateParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add_opt("name", self.name.as_ref());
        body.add_opt("statement_description", self.statement_description.as_ref());
        self.params.encode_into(body);
    }
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanListParams {
    /// Paging controls.
    pub list: ListParams,
    /// Metadata and expansion.
    pub params: Params,
}

impl FormEncode for PlanListParams {
    fn encode_into(&self, body: &mut FormBody) {
        self.params.encode_into(body);
    }
}

/// A plan record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Plan {
    /// Plan ID.
    pub id: String,
    /// Whether the plan lives in live mode.
    #[serde(default, rename = "livemode")]
    pub live: bool,
    /// Amount in the currency's smallest unit.
    #[serde(default)]
    pub amount: u64,
    /// Three-letter currency code.
    #[serde(default)]
    pub currency: String,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
    /// Billing frequency, `None` when absent or not recognized.
    #[serde(default, deserialize_with = "lenient_interval")]
    pub interval: Option<PlanInterval>,
    /// Number of intervals between billings.
    #[serde(default)]
    pub interval_count: u64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Trial length in days.
    #[serde(default)]
    pub trial_period_days: Option<u64>,
    /// Statement text.
    #[serde(default)]
    pub statement_description: Option<String>,
}

impl Plan {
    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.created)
    }
}

impl ListItem for Plan {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sends_required_fields_only_by_default() {
        let body = PlanParams::new("gold", "Gold", 2000, "usd", PlanInterval::Month).to_form();

        assert_eq!(
            body.keys().collect::<Vec<_>>(),
            ["id", "name", "amount", "currency", "interval"]
        );
        assert_eq!(body.get("amount"), Some("2000"));
        assert_eq!(body.get("interval"), Some("month"));
    }

    #[test]
    fn create_sends_set_optionals() {
        let mut params = PlanParams::new("gold", "Gold", 2000, "usd", PlanInterval::Week);
        params.interval_count = Some(2);
        params.trial_period_days = Some(14);
        params.statement_description = Some("GOLD".into());

        let body = params.to_form();
        assert_eq!(body.get("interval_count"), Some("2"));
        assert_eq!(body.get("trial_period_days"), Some("14"));
        assert_eq!(body.get("statement_description"), Some("GOLD"));
    }

    #[test]
    fn update_sends_only_mutable_fields() {
        let params = PlanUpdateParams {
            name: Some("Platinum".into()),
            ..PlanUpdateParams::default()
        };

        assert_eq!(params.to_form().pairs(), [("name".to_string(), "Platinum".to_string())]);
        assert!(PlanUpdateParams::default().to_form().is_empty());
    }

    #[test]
    fn decodes_plan_record() {
        let plan: Plan = serde_json::from_str(
            r#"{"id":"gold","object":"plan","livemode":false,"amount":2000,"currency":"usd",
                "created":1400000000,"interval":"year","interval_count":1,"name":"Gold",
                "metadata":{"tier":"3"},"trial_period_days":null}"#,
        )
        .unwrap();

        assert_eq!(plan.id(), "gold");
        assert_eq!(plan.interval, Some(PlanInterval::Year));
        assert_eq!(plan.metadata.get("tier").map(String::as_str), Some("3"));
        assert!(plan.created_at().is_some());
    }

    #[test]
    fn missing_or_unknown_interval_is_none() {
        let plan: Plan = serde_json::from_str(r#"{"id":"gold","amount":2000}"#).unwrap();
        assert_eq!(plan.interval, None);

        let plan: Plan =
            serde_json::from_str(r#"{"id":"gold","interval":"fortnight"}"#).unwrap();
        assert_eq!(plan.id, "gold");
        assert_eq!(plan.interval, None);

        let plan: Plan = serde_json::from_str(r#"{"id":"gold","interval":null}"#).unwrap();
        assert_eq!(plan.interval, None);
    }

    #[test]
    fn interval_round_trips_through_wire_names() {
        for interval in [
            PlanInterval::Day,
            PlanInterval::Week,
            PlanInterval::Month,
            PlanInterval::Year,
        ] {
            assert_eq!(interval.as_str().parse::<PlanInterval>(), Ok(interval));
        }
        assert!("fortnight".parse::<PlanInterval>().is_err());
    }
}
