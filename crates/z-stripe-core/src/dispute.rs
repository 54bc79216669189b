//! Disputes: chargebacks raised against a charge.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{FormBody, FormEncode};
use crate::list::{ListItem, ListParams};
use crate::params::Params;
use crate::timestamp::to_datetime;

/// Reason given by the cardholder for a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeReason {
    /// Charged more than once.
    Duplicate,
    /// Charge not authorized by the cardholder.
    Fraudulent,
    /// Charged after canceling a subscription.
    SubscriptionCanceled,
    /// Product defective or not as described.
    ProductUnacceptable,
    /// Product never received.
    ProductNotReceived,
    /// Cardholder does not recognize the charge.
    Unrecognized,
    /// Promised refund never processed.
    CreditNotProcessed,
    /// Uncategorized.
    General,
    /// A reason this client does not know about.
    #[serde(other)]
    Other,
}

/// Progress of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    /// Decided in the merchant's favor.
    Won,
    /// Decided in the cardholder's favor.
    Lost,
    /// Evidence required.
    NeedsResponse,
    /// Evidence submitted, awaiting decision.
    UnderReview,
    /// Inquiry; evidence required.
    WarningNeedsResponse,
    /// Inquiry under review.
    WarningUnderReview,
    /// Inquiry closed.
    WarningClosed,
    /// Charge refunded before a decision.
    ChargeRefunded,
    /// A status this client does not know about.
    #[serde(other)]
    Other,
}

/// Parameters for updating a dispute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeParams {
    /// Free-form evidence text.
    pub evidence: Option<String>,
    /// Metadata and expansion.
    pub params: Params,
}

impl FormEncode for DisputeParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add_opt("evidence", self.evidence.as_ref());
        self.params.encode_into(body);
    }
}

/// Parameters for listing disputes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisputeListParams {
    /// Only disputes on this charge.
    pub charge: Option<String>,
    /// Paging controls.
    pub list: ListParams,
    /// Metadata and expansion.
    pub params: Params,
}

impl FormEncode for DisputeListParams {
    fn encode_into(&self, body: &mut FormBody) {
        body.add_opt("charge", self.charge.as_ref());
        self.params.encode_into(body);
    }
}

/// A balance movement caused by a dispute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceTransaction {
    /// Transaction ID.
    pub id: String,
    /// Gross amount.
    #[serde(default)]
    pub amount: i64,
    /// Three-letter currency code.
    #[serde(default)]
    pub currency: String,
    /// Fees charged.
    #[serde(default)]
    pub fee: i64,
    /// Net amount.
    #[serde(default)]
    pub net: i64,
    /// Availability status.
    #[serde(default)]
    pub status: String,
    /// Transaction type.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// A dispute record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dispute {
    /// Dispute ID.
    pub id: String,
    /// Whether the dispute lives in live mode.
    #[serde(default, rename = "livemode")]
    pub live: bool,
    /// Disputed amount.
    #[serde(default)]
    pub amount: u64,
    /// Three-letter currency code.
    #[serde(default)]
    pub currency: String,
    /// Disputed charge ID.
    #[serde(default)]
    pub charge: String,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
    /// Cardholder's reason.
    pub reason: DisputeReason,
    /// Current status.
    pub status: DisputeStatus,
    /// Balance movements.
    #[serde(default)]
    pub balance_transactions: Vec<BalanceTransaction>,
    /// Evidence: text in older API versions, an object in newer ones.
    #[serde(default)]
    pub evidence: serde_json::Value,
    /// Evidence deadline (Unix).
    #[serde(default)]
    pub evidence_due_by: Option<i64>,
    /// Metadata.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Dispute {
    /// Creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.created)
    }

    /// Evidence deadline.
    #[must_use]
    pub fn evidence_due_at(&self) -> Option<DateTime<Utc>> {
        self.evidence_due_by.and_then(to_datetime)
    }

    /// Whether the dispute still awaits a decision.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            DisputeStatus::NeedsResponse
                | DisputeStatus::UnderReview
                | DisputeStatus::WarningNeedsResponse
                | DisputeStatus::WarningUnderReview
        )
    }
}

impl ListItem for Dispute {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_body() {
        assert!(DisputeParams::default().to_form().is_empty());

        let params = DisputeParams {
            evidence: Some("shipped 2014-05-01".into()),
            params: Params::new().with_metadata("case", "42"),
        };
        let body = params.to_form();
        assert_eq!(body.get("evidence"), Some("shipped 2014-05-01"));
        assert_eq!(body.get("metadata[case]"), Some("42"));
    }

    #[test]
    fn decodes_dispute_record() {
        let dispute: Dispute = serde_json::from_str(
            r#"{"id":"dp_1","livemode":false,"amount":1000,"currency":"usd","charge":"ch_1",
                "created":1400000000,"reason":"fraudulent","status":"needs_response",
                "balance_transactions":[{"id":"txn_1","amount":-1000,"fee":1500,"net":-2500,"type":"adjustment"}],
                "evidence":null,"evidence_due_by":1401000000}"#,
        )
        .unwrap();

        assert_eq!(dispute.reason, DisputeReason::Fraudulent);
        assert!(dispute.is_open());
        assert_eq!(dispute.balance_transactions[0].kind, "adjustment");
        assert!(dispute.evidence_due_at().is_some());
    }

    #[test]
    fn unknown_reason_and_status_are_tolerated() {
        let dispute: Dispute = serde_json::from_str(
            r#"{"id":"dp_2","reason":"bank_cannot_process","status":"prevented"}"#,
        )
        .unwrap();

        assert_eq!(dispute.reason, DisputeReason::Other);
        assert_eq!(dispute.status, DisputeStatus::Other);
        assert!(!dispute.is_open());
    }
}
