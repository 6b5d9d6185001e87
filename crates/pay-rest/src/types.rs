//! Wire types for transactions and refunds.
//!
//! Plain serde containers; field names follow the API's camelCase.

use serde::{Deserialize, Serialize};

/// State of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    Create,
    Pending,
    Confirmed,
    Processing,
    Failed,
    Authorized,
    Voided,
    Completed,
    Fulfill,
    Decline,
}

/// A transaction as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    /// Optimistic-concurrency version; bumped on every server-side change.
    pub version: i32,
    pub state: TransactionState,
    pub currency: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub merchant_reference: Option<String>,
    #[serde(default)]
    pub authorization_amount: Option<f64>,
    #[serde(default)]
    pub created_on: Option<chrono::DateTime<chrono::Utc>>,
}

/// Payload for creating a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreate {
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub line_items: Vec<LineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_confirmation_enabled: Option<bool>,
}

/// Type of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemType {
    Product,
    Discount,
    Shipping,
    Fee,
    Tip,
}

/// A line item on a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub amount_including_tax: f64,
    pub name: String,
    pub quantity: u32,
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    #[serde(rename = "type")]
    pub item_type: LineItemType,
}

/// State of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundState {
    Create,
    Pending,
    ManualCheck,
    Failed,
    Successful,
}

/// Type of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundType {
    CustomerInitiatedAutomatic,
    CustomerInitiatedManual,
    MerchantInitiatedOnline,
    MerchantInitiatedOffline,
}

/// A refund as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: u64,
    pub version: i32,
    pub state: RefundState,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub transaction: Option<u64>,
}

/// Payload for creating a refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundCreate {
    pub transaction: u64,
    /// Caller-chosen id letting the server deduplicate refund submissions.
    pub external_id: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub refund_type: RefundType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_deserializes_from_wire_format() {
        let json = r#"{
            "id": 7355,
            "version": 3,
            "state": "AUTHORIZED",
            "currency": "EUR",
            "language": "en-US",
            "merchantReference": "order-42",
            "authorizationAmount": 29.95
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, 7355);
        assert_eq!(tx.state, TransactionState::Authorized);
        assert_eq!(tx.merchant_reference.as_deref(), Some("order-42"));
        assert_eq!(tx.authorization_amount, Some(29.95));
        assert!(tx.created_on.is_none());
    }

    #[test]
    fn test_transaction_create_serializes_camel_case() {
        let create = TransactionCreate {
            currency: "EUR".into(),
            language: None,
            line_items: vec![LineItem {
                amount_including_tax: 29.95,
                name: "Widget".into(),
                quantity: 1,
                unique_id: "sku-1".into(),
                item_type: LineItemType::Product,
            }],
            merchant_reference: Some("order-42".into()),
            auto_confirmation_enabled: None,
        };

        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(value["merchantReference"], "order-42");
        assert_eq!(value["lineItems"][0]["amountIncludingTax"], 29.95);
        assert_eq!(value["lineItems"][0]["type"], "PRODUCT");
        assert!(value.get("language").is_none());
    }

    #[test]
    fn test_refund_create_serializes_type_field() {
        let create = RefundCreate {
            transaction: 7355,
            external_id: "refund-1".into(),
            amount: 10.0,
            refund_type: RefundType::MerchantInitiatedOnline,
        };

        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(value["type"], "MERCHANT_INITIATED_ONLINE");
        assert_eq!(value["externalId"], "refund-1");
    }
}
