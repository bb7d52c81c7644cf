use super::gateway::TransactionResult;
use crate::domain::payment_method::PaymentMethod;
use crate::domain::transaction::{StatusEvent, Transaction, TransactionStatus, TransactionType};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// RFC 3339, UTC, microsecond precision.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusEventView {
    pub status: TransactionStatus,
    pub timestamp: String,
}

impl From<&StatusEvent> for StatusEventView {
    fn from(event: &StatusEvent) -> Self {
        Self {
            status: event.status,
            timestamp: format_timestamp(&event.timestamp),
        }
    }
}

/// The external shape of a transaction.
#[derive(Debug, Serialize, PartialEq)]
pub struct TransactionView {
    pub id: String,
    pub r#type: TransactionType,
    pub status: TransactionStatus,
    pub amount: String,
    pub payment_method_token: Option<String>,
    pub refunded_transaction_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub status_history: Vec<StatusEventView>,
}

impl From<&Transaction> for TransactionView {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            r#type: tx.r#type,
            status: tx.status,
            amount: tx.amount.to_string(),
            payment_method_token: tx.payment_method_token.clone(),
            refunded_transaction_id: tx.refunded_transaction_id.clone(),
            created_at: format_timestamp(&tx.created_at),
            updated_at: format_timestamp(&tx.updated_at),
            status_history: tx.status_history.iter().map(StatusEventView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TransactionResponse {
    pub success: bool,
    pub transaction: Option<TransactionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&TransactionResult> for TransactionResponse {
    fn from(result: &TransactionResult) -> Self {
        Self {
            success: result.success,
            transaction: result.transaction.as_ref().map(TransactionView::from),
            message: result.message.clone(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct FindResponse {
    pub transaction: TransactionView,
}

impl From<&Transaction> for FindResponse {
    fn from(tx: &Transaction) -> Self {
        Self {
            transaction: tx.into(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SearchResponse {
    pub transactions: Vec<TransactionView>,
}

impl From<&[Transaction]> for SearchResponse {
    fn from(found: &[Transaction]) -> Self {
        Self {
            transactions: found.iter().map(TransactionView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PaymentMethodView {
    pub token: String,
    pub always_decline: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PaymentMethodResponse {
    pub success: bool,
    pub payment_method: PaymentMethodView,
}

impl From<&PaymentMethod> for PaymentMethodResponse {
    fn from(card: &PaymentMethod) -> Self {
        Self {
            success: true,
            payment_method: PaymentMethodView {
                token: card.token.clone(),
                always_decline: card.always_decline,
                created_at: format_timestamp(&card.created_at),
            },
        }
    }
}
