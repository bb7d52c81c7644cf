use super::amount::Amount;
use crate::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Credit,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sale => "sale",
            Self::Credit => "credit",
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Authorized,
    SubmittedForSettlement,
    Settled,
    Voided,
    ProcessorDeclined,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authorized => "authorized",
            Self::SubmittedForSettlement => "submitted_for_settlement",
            Self::Settled => "settled",
            Self::Voided => "voided",
            Self::ProcessorDeclined => "processor_declined",
        })
    }
}

/// A request to move a transaction along the settlement pipeline.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransactionAction {
    SubmitForSettlement,
    Void,
    Settle,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SubmitForSettlement => "submit for settlement",
            Self::Void => "void",
            Self::Settle => "settle",
        })
    }
}

impl TransactionStatus {
    /// Returns the status reached by applying `action`, or `None` when the
    /// pipeline has no such edge.
    pub fn next(self, action: TransactionAction) -> Option<Self> {
        use TransactionAction as A;
        use TransactionStatus as S;

        match (self, action) {
            (S::Authorized, A::SubmitForSettlement) => Some(S::SubmittedForSettlement),
            (S::Authorized | S::SubmittedForSettlement, A::Void) => Some(S::Voided),
            (S::SubmittedForSettlement, A::Settle) => Some(S::Settled),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        self != Self::ProcessorDeclined
    }
}

/// Options recognized on a sale. Anything else a client sends is ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Clone, Copy)]
pub struct SaleOptions {
    #[serde(default)]
    pub submit_for_settlement: Option<bool>,
}

impl SaleOptions {
    pub fn initial_status(&self) -> TransactionStatus {
        if self.submit_for_settlement == Some(true) {
            TransactionStatus::SubmittedForSettlement
        } else {
            TransactionStatus::Authorized
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct StatusEvent {
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
}

/// A transaction recorded by the gateway.
///
/// `id`, `amount`, `type` and `created_at` are fixed at creation. Only the
/// status (and the settlement metadata that follows it) changes afterwards,
/// and only through [`Transaction::apply`].
#[derive(Debug, PartialEq, Clone)]
pub struct Transaction {
    pub id: String,
    pub r#type: TransactionType,
    pub amount: Amount,
    pub status: TransactionStatus,
    pub payment_method_token: Option<String>,
    pub refunded_transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status_history: Vec<StatusEvent>,
}

impl Transaction {
    pub fn new(
        id: String,
        r#type: TransactionType,
        amount: Amount,
        status: TransactionStatus,
        payment_method_token: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            r#type,
            amount,
            status,
            payment_method_token,
            refunded_transaction_id: None,
            created_at: now,
            updated_at: now,
            status_history: vec![StatusEvent {
                status,
                timestamp: now,
            }],
        }
    }

    /// Moves the transaction to the status `action` leads to.
    ///
    /// Leaves the record untouched and returns `InvalidStateTransition` when the
    /// current status has no outgoing edge for `action`.
    pub fn apply(&mut self, action: TransactionAction) -> Result<()> {
        let next = self
            .status
            .next(action)
            .ok_or_else(|| GatewayError::InvalidStateTransition {
                id: self.id.clone(),
                status: self.status,
                action,
            })?;

        let now = Utc::now();
        self.status = next;
        self.updated_at = now;
        self.status_history.push(StatusEvent {
            status: next,
            timestamp: now,
        });
        Ok(())
    }
}
