use miette::Diagnostic;
use thiserror::Error;

use crate::domain::transaction::{TransactionAction, TransactionStatus};

#[derive(Error, Debug, Diagnostic)]
pub enum GatewayError {
    #[error("Not found: {0}")]
    #[diagnostic(code(gateway::not_found))]
    NotFound(String),

    #[error("Cannot {action} transaction {id} with status {status}")]
    #[diagnostic(
        code(gateway::invalid_state_transition),
        help("only authorized or submitted_for_settlement transactions can change status")
    )]
    InvalidStateTransition {
        id: String,
        status: TransactionStatus,
        action: TransactionAction,
    },

    #[error("Validation error: {0}")]
    #[diagnostic(code(gateway::validation))]
    ValidationError(String),

    #[error("Duplicate id: {0}")]
    #[diagnostic(code(gateway::duplicate_id))]
    DuplicateId(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(gateway::internal))]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
