//! HTTP boundary.
//!
//! Translates JSON requests on gateway-style paths into [`Gateway`] calls and
//! projects the results back out. Lookup and state errors become 404/422
//! responses through `IntoResponse for GatewayError`.

pub mod error;
pub mod handlers;
pub mod requests;

use crate::application::gateway::Gateway;
use crate::config::ServerConfig;
use crate::error::{GatewayError, Result};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub merchant_id: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>, merchant_id: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            merchant_id: merchant_id.into(),
        }
    }

    fn check_merchant(&self, merchant_id: &str) -> Result<()> {
        if merchant_id == &*self.merchant_id {
            Ok(())
        } else {
            Err(GatewayError::NotFound(format!("merchant {merchant_id}")))
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/merchants/:merchant_id/transactions",
            post(handlers::create_transaction),
        )
        .route(
            "/merchants/:merchant_id/transactions/advanced_search",
            post(handlers::search_transactions),
        )
        .route(
            "/merchants/:merchant_id/transactions/:id",
            get(handlers::find_transaction),
        )
        .route(
            "/merchants/:merchant_id/transactions/:id/refund",
            post(handlers::refund_transaction),
        )
        .route(
            "/merchants/:merchant_id/transactions/:id/void",
            put(handlers::void_transaction),
        )
        .route(
            "/merchants/:merchant_id/transactions/:id/submit_for_settlement",
            put(handlers::submit_for_settlement),
        )
        .route(
            "/merchants/:merchant_id/transactions/:id/settle",
            put(handlers::settle_transaction),
        )
        .route(
            "/merchants/:merchant_id/payment_methods",
            post(handlers::create_payment_method),
        )
        .route(
            "/merchants/:merchant_id/payment_methods/:token",
            get(handlers::find_payment_method),
        )
        .route(
            "/admin/decline_all_cards",
            post(handlers::decline_all_cards).delete(handlers::accept_all_cards),
        )
        .route("/admin/reset", post(handlers::reset))
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn serve(config: &ServerConfig, gateway: Arc<Gateway>) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| GatewayError::InternalError(Box::new(e)))?;
    tracing::info!(%addr, merchant_id = %config.merchant_id, "fake gateway listening");

    let state = AppState::new(gateway, config.merchant_id.as_str());
    axum::serve(listener, router(state))
        .await
        .map_err(|e| GatewayError::InternalError(Box::new(e)))
}
