use super::AppState;
use super::requests::{CreateTransactionBody, PaymentMethodBody, RefundBody, SearchBody};
use crate::application::gateway::{SaleRequest, TransactionResult};
use crate::application::projector::{
    FindResponse, PaymentMethodResponse, SearchResponse, TransactionResponse,
};
use crate::domain::search::TransactionSearch;
use crate::domain::transaction::TransactionType;
use crate::error::GatewayError;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

type ApiResult = Result<Response, GatewayError>;

/// Request bodies that fail to parse become validation errors, so they get the
/// same JSON error body as every other failure.
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Unsuccessful results are still well-formed bodies, only the status differs.
fn transaction_response(ok: StatusCode, result: &TransactionResult) -> Response {
    let status = if result.success {
        ok
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(TransactionResponse::from(result))).into_response()
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    body: JsonBody<CreateTransactionBody>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let Json(body) = body?;
    let params = body.transaction;
    let result = match params.r#type {
        TransactionType::Sale => state.gateway.sale(SaleRequest::from(params)).await?,
        TransactionType::Credit => {
            state
                .gateway
                .credit(params.payment_method_token, params.amount)
                .await?
        }
    };
    Ok(transaction_response(StatusCode::CREATED, &result))
}

pub async fn refund_transaction(
    State(state): State<AppState>,
    Path((merchant_id, tx_id)): Path<(String, String)>,
    body: JsonBody<RefundBody>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    // The body is optional: without one the original amount is refunded.
    let amount = match body {
        Ok(Json(body)) => body.transaction.amount,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };
    let result = state.gateway.refund(&tx_id, amount).await?;
    Ok(transaction_response(StatusCode::CREATED, &result))
}

pub async fn void_transaction(
    State(state): State<AppState>,
    Path((merchant_id, tx_id)): Path<(String, String)>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let result = state.gateway.void(&tx_id).await?;
    Ok(transaction_response(StatusCode::OK, &result))
}

pub async fn submit_for_settlement(
    State(state): State<AppState>,
    Path((merchant_id, tx_id)): Path<(String, String)>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let result = state.gateway.submit_for_settlement(&tx_id).await?;
    Ok(transaction_response(StatusCode::OK, &result))
}

pub async fn settle_transaction(
    State(state): State<AppState>,
    Path((merchant_id, tx_id)): Path<(String, String)>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let result = state.gateway.settle(&tx_id).await?;
    Ok(transaction_response(StatusCode::OK, &result))
}

pub async fn find_transaction(
    State(state): State<AppState>,
    Path((merchant_id, tx_id)): Path<(String, String)>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let tx = state.gateway.find(&tx_id).await?;
    Ok(Json(FindResponse::from(&tx)).into_response())
}

pub async fn search_transactions(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    body: JsonBody<SearchBody>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let Json(body) = body?;
    let criteria = TransactionSearch::from(body.search);
    let found = state.gateway.search(&criteria).await?;
    Ok(Json(SearchResponse::from(found.as_slice())).into_response())
}

pub async fn create_payment_method(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    body: JsonBody<PaymentMethodBody>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let Json(body) = body?;
    let card = state.gateway.create_payment_method(body.payment_method).await?;
    Ok((StatusCode::CREATED, Json(PaymentMethodResponse::from(&card))).into_response())
}

pub async fn find_payment_method(
    State(state): State<AppState>,
    Path((merchant_id, token)): Path<(String, String)>,
) -> ApiResult {
    state.check_merchant(&merchant_id)?;
    let card = state.gateway.find_payment_method(&token).await?;
    Ok(Json(PaymentMethodResponse::from(&card)).into_response())
}

pub async fn decline_all_cards(State(state): State<AppState>) -> impl IntoResponse {
    state.gateway.decline_all_cards();
    Json(json!({ "decline_all_cards": true }))
}

pub async fn accept_all_cards(State(state): State<AppState>) -> impl IntoResponse {
    state.gateway.accept_all_cards();
    Json(json!({ "decline_all_cards": false }))
}

pub async fn reset(State(state): State<AppState>) -> ApiResult {
    state.gateway.reset().await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
