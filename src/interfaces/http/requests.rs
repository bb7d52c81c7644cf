use crate::application::gateway::SaleRequest;
use crate::domain::payment_method::PaymentMethodRequest;
use crate::domain::search::TransactionSearch;
use crate::domain::transaction::{SaleOptions, TransactionStatus, TransactionType};
use rust_decimal::Decimal;
use serde::Deserialize;

fn default_type() -> TransactionType {
    TransactionType::Sale
}

/// Body of `POST /merchants/{m}/transactions`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionBody {
    pub transaction: CreateTransactionParams,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionParams {
    #[serde(default = "default_type")]
    pub r#type: TransactionType,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub payment_method_token: Option<String>,
    // `null` and absent both mean "no options".
    #[serde(default)]
    pub options: Option<SaleOptions>,
}

impl From<CreateTransactionParams> for SaleRequest {
    fn from(params: CreateTransactionParams) -> Self {
        Self {
            payment_method_token: params.payment_method_token,
            amount: params.amount,
            options: params.options.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RefundBody {
    pub transaction: RefundParams,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefundParams {
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentMethodBody {
    #[serde(default)]
    pub payment_method: PaymentMethodRequest,
}

#[derive(Debug, Deserialize)]
pub struct InField<T> {
    pub r#in: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct IsField<T> {
    pub is: T,
}

/// Body of `POST /merchants/{m}/transactions/advanced_search`.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub search: SearchParams,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub ids: Option<InField<String>>,
    #[serde(default)]
    pub status: Option<InField<TransactionStatus>>,
    #[serde(default)]
    pub r#type: Option<IsField<TransactionType>>,
}

impl From<SearchParams> for TransactionSearch {
    fn from(params: SearchParams) -> Self {
        let mut search = TransactionSearch::new();
        if let Some(ids) = params.ids {
            search = search.ids_in(ids.r#in);
        }
        if let Some(status) = params.status {
            search = search.status_in(status.r#in);
        }
        if let Some(r#type) = params.r#type {
            search = search.type_is(r#type.is);
        }
        search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sale_body_with_null_options() {
        let body: CreateTransactionBody = serde_json::from_str(
            r#"{"transaction": {"amount": 10.0, "payment_method_token": "tok", "options": null}}"#,
        )
        .unwrap();
        assert_eq!(body.transaction.r#type, TransactionType::Sale);

        let request = SaleRequest::from(body.transaction);
        assert_eq!(request.amount, Some(dec!(10.0)));
        assert_eq!(request.options, SaleOptions::default());
    }

    #[test]
    fn test_search_body_to_criteria() {
        let body: SearchBody = serde_json::from_str(
            r#"{"search": {"ids": {"in": ["a", "b"]}, "status": {"in": ["voided"]}, "type": {"is": "credit"}}}"#,
        )
        .unwrap();
        let search = TransactionSearch::from(body.search);
        assert_eq!(search.ids, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(search.statuses, Some(vec![TransactionStatus::Voided]));
        assert_eq!(search.r#type, Some(TransactionType::Credit));
    }
}
