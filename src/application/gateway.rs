use crate::domain::amount::Amount;
use crate::domain::decline::DeclinePolicy;
use crate::domain::ids::IdGenerator;
use crate::domain::payment_method::{PaymentMethod, PaymentMethodRequest};
use crate::domain::ports::{PaymentMethodStoreBox, TransactionStoreBox};
use crate::domain::search::TransactionSearch;
use crate::domain::transaction::{
    SaleOptions, Transaction, TransactionAction, TransactionStatus, TransactionType,
};
use crate::error::{GatewayError, Result};
use crate::infrastructure::in_memory::{InMemoryPaymentMethodStore, InMemoryTransactionStore};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SaleRequest {
    pub payment_method_token: Option<String>,
    pub amount: Option<Decimal>,
    pub options: SaleOptions,
}

impl SaleRequest {
    pub fn new(payment_method_token: impl Into<String>, amount: Decimal) -> Self {
        Self {
            payment_method_token: Some(payment_method_token.into()),
            amount: Some(amount),
            options: SaleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SaleOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of an operation that can fail as ordinary business.
///
/// A declined card or a missing amount is an unsuccessful result rather than an
/// error, so callers branch on `success` instead of matching errors.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    pub success: bool,
    pub transaction: Option<Transaction>,
    pub message: Option<String>,
}

impl TransactionResult {
    fn recorded(tx: Transaction) -> Self {
        let success = tx.status.is_success();
        Self {
            success,
            message: (!success).then(|| "Do Not Honor".to_string()),
            transaction: Some(tx),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction: None,
            message: Some(message.into()),
        }
    }
}

fn validate_amount(amount: Option<Decimal>) -> std::result::Result<Amount, String> {
    let amount = amount.ok_or_else(|| "Amount is required.".to_string())?;
    Amount::new(amount).map_err(|_| "Amount cannot be negative.".to_string())
}

/// The stand-in gateway: the transaction registry plus the card vault and the
/// decline switch.
///
/// Every mutation runs under one exclusive lock, so concurrent callers observe
/// each operation as atomic. All state is in memory and is dropped by
/// [`Gateway::reset`].
pub struct Gateway {
    transactions: TransactionStoreBox,
    payment_methods: PaymentMethodStoreBox,
    ids: IdGenerator,
    decline: DeclinePolicy,
    lock: Mutex<()>,
}

impl Default for Gateway {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Gateway {
    /// Creates a new `Gateway` over the given stores.
    ///
    /// # Arguments
    ///
    /// * `transactions` - The store for transaction records.
    /// * `payment_methods` - The vault for cards.
    pub fn new(transactions: TransactionStoreBox, payment_methods: PaymentMethodStoreBox) -> Self {
        Self {
            transactions,
            payment_methods,
            ids: IdGenerator::new(),
            decline: DeclinePolicy::new(),
            lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Box::new(InMemoryTransactionStore::new()),
            Box::new(InMemoryPaymentMethodStore::new()),
        )
    }

    /// Authorizes a sale against a payment method.
    ///
    /// The decline policy is checked before any option: a declined sale is
    /// recorded as `processor_declined` even when immediate settlement was asked for.
    pub async fn sale(&self, request: SaleRequest) -> Result<TransactionResult> {
        let _guard = self.lock.lock().await;

        let amount = match validate_amount(request.amount) {
            Ok(amount) => amount,
            Err(message) => return Ok(TransactionResult::invalid(message)),
        };

        let card = match &request.payment_method_token {
            Some(token) => self.payment_methods.get(token).await?,
            None => None,
        };

        let status = if self.decline.declines(card.as_ref()) {
            TransactionStatus::ProcessorDeclined
        } else {
            request.options.initial_status()
        };

        let tx = Transaction::new(
            self.ids.next_id(),
            TransactionType::Sale,
            amount,
            status,
            request.payment_method_token,
        );
        self.transactions.insert(tx.clone()).await?;

        if status.is_success() {
            info!(id = %tx.id, amount = %tx.amount, %status, "sale created");
        } else {
            warn!(id = %tx.id, amount = %tx.amount, "sale declined");
        }
        Ok(TransactionResult::recorded(tx))
    }

    /// Creates a standalone credit, not tied to an earlier sale.
    pub async fn credit(
        &self,
        payment_method_token: Option<String>,
        amount: Option<Decimal>,
    ) -> Result<TransactionResult> {
        let _guard = self.lock.lock().await;

        let amount = match validate_amount(amount) {
            Ok(amount) => amount,
            Err(message) => return Ok(TransactionResult::invalid(message)),
        };

        let tx = Transaction::new(
            self.ids.next_id(),
            TransactionType::Credit,
            amount,
            TransactionStatus::SubmittedForSettlement,
            payment_method_token,
        );
        self.transactions.insert(tx.clone()).await?;

        info!(id = %tx.id, amount = %tx.amount, "credit created");
        Ok(TransactionResult::recorded(tx))
    }

    /// Refunds `original_id` by creating a new credit.
    ///
    /// The original does not have to exist. When it does, its token is carried
    /// over and its amount is used if `amount` is omitted.
    pub async fn refund(
        &self,
        original_id: &str,
        amount: Option<Decimal>,
    ) -> Result<TransactionResult> {
        let _guard = self.lock.lock().await;

        let original = self.transactions.get(original_id).await?;
        let amount = amount.or_else(|| original.as_ref().map(|tx| tx.amount.value()));
        let amount = match validate_amount(amount) {
            Ok(amount) => amount,
            Err(message) => return Ok(TransactionResult::invalid(message)),
        };

        let mut tx = Transaction::new(
            self.ids.next_id(),
            TransactionType::Credit,
            amount,
            TransactionStatus::SubmittedForSettlement,
            original.and_then(|tx| tx.payment_method_token),
        );
        tx.refunded_transaction_id = Some(original_id.to_string());
        self.transactions.insert(tx.clone()).await?;

        info!(id = %tx.id, refunded = original_id, amount = %tx.amount, "refund created");
        Ok(TransactionResult::recorded(tx))
    }

    pub async fn void(&self, tx_id: &str) -> Result<TransactionResult> {
        self.transition(tx_id, TransactionAction::Void).await
    }

    pub async fn submit_for_settlement(&self, tx_id: &str) -> Result<TransactionResult> {
        self.transition(tx_id, TransactionAction::SubmitForSettlement).await
    }

    /// Advances a submitted transaction to `settled`, as a settlement batch would.
    pub async fn settle(&self, tx_id: &str) -> Result<TransactionResult> {
        self.transition(tx_id, TransactionAction::Settle).await
    }

    async fn transition(
        &self,
        tx_id: &str,
        action: TransactionAction,
    ) -> Result<TransactionResult> {
        let _guard = self.lock.lock().await;

        let mut tx = self.lookup(tx_id).await?;
        if let Err(e) = tx.apply(action) {
            warn!(id = tx_id, status = %tx.status, %action, "rejected status change");
            return Err(e);
        }
        self.transactions.update(tx.clone()).await?;

        info!(id = tx_id, status = %tx.status, "transaction updated");
        Ok(TransactionResult::recorded(tx))
    }

    pub async fn find(&self, tx_id: &str) -> Result<Transaction> {
        debug!(id = tx_id, "find transaction");
        self.lookup(tx_id).await
    }

    async fn lookup(&self, tx_id: &str) -> Result<Transaction> {
        self.transactions
            .get(tx_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("transaction {tx_id}")))
    }

    /// Evaluates `criteria` against a snapshot of the registry. Nothing is modified.
    pub async fn search(&self, criteria: &TransactionSearch) -> Result<Vec<Transaction>> {
        let snapshot = self.transactions.all().await?;
        let found = criteria.evaluate(&snapshot);
        debug!(matched = found.len(), "search transactions");
        Ok(found)
    }

    pub async fn create_payment_method(
        &self,
        request: PaymentMethodRequest,
    ) -> Result<PaymentMethod> {
        let _guard = self.lock.lock().await;

        let token = match request.token {
            Some(token) if token.trim().is_empty() => {
                return Err(GatewayError::ValidationError(
                    "Token cannot be blank.".to_string(),
                ));
            }
            Some(token) => token,
            None => self.ids.next_token(),
        };
        let card = PaymentMethod::new(token, request.always_decline);
        self.payment_methods.insert(card.clone()).await?;

        info!(token = %card.token, always_decline = card.always_decline, "payment method vaulted");
        Ok(card)
    }

    pub async fn find_payment_method(&self, token: &str) -> Result<PaymentMethod> {
        self.payment_methods
            .get(token)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("payment method {token}")))
    }

    pub fn decline_all_cards(&self) {
        self.decline.decline_all_cards();
        info!("declining all cards");
    }

    pub fn accept_all_cards(&self) {
        self.decline.accept_cards();
        info!("accepting cards");
    }

    pub fn is_declining_all_cards(&self) -> bool {
        self.decline.is_declining_all()
    }

    /// Drops every transaction and card and turns the decline switch off.
    pub async fn reset(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        self.transactions.clear().await?;
        self.payment_methods.clear().await?;
        self.decline.reset();

        info!("gateway reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn submit(flag: bool) -> SaleOptions {
        SaleOptions {
            submit_for_settlement: Some(flag),
        }
    }

    #[tokio::test]
    async fn test_sale_defaults_to_authorized() {
        let gateway = Gateway::in_memory();
        let result = gateway.sale(SaleRequest::new("tok", dec!(10.00))).await.unwrap();

        assert!(result.success);
        let tx = result.transaction.unwrap();
        assert_eq!(tx.r#type, TransactionType::Sale);
        assert_eq!(tx.status, TransactionStatus::Authorized);
        assert_eq!(tx.amount.value(), dec!(10.00));
    }

    #[tokio::test]
    async fn test_sale_submit_for_settlement_option() {
        let gateway = Gateway::in_memory();
        let submitted = gateway
            .sale(SaleRequest::new("tok", dec!(10)).with_options(submit(true)))
            .await
            .unwrap();
        let authorized = gateway
            .sale(SaleRequest::new("tok", dec!(10)).with_options(submit(false)))
            .await
            .unwrap();

        assert_eq!(
            submitted.transaction.unwrap().status,
            TransactionStatus::SubmittedForSettlement
        );
        assert_eq!(
            authorized.transaction.unwrap().status,
            TransactionStatus::Authorized
        );
    }

    #[tokio::test]
    async fn test_sale_without_amount_is_unsuccessful() {
        let gateway = Gateway::in_memory();
        let request = SaleRequest {
            payment_method_token: Some("tok".to_string()),
            amount: None,
            options: SaleOptions::default(),
        };

        let result = gateway.sale(request).await.unwrap();
        assert!(!result.success);
        assert!(result.transaction.is_none());
        assert_eq!(result.message.as_deref(), Some("Amount is required."));

        let negative = gateway.sale(SaleRequest::new("tok", dec!(-1))).await.unwrap();
        assert!(!negative.success);
        assert!(gateway.search(&TransactionSearch::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decline_takes_precedence_over_submit_for_settlement() {
        let gateway = Gateway::in_memory();
        gateway.decline_all_cards();

        let result = gateway
            .sale(SaleRequest::new("tok", dec!(10)).with_options(submit(true)))
            .await
            .unwrap();

        assert!(!result.success);
        let tx = result.transaction.unwrap();
        assert_eq!(tx.status, TransactionStatus::ProcessorDeclined);
        assert!(matches!(
            gateway.void(&tx.id).await,
            Err(GatewayError::InvalidStateTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_flagged_card_is_declined() {
        let gateway = Gateway::in_memory();
        let card = gateway
            .create_payment_method(PaymentMethodRequest {
                token: None,
                always_decline: true,
            })
            .await
            .unwrap();

        let result = gateway.sale(SaleRequest::new(card.token, dec!(5))).await.unwrap();
        assert!(!result.success);
        assert!(!gateway.is_declining_all_cards());
    }

    #[tokio::test]
    async fn test_refund_uses_original_amount_and_token() {
        let gateway = Gateway::in_memory();
        let sale = gateway
            .sale(SaleRequest::new("tok", dec!(25)))
            .await
            .unwrap()
            .transaction
            .unwrap();

        let refund = gateway.refund(&sale.id, None).await.unwrap();
        assert!(refund.success);
        let credit = refund.transaction.unwrap();
        assert_eq!(credit.r#type, TransactionType::Credit);
        assert_eq!(credit.amount.value(), dec!(25));
        assert_eq!(credit.payment_method_token.as_deref(), Some("tok"));
        assert_eq!(credit.refunded_transaction_id.as_deref(), Some(sale.id.as_str()));
    }

    #[tokio::test]
    async fn test_refund_of_unknown_transaction() {
        let gateway = Gateway::in_memory();

        let refund = gateway.refund("foobar", Some(dec!(1))).await.unwrap();
        assert!(refund.success);
        assert_eq!(refund.transaction.unwrap().payment_method_token, None);

        let no_amount = gateway.refund("foobar", None).await.unwrap();
        assert!(!no_amount.success);
    }

    #[tokio::test]
    async fn test_standalone_credit() {
        let gateway = Gateway::in_memory();
        let result = gateway.credit(None, Some(dec!(3.50))).await.unwrap();
        let tx = result.transaction.unwrap();
        assert_eq!(tx.r#type, TransactionType::Credit);
        assert_eq!(tx.refunded_transaction_id, None);
        gateway.settle(&tx.id).await.unwrap();
        assert_eq!(gateway.find(&tx.id).await.unwrap().status, TransactionStatus::Settled);
    }

    #[tokio::test]
    async fn test_transition_on_unknown_id_is_not_found() {
        let gateway = Gateway::in_memory();
        assert!(matches!(gateway.void("nope").await, Err(GatewayError::NotFound(_))));
        assert!(matches!(
            gateway.submit_for_settlement("nope").await,
            Err(GatewayError::NotFound(_))
        ));
        assert!(matches!(gateway.settle("nope").await, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_payment_method_token() {
        let gateway = Gateway::in_memory();
        let request = PaymentMethodRequest {
            token: Some("mine".to_string()),
            always_decline: false,
        };
        gateway.create_payment_method(request.clone()).await.unwrap();
        assert!(matches!(
            gateway.create_payment_method(request).await,
            Err(GatewayError::DuplicateId(_))
        ));
        assert!(matches!(
            gateway
                .create_payment_method(PaymentMethodRequest {
                    token: Some("  ".to_string()),
                    always_decline: false,
                })
                .await,
            Err(GatewayError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let gateway = Gateway::in_memory();
        let card = gateway
            .create_payment_method(PaymentMethodRequest::default())
            .await
            .unwrap();
        let id = gateway
            .sale(SaleRequest::new(card.token.clone(), dec!(1)))
            .await
            .unwrap()
            .transaction
            .unwrap()
            .id;
        gateway.decline_all_cards();

        gateway.reset().await.unwrap();

        assert!(matches!(gateway.find(&id).await, Err(GatewayError::NotFound(_))));
        assert!(gateway.find_payment_method(&card.token).await.is_err());
        assert!(!gateway.is_declining_all_cards());
    }
}
