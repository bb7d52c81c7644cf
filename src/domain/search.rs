use super::transaction::{Transaction, TransactionStatus, TransactionType};
use std::collections::{HashMap, HashSet};

/// Declarative search criteria.
///
/// With `ids` set, results come back in the order the ids were given and ids
/// that match nothing are skipped. Without `ids`, results follow creation order.
/// `statuses` and `type` only narrow the result. Declined transactions are
/// left out unless `statuses` names `processor_declined`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionSearch {
    pub ids: Option<Vec<String>>,
    pub statuses: Option<Vec<TransactionStatus>>,
    pub r#type: Option<TransactionType>,
}

impl TransactionSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids_in<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn status_in<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = TransactionStatus>,
    {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn type_is(mut self, r#type: TransactionType) -> Self {
        self.r#type = Some(r#type);
        self
    }

    fn narrows_to(&self, tx: &Transaction) -> bool {
        let status_ok = self
            .statuses
            .as_ref()
            .map_or(tx.status.is_success(), |statuses| {
                statuses.contains(&tx.status)
            });
        let type_ok = self.r#type.is_none_or(|t| t == tx.r#type);
        status_ok && type_ok
    }

    /// Runs the criteria over `transactions`, which must be in creation order.
    pub fn evaluate(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        match &self.ids {
            Some(ids) => {
                let by_id: HashMap<&str, &Transaction> =
                    transactions.iter().map(|tx| (tx.id.as_str(), tx)).collect();
                let mut seen = HashSet::new();
                ids.iter()
                    .filter(|id| seen.insert(id.as_str()))
                    .filter_map(|id| by_id.get(id.as_str()).copied())
                    .filter(|tx| self.narrows_to(tx))
                    .cloned()
                    .collect()
            }
            None => transactions
                .iter()
                .filter(|tx| self.narrows_to(tx))
                .cloned()
                .collect(),
        }
    }
}
