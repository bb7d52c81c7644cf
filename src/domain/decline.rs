use super::payment_method::PaymentMethod;
use std::sync::atomic::{AtomicBool, Ordering};

/// The "decline all cards" test switch.
///
/// When enabled every authorization fails, whatever the card or amount. A card
/// vaulted with `always_decline` is declined even while the switch is off.
#[derive(Debug, Default)]
pub struct DeclinePolicy {
    all_cards: AtomicBool,
}

impl DeclinePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decline_all_cards(&self) {
        self.all_cards.store(true, Ordering::SeqCst);
    }

    pub fn accept_cards(&self) {
        self.all_cards.store(false, Ordering::SeqCst);
    }

    pub fn is_declining_all(&self) -> bool {
        self.all_cards.load(Ordering::SeqCst)
    }

    pub fn declines(&self, card: Option<&PaymentMethod>) -> bool {
        self.is_declining_all() || card.is_some_and(|c| c.always_decline)
    }

    pub fn reset(&self) {
        self.accept_cards();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_declines_every_card() {
        let policy = DeclinePolicy::new();
        let card = PaymentMethod::new("tok".to_string(), false);
        assert!(!policy.declines(None));
        assert!(!policy.declines(Some(&card)));

        policy.decline_all_cards();
        assert!(policy.declines(None));
        assert!(policy.declines(Some(&card)));

        policy.reset();
        assert!(!policy.is_declining_all());
    }

    #[test]
    fn test_flagged_card_declines_without_switch() {
        let policy = DeclinePolicy::new();
        let card = PaymentMethod::new("tok".to_string(), true);
        assert!(policy.declines(Some(&card)));
    }
}
