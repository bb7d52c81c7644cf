use std::sync::atomic::{AtomicU64, Ordering};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_WIDTH: usize = 8;

/// Hands out transaction ids and payment-method tokens.
///
/// Both sequences are monotonic for the life of the generator and are not
/// rewound by a gateway reset, so a value is never issued twice.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next_id: AtomicU64,
    next_token: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        encode(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_token(&self) -> String {
        format!("tok_{}", encode(self.next_token.fetch_add(1, Ordering::Relaxed)))
    }
}

/// Zero-padded base36.
fn encode(mut n: u64) -> String {
    let mut digits = Vec::with_capacity(ID_WIDTH);
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    while digits.len() < ID_WIDTH {
        digits.push(b'0');
    }
    digits.into_iter().rev().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids = IdGenerator::new();
        let issued: HashSet<String> = (0..10_000).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 10_000);
    }

    #[test]
    fn test_tokens_do_not_collide_with_ids() {
        let ids = IdGenerator::new();
        let id = ids.next_id();
        let token = ids.next_token();
        assert_ne!(id, token);
    }

    #[test]
    fn test_encode_width() {
        assert_eq!(encode(0), "00000000");
        assert_eq!(encode(35), "0000000z");
        assert_eq!(encode(36), "00000010");
    }
}
