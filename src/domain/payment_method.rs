use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A vaulted card. Card details are opaque to the gateway; only the token and
/// the decline flag matter.
#[derive(Debug, PartialEq, Clone)]
pub struct PaymentMethod {
    pub token: String,
    pub always_decline: bool,
    pub created_at: DateTime<Utc>,
}

impl PaymentMethod {
    pub fn new(token: String, always_decline: bool) -> Self {
        Self {
            token,
            always_decline,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub struct PaymentMethodRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub always_decline: bool,
}
