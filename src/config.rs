use crate::error::{GatewayError, Result};
use clap::Args;
use std::net::{IpAddr, SocketAddr};

/// Server settings. Every flag can also come from the environment.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "FAKE_GATEWAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "FAKE_GATEWAY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Merchant id clients must use in request paths
    #[arg(long, env = "FAKE_GATEWAY_MERCHANT_ID", default_value = "fake-merchant")]
    pub merchant_id: String,

    /// Start with the decline-all-cards switch on
    #[arg(long, env = "FAKE_GATEWAY_DECLINE_ALL_CARDS")]
    pub decline_all_cards: bool,

    /// Log filter directive, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            GatewayError::ValidationError(format!("invalid host address: {}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
