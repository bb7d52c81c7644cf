use clap::Parser;
use fake_gateway::application::gateway::Gateway;
use fake_gateway::config::ServerConfig;
use fake_gateway::interfaces::http;
use miette::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "An in-memory stand-in for a payment gateway",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    server: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.server.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let gateway = Arc::new(Gateway::in_memory());
    if cli.server.decline_all_cards {
        gateway.decline_all_cards();
    }

    http::serve(&cli.server, gateway).await?;

    Ok(())
}
