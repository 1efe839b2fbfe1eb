//! Probe the configured provider
//!
//! Reads configuration from the environment (`AI_PROVIDER`, `<P>_API_KEY`,
//! ...), or from a YAML file passed as the first argument, then sends one
//! prompt and one short chat through the gateway.
//!
//! Run with: GEMINI_API_KEY=... cargo run --example probe

use aigate_core::config::{load_from_yaml, SafeLogging};
use aigate_core::{Gateway, GatewayConfig, Message};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_from_yaml(path)?,
        None => GatewayConfig::from_env()?,
    };

    let gateway = Gateway::new(config.clone())?;
    let provider = gateway.current_provider();
    println!(
        "Provider: {} ({})",
        provider,
        config.providers.get(provider).safe_for_logging()
    );

    gateway.check_credentials()?;

    println!("Probe: {}", gateway.probe().await?);

    let conversation = vec![
        Message::user("Name a systems programming language."),
        Message::assistant("Rust."),
        Message::user("Why is it memory safe, in one sentence?"),
    ];
    println!("Chat: {}", gateway.chat_with_ai(&conversation).await?);

    Ok(())
}
