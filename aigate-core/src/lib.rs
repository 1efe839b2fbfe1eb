//! Aigate Core Library
//!
//! Provider-agnostic gateway for prompt, vision and chat requests against
//! Gemini, OpenAI and Anthropic. The active backend is chosen by
//! configuration; callers only see [`Gateway`] and [`GatewayError`].
//!
//! ```no_run
//! use aigate_core::{Gateway, GatewayConfig, Message};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Gateway::new(GatewayConfig::from_env()?)?;
//! let reply = gateway
//!     .chat_with_ai(&[Message::user("What is Rust?")])
//!     .await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod gateway;
pub mod http;
pub mod protocol;
pub mod providers;

pub use config::{load_from_json, load_from_yaml, ConfigError, GatewayConfig};
pub use gateway::{Gateway, GatewayError, GatewayResult, Operation};
pub use http::{HttpExecutor, RequestOptions};
pub use protocol::{ImageAttachment, Message, MessageRole};
pub use providers::{ProviderError, ProviderId};

/// Returns the version of the Aigate Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
