//! # ailaai-client
//!
//! Client-side interpretation of cards and messages: walking a card's
//! conversation script, folding a message's attachments into what its bubble
//! shows, and the configuration and logging the embedding app shares.

pub mod attachments;
pub mod config;
pub mod events;
pub mod inspect;
pub mod lookup;
pub mod navigator;
pub mod state;
pub mod view;

mod error;

use std::io::Read;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

pub use config::ClientConfig;
pub use error::{FetchError, NavigationError};
pub use lookup::Lookup;
pub use navigator::{ConversationNavigator, ReplyRequest, Selection};
pub use state::ConversationSession;

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured filter. Returns false if a subscriber was already installed.
pub fn init_tracing(config: &ClientConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Entry point of `ailaai-inspect`: read a card or message record from the
/// file named by the first argument (stdin when absent or `-`) and print
/// what the client makes of it.
pub fn run() -> Result<()> {
    let config = ClientConfig::from_env();
    init_tracing(&config);

    tracing::info!(
        "Starting {} inspector v{}",
        ailaai_shared::constants::APP_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let kind = match std::env::var("AILAAI_INSPECT") {
        Ok(name) => Some(
            inspect::RecordKind::from_name(&name)
                .with_context(|| format!("AILAAI_INSPECT must be `message` or `card`, got `{name}`"))?,
        ),
        Err(_) => None,
    };

    let raw = match std::env::args().nth(1).filter(|arg| arg != "-") {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    print!("{}", inspect::inspect(&raw, kind, &config)?);
    Ok(())
}
