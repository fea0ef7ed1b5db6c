//! Error types for the bot core.

use thiserror::Error;

/// Errors surfaced by handlers and the chain: transport failures and IO (interaction log).
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Bot error: {0}")]
    Bot(String),

    /// A reply was produced but could not be delivered.
    #[error("Reply not delivered: {source}")]
    Undelivered {
        reply: String,
        #[source]
        source: Box<BotError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Wraps a send failure together with the reply that was being sent.
    pub fn undelivered(reply: impl Into<String>, source: BotError) -> Self {
        BotError::Undelivered {
            reply: reply.into(),
            source: Box::new(source),
        }
    }

    /// The reply text of an [`BotError::Undelivered`] error.
    pub fn attempted_reply(&self) -> Option<&str> {
        match self {
            BotError::Undelivered { reply, .. } => Some(reply),
            _ => None,
        }
    }
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
