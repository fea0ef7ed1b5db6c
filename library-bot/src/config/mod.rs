//! Bot configuration: BaseConfig (Telegram + logs) + LLM config + LibraryConfig (reference data, chunking).

mod base;
mod bot_config;
mod library;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use library::{ChunkStrategy, LibraryConfig, DEFAULT_EMPTY_ANSWER_MESSAGE};
