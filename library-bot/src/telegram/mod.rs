//! Telegram layer: adapters, Bot implementation, REPL runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{split_message, TelegramBotAdapter, MAX_MESSAGE_UTF16_UNITS};
pub use runner::run_repl;
