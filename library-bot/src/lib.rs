//! # Library bot
//!
//! Telegram bot for university library questions. Each question is split into chunks, every chunk
//! is answered by an OpenAI-compatible model with the reference YAML as context, and the partial
//! answers are merged into one reply. Every exchange is written to a conversation log with
//! token counts.

pub mod answer;
pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod interaction_log;
pub mod reference;
pub mod runner;
pub mod telegram;

pub use cli::{load_answer_config, load_config, Cli, Commands};

pub use core::{
    init_tracing, Bot, BotError, Chat, Handler, HandlerResponse, Message,
    MessageDirection, Result, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{run_repl, split_message, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};

pub use answer::{merge_partials, AnswerOutcome, ResponseAggregator, PLACEHOLDER_ARTIFACT};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BaseConfig, BotConfig, ChunkStrategy, LibraryConfig};
pub use handlers::{InteractionLogHandler, LibraryQueryHandler, StartHandler, MSG_REQUEST_FAILED};
pub use interaction_log::{InteractionLogger, Sender, TiktokenCounter, TokenCounter};
pub use reference::{ReferenceDocument, ReferenceError};
pub use runner::{ask_once, build_only, run_bot};
