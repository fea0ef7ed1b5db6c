//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "library-bot")]
#[command(about = "Telegram bot answering library questions from a reference document", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Answer one question from the command line and print the reply (no Telegram needed).
    Ask {
        /// The question, e.g. "Когда открывается библиотека?"
        question: String,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Load BotConfig for `ask`: a bot token is not required.
pub fn load_answer_config() -> Result<BotConfig> {
    let token = std::env::var("BOT_TOKEN")
        .or_else(|_| std::env::var("TELEGRAM_BOT_TOKEN"))
        .unwrap_or_default();
    BotConfig::load(Some(token))
}
