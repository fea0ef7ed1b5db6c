//! Entry points: run the Telegram bot, or answer one question from the command line.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::chain::HandlerChain;
use crate::components::{build_bot_components, build_handler_chain, build_query_handler, BotComponents};
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot};
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, build components and handler chain, then run REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        reference_path = %config.library().reference_path.display(),
        chunk_budget = config.library().chunk_budget,
        chunk_strategy = %config.library().chunk_strategy,
        interaction_log = %config.interaction_log_file(),
        "Initializing bot"
    );

    let (handler_chain, components) = build_only(&config, None)?;
    info!("Bot started successfully");

    run_repl(components.teloxide_bot.clone(), handler_chain).await
}

/// Builds components and handler chain without starting the REPL or tracing. Used by integration
/// tests that inject a recording bot and drive the chain with fake messages.
pub fn build_only(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<(HandlerChain, BotComponents)> {
    let components = build_bot_components(config, bot_override)?;
    let handler_chain = build_handler_chain(&components, config.library());
    Ok((handler_chain, components))
}

/// Answers one question without Telegram and records the exchange in the interaction log.
/// Returns the text a Telegram user would have received.
#[instrument(skip(config, question))]
pub async fn ask_once(config: BotConfig, question: &str) -> Result<String> {
    config.validate_answering()?;
    init_tracing(config.log_file())?;

    let components = build_bot_components(&config, None)?;
    let handler = build_query_handler(&components, config.library());
    let result = handler.answer_query(question.trim()).await;
    let text = handler.reply_text(&result);

    components
        .interaction_log
        .log_exchange(question, Some(text.as_str()))?;
    Ok(text)
}
