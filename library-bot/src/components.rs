//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use llm_client::{LlmClient, LlmConfig, OpenAILlmClient};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::chain::HandlerChain;
use crate::config::{BotConfig, LibraryConfig};
use crate::core::Bot;
use crate::handlers::{InteractionLogHandler, LibraryQueryHandler, StartHandler};
use crate::interaction_log::{InteractionLogger, TiktokenCounter, TokenCounter};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot / ask_once; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Outgoing side used by handlers. Tests substitute a recording Bot.
    pub bot: Arc<dyn Bot>,
    pub llm_client: Arc<dyn LlmClient>,
    pub token_counter: Arc<dyn TokenCounter>,
    pub interaction_log: Arc<InteractionLogger>,
}

/// Creates a teloxide Bot, pointing it at TELEGRAM_API_URL when set and valid.
pub fn build_teloxide_bot(config: &BotConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token().to_string());
    match config.telegram_api_url() {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

/// Tokenizer of the configured model; falls back to cl100k_base for names tiktoken does not know.
pub fn build_token_counter(model: &str) -> Result<Arc<dyn TokenCounter>> {
    let counter = match TiktokenCounter::for_model(model) {
        Ok(counter) => counter,
        Err(e) => {
            warn!(error = %e, model = %model, "Unknown model for tokenizer, using cl100k_base");
            TiktokenCounter::cl100k()?
        }
    };
    info!(encoding_for = %counter.model(), "Token counter ready");
    Ok(Arc::new(counter))
}

/// Builds BotComponents. When `bot_override` is `Some`, handlers send through it instead of Telegram.
#[instrument(skip(config, bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let teloxide_bot = build_teloxide_bot(config);
    let bot: Arc<dyn Bot> = match bot_override {
        Some(b) => b,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let llm_client: Arc<dyn LlmClient> =
        Arc::new(OpenAILlmClient::from_env_config(config.llm()));
    info!(
        model = %config.llm().model(),
        base_url = %config.llm().base_url(),
        max_tokens = config.llm().max_tokens(),
        "LLM client ready"
    );

    let token_counter = build_token_counter(config.llm().model())?;
    let interaction_log = Arc::new(
        InteractionLogger::open(config.interaction_log_file(), token_counter.clone())
            .with_context(|| {
                format!(
                    "Failed to open interaction log {}",
                    config.interaction_log_file()
                )
            })?,
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        llm_client,
        token_counter,
        interaction_log,
    })
}

/// Builds the library question handler from components.
pub fn build_query_handler(
    components: &BotComponents,
    library: &LibraryConfig,
) -> LibraryQueryHandler {
    LibraryQueryHandler::new(
        components.bot.clone(),
        components.llm_client.clone(),
        library.clone(),
        components.token_counter.clone(),
    )
}

/// Builds the handler chain (interaction log → /start → library questions).
pub fn build_handler_chain(components: &BotComponents, library: &LibraryConfig) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(InteractionLogHandler::new(
            components.interaction_log.clone(),
        )))
        .add_handler(Arc::new(StartHandler::new(components.bot.clone())))
        .add_handler(Arc::new(build_query_handler(components, library)))
}
