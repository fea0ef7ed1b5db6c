//! Catch-all text handler: answers library questions from the reference document.
//!
//! Pipeline per message: load reference → chunk query → one completion per chunk → merge →
//! send. Everything runs sequentially inside the handler call.

use crate::answer::{AnswerOutcome, ResponseAggregator};
use crate::config::{ChunkStrategy, LibraryConfig};
use crate::core::{Bot, BotError, Handler, HandlerResponse, Message, Result};
use crate::interaction_log::TokenCounter;
use crate::reference::{ReferenceDocument, ReferenceError};
use async_trait::async_trait;
use llm_client::LlmClient;
use prompt::{chunk_query, chunk_query_by};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Sent when the reference data cannot be loaded or a completion request fails.
pub const MSG_REQUEST_FAILED: &str =
    "Извините, не удалось обработать ваш запрос. Пожалуйста, попробуйте позже.";

/// Answers any non-empty text message.
#[derive(Clone)]
pub struct LibraryQueryHandler {
    bot: Arc<dyn Bot>,
    aggregator: ResponseAggregator,
    library: LibraryConfig,
    tokens: Arc<dyn TokenCounter>,
}

impl LibraryQueryHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        llm_client: Arc<dyn LlmClient>,
        library: LibraryConfig,
        tokens: Arc<dyn TokenCounter>,
    ) -> Self {
        Self {
            bot,
            aggregator: ResponseAggregator::new(llm_client),
            library,
            tokens,
        }
    }

    /// Splits `query` with the configured strategy and budget.
    pub fn chunk(&self, query: &str) -> Vec<String> {
        match self.library.chunk_strategy {
            ChunkStrategy::Chars => chunk_query(query, self.library.chunk_budget),
            ChunkStrategy::Tokens => {
                chunk_query_by(query, self.library.chunk_budget, |s| self.tokens.count(s))
            }
        }
    }

    /// Runs the answering pipeline without sending anything. The reference file is read fresh.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn answer_query(&self, query: &str) -> std::result::Result<AnswerOutcome, ReferenceError> {
        let reference = ReferenceDocument::load(&self.library.reference_path)?;
        let chunks = self.chunk(query);
        info!(
            chunk_count = chunks.len(),
            strategy = %self.library.chunk_strategy,
            budget = self.library.chunk_budget,
            "step: query chunked"
        );
        Ok(self.aggregator.answer(reference.as_str(), &chunks).await)
    }

    /// Text delivered to the user for a pipeline result.
    pub fn reply_text(&self, result: &std::result::Result<AnswerOutcome, ReferenceError>) -> String {
        match result {
            Ok(AnswerOutcome::Answered(text)) => text.clone(),
            Ok(AnswerOutcome::Empty) => self.library.empty_answer_message.clone(),
            Ok(AnswerOutcome::Failed { .. }) | Err(_) => MSG_REQUEST_FAILED.to_string(),
        }
    }

    /// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
    fn log_error_chain(e: &(dyn std::error::Error + 'static), first_msg: &str) {
        error!(cause = %e, "{}", first_msg);
        let mut source = e.source();
        while let Some(cause) = source {
            error!(cause = %cause, "Caused by");
            source = cause.source();
        }
    }

    fn log_failure(result: &std::result::Result<AnswerOutcome, ReferenceError>) {
        match result {
            Err(e) => Self::log_error_chain(e, "Failed to load reference data"),
            Ok(AnswerOutcome::Failed { chunk_index, error }) => {
                error!(chunk_index = *chunk_index, "Completion request failed");
                let cause: &(dyn std::error::Error + 'static) = error.as_ref();
                Self::log_error_chain(cause, "LLM request failed");
            }
            Ok(AnswerOutcome::Empty) => info!("All partial answers were empty"),
            Ok(AnswerOutcome::Answered(_)) => {}
        }
    }
}

#[async_trait]
impl Handler for LibraryQueryHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let query = message.content.trim();
        if query.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        let result = self.answer_query(query).await;
        Self::log_failure(&result);
        let text = self.reply_text(&result);

        self.bot.reply_to(message, &text).await.map_err(|e| {
            error!(error = %e, user_id = message.user.id, "Failed to send reply");
            BotError::undelivered(text.as_str(), e)
        })?;
        info!(user_id = message.user.id, reply_len = text.len(), "Library answer sent");
        Ok(HandlerResponse::Reply(text))
    }
}
