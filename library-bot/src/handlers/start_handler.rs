//! `/start` command: greets the user and explains what the bot does.

use crate::core::{Bot, BotError, Handler, HandlerResponse, Message, Result, User};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

/// Builds the welcome text for `user`.
pub fn welcome_message(user: &User) -> String {
    format!(
        "{}, добро пожаловать!👋\nЯ Telegram-бот, который может отвечать на общие вопросы о библиотеке университета РУДН, используя OpenAI.\nНе стесняйтесь задавать мне что угодно.😊",
        user.display_name()
    )
}

/// Replies to `/start` (and `/start@botname`); passes every other message on.
#[derive(Clone)]
pub struct StartHandler {
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub const COMMAND: &'static str = "start";

    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some(Self::COMMAND) {
            return Ok(HandlerResponse::Continue);
        }
        let text = welcome_message(&message.user);
        self.bot
            .reply_to(message, &text)
            .await
            .map_err(|e| BotError::undelivered(text.as_str(), e))?;
        info!(user_id = message.user.id, "Welcome message sent");
        Ok(HandlerResponse::Reply(text))
    }
}
