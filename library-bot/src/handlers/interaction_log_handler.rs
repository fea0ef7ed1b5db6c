//! Writes every exchange to the interaction log in after(), once the reply is known.

use crate::core::{Handler, HandlerResponse, Message, Result};
use crate::interaction_log::InteractionLogger;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, instrument};

/// Logs the user text and, when the chain replied, the reply and its generated-token count.
/// Put it first in the chain so its after() runs last.
#[derive(Clone)]
pub struct InteractionLogHandler {
    logger: Arc<InteractionLogger>,
}

impl InteractionLogHandler {
    pub fn new(logger: Arc<InteractionLogger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl Handler for InteractionLogHandler {
    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if message.content.trim().is_empty() {
            return Ok(());
        }
        self.logger
            .log_exchange(&message.content, response.reply_text())
            .map_err(|e| {
                error!(error = %e, user_id = message.user.id, "Failed to write interaction log");
                e
            })?;
        Ok(())
    }
}
