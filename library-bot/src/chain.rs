//! # Handler chain
//!
//! Runs a sequence of handlers. All `before` hooks run in order (any false stops the chain); then
//! `handle` runs until one handler returns Stop or Reply; then all `after` hooks run in reverse.

use crate::core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn response_kind(response: &HandlerResponse) -> &'static str {
    match response {
        HandlerResponse::Continue => "Continue",
        HandlerResponse::Stop => "Stop",
        HandlerResponse::Ignore => "Ignore",
        HandlerResponse::Reply(_) => "Reply",
    }
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse.
    ///
    /// When a handle fails, the after hooks still run (with the undelivered reply, if any) and the
    /// handle error is returned afterwards.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            if !h.before(message).await? {
                info!(handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        let mut handle_error = None;
        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = match h.handle(message).await {
                Ok(response) => response,
                Err(e) => {
                    error!(handler = %name, error = %e, "step: handler handle failed");
                    // after hooks still see what the handler tried to send.
                    final_response = match e.attempted_reply() {
                        Some(reply) => HandlerResponse::Reply(reply.to_string()),
                        None => HandlerResponse::Stop,
                    };
                    handle_error = Some(e);
                    break;
                }
            };
            debug!(handler = %name, response = ?response, "Handler processed");
            info!(
                handler = %name,
                response_type = %response_kind(&response),
                reply_len = ?response.reply_text().map(str::len),
                "step: handler handle done"
            );
            if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                final_response = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        if let Some(e) = handle_error {
            return Err(e);
        }

        info!(
            message_id = %message.id,
            response_type = %response_kind(&final_response),
            "step: handler_chain finished"
        );
        Ok(final_response)
    }
}
