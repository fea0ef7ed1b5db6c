//! Handler chain result type.

/// Outcome of the handle phase.
///
/// `Reply(text)` carries the text produced for the user, so handlers earlier in the chain can
/// record it in `after()` (the interaction log counts its tokens there). If sending failed, the
/// after hooks still get `Reply(text)` and the chain returns [`crate::core::BotError::Undelivered`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing was sent.
    Stop,
    /// This handler does not apply; try next.
    Ignore,
    /// Stop the chain; `text` was sent (or attempted) to the user.
    Reply(String),
}

impl HandlerResponse {
    /// The reply text, if any.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            HandlerResponse::Reply(text) => Some(text),
            _ => None,
        }
    }
}
