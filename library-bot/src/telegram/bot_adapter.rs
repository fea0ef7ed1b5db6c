//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code sends messages via
//! Telegram; tests substitute another Bot impl.

use crate::core::{Bot as CoreBot, BotError, Chat, Result};
use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId};

/// Telegram rejects messages longer than 4096 UTF-16 code units.
pub const MAX_MESSAGE_UTF16_UNITS: usize = 4096;

/// Byte offset of the longest prefix of `text` that fits in `max_units` UTF-16 code units.
fn utf16_prefix_end(text: &str, max_units: usize) -> usize {
    let mut units = 0;
    for (i, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return i;
        }
    }
    text.len()
}

/// Splits `text` into pieces of at most `max_units` UTF-16 code units (never inside a character),
/// preferring to break after a newline in the last 200 units of a piece. Pieces concatenate back
/// to `text`.
pub fn split_message(text: &str, max_units: usize) -> Vec<&str> {
    let max_units = max_units.max(2);
    let mut pieces = Vec::new();
    let mut rest = text;

    while rest.encode_utf16().count() > max_units {
        let hard_end = utf16_prefix_end(rest, max_units);
        let window = &rest[..hard_end];
        let soft_floor = utf16_prefix_end(window, max_units.saturating_sub(200));
        let end = window
            .rfind('\n')
            .filter(|&pos| pos >= soft_floor)
            .map(|pos| pos + 1)
            .unwrap_or(hard_end);
        pieces.push(&rest[..end]);
        rest = &rest[end..];
    }
    if !rest.is_empty() || pieces.is_empty() {
        pieces.push(rest);
    }
    pieces
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        for piece in split_message(text, MAX_MESSAGE_UTF16_UNITS) {
            self.bot
                .send_message(ChatId(chat.id), piece.to_string())
                .await
                .map_err(|e| BotError::Bot(e.to_string()))?;
        }
        Ok(())
    }
}
