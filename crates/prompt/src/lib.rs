//! # Prompt
//!
//! Prepares user input for a token-limited chat completion call.
//!
//! ## Pieces
//!
//! - [`ChatMessage`] / [`MessageRole`]: one element of the OpenAI `messages` array.
//! - [`chunk_query`] / [`chunk_query_by`]: greedy word-preserving split of an oversized query.
//! - [`build_reference_prompt`]: reference document + separator + one query chunk.
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to LLM APIs by `llm-client`. This crate performs no I/O.

mod chunk;
mod reference;

pub use chunk::{chunk_query, chunk_query_by, char_len, DEFAULT_CHUNK_BUDGET};
pub use reference::{build_reference_prompt, LIBRARY_SYSTEM_PROMPT, USER_QUERY_SEPARATOR};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}
