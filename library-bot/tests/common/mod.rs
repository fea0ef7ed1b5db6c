//! Test doubles shared by the integration tests: a recording Bot and a scripted LLM client.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use library_bot::{Bot, BotError, Chat, Message, MessageDirection, Result as BotResult, User};
use llm_client::LlmClient;
use prompt::ChatMessage;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// One recorded `send_message(chat, text)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
}

/// Bot that records every outgoing message instead of calling Telegram.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> BotResult<()> {
        self.sent.lock().unwrap().push(SentMessage {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Bot whose every send fails, like a user who blocked the bot.
pub struct FailingBot;

#[async_trait]
impl Bot for FailingBot {
    async fn send_message(&self, _chat: &Chat, _text: &str) -> BotResult<()> {
        Err(BotError::Bot(
            "Forbidden: bot was blocked by the user".to_string(),
        ))
    }
}

/// LLM client that returns scripted replies in order and records the prompts it received.
/// When the script runs out it answers with an empty string.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<anyhow::Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = anyhow::Result<String>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        messages: Vec<ChatMessage>,
    ) -> anyhow::Result<String> {
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

pub fn make_user(first_name: Option<&str>) -> User {
    User {
        id: 123,
        username: Some("student".to_string()),
        first_name: first_name.map(String::from),
        last_name: None,
    }
}

pub fn make_message(content: &str) -> Message {
    Message {
        id: "msg_1".to_string(),
        user: make_user(Some("Анна")),
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

pub const SAMPLE_REFERENCE: &str = "library:
  name: RUDN Scientific Library
  hours:
    weekdays: Monday to Friday
    weekends: closed on Sunday
  contacts:
    email: library@example.org
";

/// Writes `content` as `data.yaml` inside `dir` and returns its path.
pub fn write_reference(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("data.yaml");
    std::fs::write(&path, content).unwrap();
    path
}
