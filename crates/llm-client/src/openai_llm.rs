//! OpenAI implementation of [`LlmClient`]: wraps openai-client, prepends the system message and
//! sends deterministic generation parameters.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionParams;
use prompt::{ChatMessage, LIBRARY_SYSTEM_PROMPT};
use tracing::{debug, instrument};

use super::{chat_message_to_openai, EnvLlmConfig, LlmClient, LlmConfig, DEFAULT_MODEL};

/// LlmClient backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
    params: CompletionParams,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            params: CompletionParams::default(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            params: CompletionParams::default(),
        }
    }

    /// Builds a client from any [`LlmConfig`] (key, base URL, model, system prompt, token cap).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_system_prompt_opt(config.system_prompt().map(str::to_string))
            .with_max_tokens(config.max_tokens())
    }

    /// Shorthand for [`OpenAILlmClient::from_config`] with the env-backed config.
    pub fn from_env_config(config: &EnvLlmConfig) -> Self {
        Self::from_config(config)
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.params = CompletionParams::deterministic(max_tokens);
        self
    }

    pub fn params(&self) -> &CompletionParams {
        &self.params
    }

    pub fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(LIBRARY_SYSTEM_PROMPT)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages))]
    async fn get_llm_response_with_messages(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages = Vec::with_capacity(messages.len() + 1);
        openai_messages.push(chat_message_to_openai(&ChatMessage::system(
            self.system_content(),
        ))?);
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        let completion = self
            .client
            .chat_completion(&self.model, openai_messages, &self.params)
            .await?;
        debug!(content_len = completion.content.len(), "LLM completion received");
        Ok(completion.content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
