//! BotConfig: BaseConfig + LLM config + LibraryConfig. Use load() for env-based loading.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};

use super::{BaseConfig, LibraryConfig};

/// Bot config assembled from the environment and validated before anything starts.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub library: LibraryConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let library = LibraryConfig::from_env()?;
        Ok(Self { base, llm, library })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.validate_answering()
    }

    /// Validate only what answering a question needs (LLM + library); the Telegram part is skipped.
    pub fn validate_answering(&self) -> Result<()> {
        if self.llm.api_key().trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty");
        }
        if reqwest::Url::parse(self.llm.base_url()).is_err() {
            anyhow::bail!("OPENAI_BASE_URL is not a valid URL: {}", self.llm.base_url());
        }
        if self.llm.max_tokens() == 0 {
            anyhow::bail!("LLM_MAX_TOKENS must be greater than zero");
        }
        self.library.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn llm(&self) -> &EnvLlmConfig {
        &self.llm
    }
    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn interaction_log_file(&self) -> &str {
        &self.base.interaction_log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
