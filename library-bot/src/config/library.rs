//! Library answering config: reference data location, chunking, fallback replies.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Reply sent when every partial answer came back empty.
pub const DEFAULT_EMPTY_ANSWER_MESSAGE: &str =
    "К сожалению, я не нашёл ответа на этот вопрос. Попробуйте переформулировать его.";

/// How a query chunk's length is measured against the chunk budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkStrategy {
    /// Character count (approximates the token budget).
    #[default]
    Chars,
    /// Exact token count with the completion model's tokenizer.
    Tokens,
}

impl FromStr for ChunkStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chars" | "characters" => Ok(ChunkStrategy::Chars),
            "tokens" => Ok(ChunkStrategy::Tokens),
            other => anyhow::bail!("unknown CHUNK_STRATEGY {:?} (expected chars or tokens)", other),
        }
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkStrategy::Chars => f.write_str("chars"),
            ChunkStrategy::Tokens => f.write_str("tokens"),
        }
    }
}

/// Settings of the library question pipeline.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// REFERENCE_DATA_PATH (YAML), read on every request
    pub reference_path: PathBuf,
    /// CHUNK_BUDGET
    pub chunk_budget: usize,
    /// CHUNK_STRATEGY
    pub chunk_strategy: ChunkStrategy,
    /// EMPTY_ANSWER_MESSAGE
    pub empty_answer_message: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("data.yaml"),
            chunk_budget: prompt::DEFAULT_CHUNK_BUDGET,
            chunk_strategy: ChunkStrategy::Chars,
            empty_answer_message: DEFAULT_EMPTY_ANSWER_MESSAGE.to_string(),
        }
    }
}

impl LibraryConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let reference_path = env::var("REFERENCE_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.reference_path);
        let chunk_budget = match env::var("CHUNK_BUDGET") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CHUNK_BUDGET is not an integer: {}", raw))?,
            Err(_) => defaults.chunk_budget,
        };
        let chunk_strategy = match env::var("CHUNK_STRATEGY") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.chunk_strategy,
        };
        let empty_answer_message = env::var("EMPTY_ANSWER_MESSAGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.empty_answer_message);
        Ok(Self {
            reference_path,
            chunk_budget,
            chunk_strategy,
            empty_answer_message,
        })
    }

    /// Budget must be positive and the reference file must exist (it is re-read per request).
    pub fn validate(&self) -> Result<()> {
        if self.chunk_budget == 0 {
            anyhow::bail!("CHUNK_BUDGET must be greater than zero");
        }
        if !self.reference_path.is_file() {
            anyhow::bail!(
                "REFERENCE_DATA_PATH does not point to a file: {}",
                self.reference_path.display()
            );
        }
        Ok(())
    }
}
