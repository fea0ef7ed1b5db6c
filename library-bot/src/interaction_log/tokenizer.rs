//! Token counting with the tokenizer of the completion model family.

use tiktoken_rs::CoreBPE;

/// Counts tokens the way the completion service bills them.
pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// [`TokenCounter`] backed by tiktoken's BPE for a model (e.g. `gpt-3.5-turbo-0125` → cl100k_base).
pub struct TiktokenCounter {
    model: String,
    bpe: CoreBPE,
}

impl TiktokenCounter {
    /// Loads the encoding registered for `model`. Fails for unknown model names.
    pub fn for_model(model: &str) -> anyhow::Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .map_err(|e| anyhow::anyhow!("No tokenizer for model {}: {}", model, e))?;
        Ok(Self {
            model: model.to_string(),
            bpe,
        })
    }

    /// cl100k_base, the encoding of the gpt-3.5-turbo / gpt-4 family.
    pub fn cl100k() -> anyhow::Result<Self> {
        Ok(Self {
            model: "cl100k_base".to_string(),
            bpe: tiktoken_rs::cl100k_base()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        // Special-token markers in user text are counted as plain text.
        self.bpe.encode_ordinary(text).len()
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt35_model_maps_to_cl100k() {
        let by_model = TiktokenCounter::for_model("gpt-3.5-turbo-0125").unwrap();
        let base = TiktokenCounter::cl100k().unwrap();
        for text in ["hello", "Когда открывается библиотека?", ""] {
            assert_eq!(by_model.count(text), base.count(text));
        }
    }

    #[test]
    fn test_known_counts() {
        let counter = TiktokenCounter::cl100k().unwrap();
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("hello"), 1);
        assert_eq!(counter.count("hello world"), 2);
    }

    #[test]
    fn test_special_token_text_counted_as_plain_text() {
        let counter = TiktokenCounter::cl100k().unwrap();
        assert!(counter.count("<|endoftext|>") > 1);
    }
}
