//! Response aggregation: one completion per query chunk, merged into a single reply.
//!
//! Chunks are sent strictly in order, one request at a time. The first failing request ends the
//! aggregation; there is no retry. Callers get an [`AnswerOutcome`] instead of a bare string so an
//! empty merge and a failed request are distinguishable from a real answer.

use std::sync::Arc;

use llm_client::LlmClient;
use prompt::{build_reference_prompt, ChatMessage};
use tracing::{info, instrument, warn};

/// Artifact the model sometimes echoes from the reference data; removed from the merged answer.
pub const PLACEHOLDER_ARTIFACT: &str = "{'answer': ['']}";

/// Separator between partial answers.
pub const PARTIAL_SEPARATOR: &str = "\n\n";

/// Result of answering one query.
#[derive(Debug)]
pub enum AnswerOutcome {
    /// Non-empty merged answer.
    Answered(String),
    /// Every partial answer was empty (or only artifacts remained).
    Empty,
    /// The completion request for chunk `chunk_index` failed.
    Failed {
        chunk_index: usize,
        error: anyhow::Error,
    },
}

impl AnswerOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            AnswerOutcome::Answered(text) => Some(text),
            _ => None,
        }
    }
}

/// Joins the non-empty (trimmed) partials with [`PARTIAL_SEPARATOR`] and strips every
/// [`PLACEHOLDER_ARTIFACT`].
pub fn merge_partials<I, S>(partials: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let kept: Vec<String> = partials
        .into_iter()
        .map(|p| p.as_ref().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    let mut merged = kept.join(PARTIAL_SEPARATOR);
    // Removing one occurrence can splice its neighbours into a new one.
    while merged.contains(PLACEHOLDER_ARTIFACT) {
        merged = merged.replace(PLACEHOLDER_ARTIFACT, "");
    }
    merged
}

/// Sends each chunk, prefixed by the reference document, to the LLM and merges the answers.
#[derive(Clone)]
pub struct ResponseAggregator {
    llm: Arc<dyn LlmClient>,
}

impl ResponseAggregator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Answers `chunks` against `reference`. See [`AnswerOutcome`].
    #[instrument(skip(self, reference, chunks), fields(chunk_count = chunks.len()))]
    pub async fn answer(&self, reference: &str, chunks: &[String]) -> AnswerOutcome {
        let mut partials = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let prompt = build_reference_prompt(reference, chunk);
            info!(
                chunk_index = index,
                chunk_len = chunk.chars().count(),
                prompt_len = prompt.len(),
                "step: requesting partial answer"
            );
            match self
                .llm
                .get_llm_response_with_messages(vec![ChatMessage::user(prompt)])
                .await
            {
                Ok(partial) => {
                    let partial = partial.trim().to_string();
                    if partial.is_empty() {
                        warn!(chunk_index = index, "Partial answer is empty; skipped");
                    } else {
                        partials.push(partial);
                    }
                }
                Err(error) => {
                    warn!(chunk_index = index, error = %error, "Partial answer request failed");
                    return AnswerOutcome::Failed {
                        chunk_index: index,
                        error,
                    };
                }
            }
        }

        let merged = merge_partials(&partials);
        if merged.trim().is_empty() {
            AnswerOutcome::Empty
        } else {
            info!(
                partial_count = partials.len(),
                answer_len = merged.len(),
                "step: partial answers merged"
            );
            AnswerOutcome::Answered(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skips_empty_and_joins_with_blank_line() {
        let merged = merge_partials(["  first  ", "", "   ", "second"]);
        assert_eq!(merged, "first\n\nsecond");
    }

    #[test]
    fn test_merge_all_empty_is_empty_string() {
        assert_eq!(merge_partials(["", "  ", "\n"]), "");
        assert_eq!(merge_partials(Vec::<String>::new()), "");
    }

    #[test]
    fn test_merge_removes_every_artifact() {
        let merged = merge_partials([
            "Open 9-18 {'answer': ['']}",
            "{'answer': ['']}Closed Sundays{'answer': ['']}",
        ]);
        assert_eq!(merged, "Open 9-18 \n\nClosed Sundays");
        assert!(!merged.contains(PLACEHOLDER_ARTIFACT));
    }

    #[test]
    fn test_merge_removes_nested_artifact() {
        let merged = merge_partials(["{'answer': [{'answer': ['']}'']}done"]);
        assert_eq!(merged, "done");
    }

    /// Echoes the last line of the prompt (the `User query:` line) back as the answer.
    struct EchoLlm;

    #[async_trait::async_trait]
    impl LlmClient for EchoLlm {
        async fn get_llm_response_with_messages(
            &self,
            messages: Vec<ChatMessage>,
        ) -> anyhow::Result<String> {
            let prompt = &messages[0].content;
            Ok(prompt.lines().last().unwrap_or_default().to_string())
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_aggregator_answers_every_chunk_in_order() {
        let reference = crate::reference::ReferenceDocument::from_text("hours: 9-18");
        let aggregator = ResponseAggregator::new(Arc::new(EchoLlm));
        let chunks = vec!["first part".to_string(), "second part".to_string()];

        let outcome = aggregator.answer(reference.as_str(), &chunks).await;

        assert_eq!(
            outcome.answer(),
            Some("User query: first part\n\nUser query: second part")
        );
    }

    #[test]
    fn test_answer_accessor() {
        assert_eq!(AnswerOutcome::Answered("x".into()).answer(), Some("x"));
        assert_eq!(AnswerOutcome::Empty.answer(), None);
    }
}
