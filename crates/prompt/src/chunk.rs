//! Query chunking: splits a long user query into word-aligned segments below a length budget.
//!
//! The budget is compared against a length function. [`chunk_query`] uses the character count,
//! which only approximates the model's token budget; [`chunk_query_by`] accepts any measure
//! (e.g. an exact tokenizer count).

/// Default per-chunk budget (characters for [`chunk_query`]).
pub const DEFAULT_CHUNK_BUDGET: usize = 200;

/// Length in Unicode scalar values (not bytes).
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits `query` on whitespace and packs words greedily into chunks whose character length stays
/// below `budget`. See [`chunk_query_by`] for the exact rule.
pub fn chunk_query(query: &str, budget: usize) -> Vec<String> {
    chunk_query_by(query, budget, char_len)
}

/// Greedy word packing with an injected length measure.
///
/// The running chunk keeps a trailing space after every word. A word is appended while
/// `measure(running) + measure(word) < budget`; otherwise the running chunk is emitted (trimmed)
/// and the word starts a new one. A word that alone reaches the budget still gets its own chunk.
/// The last running chunk is always emitted, so empty input yields `vec![""]`.
pub fn chunk_query_by<F>(query: &str, budget: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in query.split_whitespace() {
        if !current.is_empty() && measure(&current) + measure(word) >= budget {
            chunks.push(current.trim_end().to_string());
            current.clear();
        }
        current.push_str(word);
        current.push(' ');
    }
    chunks.push(current.trim_end().to_string());

    chunks
}
