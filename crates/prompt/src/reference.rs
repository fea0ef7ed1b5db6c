//! Prompt assembly for reference-grounded questions.

/// Fixed system instruction for the library assistant.
pub const LIBRARY_SYSTEM_PROMPT: &str = "You are a helpful assistant for answering RUDN university library-related questions only on the language of the user. You responses are short by containing only the required information.";

/// Separator placed between the reference document and the user chunk.
pub const USER_QUERY_SEPARATOR: &str = "\n\nUser query: ";

/// Builds the user prompt for one chunk: `{reference}\n\nUser query: {chunk}`.
pub fn build_reference_prompt(reference: &str, chunk: &str) -> String {
    let mut out = String::with_capacity(reference.len() + USER_QUERY_SEPARATOR.len() + chunk.len());
    out.push_str(reference);
    out.push_str(USER_QUERY_SEPARATOR);
    out.push_str(chunk);
    out
}
