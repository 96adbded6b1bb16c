// Cross-cutting prompt fragments. Each feature module keeps its own prompts.rs.

/// System prompt shared by every structured-output call.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Maximum resume characters forwarded to the model.
pub const MAX_RESUME_CHARS: usize = 12_000;

/// Truncates on a char boundary so long resumes stay within the prompt budget.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
