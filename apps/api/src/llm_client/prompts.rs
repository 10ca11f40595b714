// Shared prompt fragments.
// Each stage that calls the LLM keeps its own prompts.rs alongside it.
// This file holds the cross-cutting pieces.

/// System prompt sent with every Anthropic call. Cohere's generate endpoint
/// takes no system prompt, so stage prompts must stand on their own.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a precise assistant for career analysis. \
    Answer in plain text only. \
    Do NOT use markdown code fences. \
    Do NOT add greetings, preambles or closing remarks.";

/// Appended to prompts whose output is parsed mechanically.
pub const NO_COMMENTARY_INSTRUCTION: &str = "Avoid extra explanations or formatting.";
