// Prompt constants for skill extraction.

/// Skill extraction prompt. Replace `{no_commentary}` and `{text}` before sending.
pub const EXTRACT_SKILLS_PROMPT_TEMPLATE: &str = "Extract only the technical and soft skills \
as a comma-separated list from the following text. {no_commentary}

{text}";

pub const EXTRACT_MAX_TOKENS: u32 = 300;
pub const EXTRACT_TEMPERATURE: f32 = 0.3;
