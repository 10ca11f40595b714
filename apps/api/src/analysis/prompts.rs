// Prompt constants for roadmap generation.

/// Learning roadmap prompt. Replace `{skill}` with the canonical title before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = "You are a career coach. Suggest a short, practical \
learning roadmap for mastering '{skill}'.
Include exactly 4 steps:
1. A brief theory/fundamentals learning step
2. A free or popular online course/resource suggestion
3. A hands-on project or practice activity suggestion
4. A way to showcase this skill on a resume or portfolio";

pub const ROADMAP_MAX_TOKENS: u32 = 200;
pub const ROADMAP_TEMPERATURE: f32 = 0.5;
