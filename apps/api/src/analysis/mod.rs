// Skill-gap analysis: fuzzy matching, gap detection, roadmap generation.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod fuzzy;
pub mod gap_matcher;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod roadmap;
