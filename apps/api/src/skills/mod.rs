// Skill extraction and normalization.
// All LLM calls go through llm_client.

pub mod extractor;
pub mod normalizer;
pub mod prompts;
