//! Skill Extractor — free text in, ordered skill list out.
//!
//! Extraction is delegated to the text-generation service. Any failure of that
//! call degrades to an empty list so the analysis can still finish; the
//! failure is logged at `warn` so it is not mistaken for "no skills found".

use std::sync::Arc;

use tracing::{debug, warn};

use crate::llm_client::prompts::NO_COMMENTARY_INSTRUCTION;
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::skills::normalizer::SkillList;
use crate::skills::prompts::{
    EXTRACT_MAX_TOKENS, EXTRACT_SKILLS_PROMPT_TEMPLATE, EXTRACT_TEMPERATURE,
};

pub struct SkillExtractor {
    llm: Arc<dyn TextGenerator>,
}

impl SkillExtractor {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Extracts skills from `text`. One attempt, never fails.
    pub async fn extract(&self, text: &str) -> SkillList {
        if text.trim().is_empty() {
            debug!("Skipping skill extraction for blank text");
            return SkillList::new();
        }

        let prompt = build_extract_prompt(text);
        let request = GenerationRequest {
            prompt: &prompt,
            max_tokens: EXTRACT_MAX_TOKENS,
            temperature: EXTRACT_TEMPERATURE,
        };

        match self.llm.generate(&request).await {
            Ok(raw) => {
                let skills = parse_skill_list(&raw);
                debug!("Extracted {} skills from {} chars", skills.len(), text.len());
                skills
            }
            Err(e) => {
                warn!("Skill extraction failed, continuing with no skills: {e}");
                SkillList::new()
            }
        }
    }
}

fn build_extract_prompt(text: &str) -> String {
    EXTRACT_SKILLS_PROMPT_TEMPLATE
        .replace("{no_commentary}", NO_COMMENTARY_INSTRUCTION)
        .replace("{text}", text)
}

/// Splits a comma-separated model response into skills. Fragments are
/// trimmed, trailing periods are dropped and blanks are discarded.
pub fn parse_skill_list(raw: &str) -> SkillList {
    SkillList::from_raw(
        raw.split(',')
            .map(|fragment| fragment.trim().trim_end_matches('.')),
    )
}
