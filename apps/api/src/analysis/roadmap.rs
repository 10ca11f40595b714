//! Roadmap Generator — one 4-step learning plan per missing skill.
//!
//! Every skill is requested independently. A failed request stores the
//! failure sentinel under that skill and the batch carries on; nothing is
//! retried. Requests run concurrently up to `concurrency`, but results are
//! applied in input order so a later skill whose canonical title collides
//! with an earlier one overwrites it, exactly as a sequential run would.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::analysis::prompts::{ROADMAP_MAX_TOKENS, ROADMAP_PROMPT_TEMPLATE, ROADMAP_TEMPERATURE};
use crate::llm_client::{GenerationRequest, TextGenerator};
use crate::skills::normalizer::{canonical_title, SkillList};

/// Stored in place of a plan when the service call for a skill fails.
pub const ROADMAP_FAILURE_SENTINEL: &str = "Roadmap generation failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapEntry {
    pub skill: String,
    pub plan: String,
    pub generated: bool, // false → plan is ROADMAP_FAILURE_SENTINEL
}

impl RoadmapEntry {
    fn generated(skill: String, plan: String) -> Self {
        Self {
            skill,
            plan,
            generated: true,
        }
    }

    fn failed(skill: String) -> Self {
        Self {
            skill,
            plan: ROADMAP_FAILURE_SENTINEL.to_string(),
            generated: false,
        }
    }
}

/// Canonical skill title → plan. Keeps first-insertion order for display;
/// inserting an existing title replaces its plan in place.
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roadmap {
    entries: Vec<RoadmapEntry>,
}

impl Roadmap {
    pub fn insert(&mut self, entry: RoadmapEntry) {
        match self.entries.iter_mut().find(|e| e.skill == entry.skill) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, skill: &str) -> Option<&RoadmapEntry> {
        self.entries.iter().find(|e| e.skill == skill)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoadmapEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Titles whose plan is the failure sentinel.
    pub fn failed_skills(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| !e.generated)
            .map(|e| e.skill.clone())
            .collect()
    }
}

impl Serialize for Roadmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.skill, &entry.plan)?;
        }
        map.end()
    }
}

pub struct RoadmapGenerator {
    llm: Arc<dyn TextGenerator>,
    concurrency: usize,
}

impl RoadmapGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, concurrency: usize) -> Self {
        Self {
            llm,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn generate(&self, missing: &SkillList) -> Roadmap {
        let titles: Vec<String> = missing
            .iter()
            .map(|skill| {
                let title = canonical_title(skill.display());
                if title.is_empty() {
                    skill.display().to_string()
                } else {
                    title
                }
            })
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        for (index, title) in titles.iter().cloned().enumerate() {
            let llm = Arc::clone(&self.llm);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                (index, request_plan(llm.as_ref(), title).await)
            });
        }

        let mut results: Vec<Option<RoadmapEntry>> = vec![None; titles.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, entry)) => results[index] = Some(entry),
                Err(e) => error!("Roadmap task aborted: {e}"),
            }
        }

        let mut roadmap = Roadmap::default();
        for (title, result) in titles.into_iter().zip(results) {
            roadmap.insert(result.unwrap_or_else(|| RoadmapEntry::failed(title)));
        }

        info!(
            "Roadmap ready: {} skills, {} failed",
            roadmap.len(),
            roadmap.failed_skills().len()
        );
        roadmap
    }
}

async fn request_plan(llm: &dyn TextGenerator, title: String) -> RoadmapEntry {
    let prompt = ROADMAP_PROMPT_TEMPLATE.replace("{skill}", &title);
    let request = GenerationRequest {
        prompt: &prompt,
        max_tokens: ROADMAP_MAX_TOKENS,
        temperature: ROADMAP_TEMPERATURE,
    };

    match llm.generate(&request).await {
        Ok(text) if !text.trim().is_empty() => {
            debug!("Roadmap generated for '{title}'");
            RoadmapEntry::generated(title, text.trim().to_string())
        }
        Ok(_) => {
            warn!("Roadmap for '{title}' came back empty");
            RoadmapEntry::failed(title)
        }
        Err(e) => {
            warn!("Roadmap generation failed for '{title}': {e}");
            RoadmapEntry::failed(title)
        }
    }
}
