//! Skill-gap analysis pipeline.
//!
//! Flow: extract(resume) ∥ extract(jd) → match_all → missing →
//!       roadmap → AnalysisReport.
//!
//! Stateless: one call, one report. Extraction and roadmap failures degrade
//! inside their stages; only missing input is an error here.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::analysis::gap_matcher::{missing_from, GapMatcher};
use crate::analysis::roadmap::RoadmapGenerator;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::report::AnalysisReport;
use crate::skills::extractor::SkillExtractor;

pub struct SkillGapAnalyzer {
    extractor: SkillExtractor,
    matcher: GapMatcher,
    roadmap: RoadmapGenerator,
}

impl SkillGapAnalyzer {
    pub fn new(llm: Arc<dyn TextGenerator>, threshold: u8, roadmap_concurrency: usize) -> Self {
        Self {
            extractor: SkillExtractor::new(Arc::clone(&llm)),
            matcher: GapMatcher::new(threshold),
            roadmap: RoadmapGenerator::new(llm, roadmap_concurrency),
        }
    }

    /// Runs the full analysis for one resume / job description pair.
    ///
    /// `resume_text` may be empty (a PDF without a text layer); every
    /// required skill is then reported missing. A blank job description is
    /// rejected because nothing could be compared.
    pub async fn analyze(&self, resume_text: &str, jd_text: &str) -> Result<AnalysisReport, AppError> {
        if jd_text.trim().is_empty() {
            return Err(AppError::Validation("jd_text cannot be empty".to_string()));
        }

        let analysis_id = Uuid::new_v4();
        info!(
            "Analysis {analysis_id}: resume {} chars, job description {} chars",
            resume_text.len(),
            jd_text.len()
        );

        let (resume_skills, jd_skills) = tokio::join!(
            self.extractor.extract(resume_text),
            self.extractor.extract(jd_text)
        );
        info!(
            "Analysis {analysis_id}: {} resume skills, {} job description skills",
            resume_skills.len(),
            jd_skills.len()
        );

        let matches = self.matcher.match_all(&jd_skills, &resume_skills);
        let missing_skills = missing_from(matches.iter().cloned());
        info!(
            "Analysis {analysis_id}: {} of {} required skills missing (threshold {})",
            missing_skills.len(),
            jd_skills.len(),
            self.matcher.threshold()
        );

        let roadmap = self.roadmap.generate(&missing_skills).await;

        Ok(AnalysisReport {
            analysis_id,
            generated_at: Utc::now(),
            threshold: self.matcher.threshold(),
            resume_skills,
            jd_skills,
            missing_skills,
            matches,
            failed_roadmaps: roadmap.failed_skills(),
            roadmap,
            job_description: jd_text.to_string(),
        })
    }
}
