//! Report — the structured analysis result and its rendered document form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::gap_matcher::MatchResult;
use crate::analysis::roadmap::Roadmap;
use crate::errors::AppError;
use crate::skills::normalizer::SkillList;

/// Everything one analysis produced. Handed as-is to a `ReportRenderer`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub threshold: u8,
    pub resume_skills: SkillList,
    pub jd_skills: SkillList,
    pub missing_skills: SkillList,
    pub matches: Vec<MatchResult>,
    pub roadmap: Roadmap,
    pub failed_roadmaps: Vec<String>,
    pub job_description: String,
}

/// A rendered document ready to be downloaded.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Turns an `AnalysisReport` into a downloadable document.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &AnalysisReport) -> Result<RenderedReport, AppError>;
}

const NO_SKILLS: &str = "No skills found.";
const NO_GAPS: &str = "No missing skills! You are a good match.";

/// Default renderer: a single Markdown document.
pub struct MarkdownReportRenderer;

impl ReportRenderer for MarkdownReportRenderer {
    fn render(&self, report: &AnalysisReport) -> Result<RenderedReport, AppError> {
        Ok(RenderedReport {
            file_name: "career_report.md".to_string(),
            content_type: "text/markdown; charset=utf-8",
            body: render_markdown(report),
        })
    }
}

fn render_markdown(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("# SkillFit Career Report\n\n");
    out.push_str(&format!(
        "_Analysis {} · {} · match threshold {}_\n\n",
        report.analysis_id,
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.threshold
    ));

    out.push_str("## Resume Skills\n\n");
    out.push_str(&skill_line(&report.resume_skills));

    out.push_str("## Job Description Skills\n\n");
    out.push_str(&skill_line(&report.jd_skills));

    out.push_str("## Missing Skills\n\n");
    if report.missing_skills.is_empty() {
        out.push_str(NO_GAPS);
        out.push_str("\n\n");
    } else {
        out.push_str("| Skill | Best match | Score |\n|---|---|---|\n");
        for m in report.matches.iter().filter(|m| !m.covered) {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(m.skill.display()),
                m.best_match.as_deref().map(escape_cell).unwrap_or_else(|| "—".to_string()),
                m.best_score
            ));
        }
        out.push('\n');
    }

    if !report.roadmap.is_empty() {
        out.push_str("## Learning Roadmap\n\n");
        for entry in report.roadmap.iter() {
            out.push_str(&format!("### {}\n\n", entry.skill));
            for line in entry.plan.lines().filter(|l| !l.trim().is_empty()) {
                out.push_str(&format!("- {}\n", line.trim()));
            }
            out.push('\n');
        }
    }

    if !report.job_description.trim().is_empty() {
        out.push_str("## Full Job Description\n\n");
        out.push_str(report.job_description.trim());
        out.push('\n');
    }

    out
}

fn skill_line(skills: &SkillList) -> String {
    if skills.is_empty() {
        format!("{NO_SKILLS}\n\n")
    } else {
        format!("{}\n\n", skills.displays().join(", "))
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
