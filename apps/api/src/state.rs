use std::sync::Arc;

use crate::analysis::pipeline::SkillGapAnalyzer;
use crate::config::Config;
use crate::report::ReportRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; nothing in here is mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SkillGapAnalyzer>,
    /// Pluggable report renderer. Default: MarkdownReportRenderer.
    pub renderer: Arc<dyn ReportRenderer>,
    pub config: Config,
}
