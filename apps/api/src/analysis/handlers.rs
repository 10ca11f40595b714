//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;

use crate::document::extract_text;
use crate::errors::AppError;
use crate::report::AnalysisReport;
use crate::state::AppState;

/// Multipart body shared by both analysis endpoints:
/// `resume` (file) and `jd_text` (text field).
struct AnalyzeForm {
    resume_name: String,
    resume: Bytes,
    jd_text: String,
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                resume = Some((file_name, data));
            }
            Some("jd_text") => {
                let text = field.text().await.map_err(|e| {
                    AppError::MalformedInput(format!("jd_text is not valid text: {e}"))
                })?;
                jd_text = Some(text);
            }
            _ => {}
        }
    }

    let (resume_name, resume) = resume
        .ok_or_else(|| AppError::Validation("Please upload your resume".to_string()))?;
    let jd_text = jd_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Please paste a job description".to_string()))?;

    Ok(AnalyzeForm {
        resume_name,
        resume,
        jd_text,
    })
}

/// Reads the form, extracts resume text off the async runtime and runs the
/// pipeline.
async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<AnalysisReport, AppError> {
    let form = read_form(multipart).await?;

    let AnalyzeForm {
        resume_name,
        resume,
        jd_text,
    } = form;
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&resume, &resume_name))
        .await
        .map_err(|e| AppError::MalformedInput(format!("Resume could not be parsed: {e}")))??;

    state.analyzer.analyze(&resume_text, &jd_text).await
}

/// POST /api/v1/analyze
///
/// Returns the full analysis as JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = run_analysis(&state, multipart).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/report
///
/// Same input as `/analyze`; returns the rendered report as a download.
pub async fn handle_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let report = run_analysis(&state, multipart).await?;
    let rendered = state.renderer.render(&report)?;

    let disposition = format!("attachment; filename=\"{}\"", rendered.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.body,
    )
        .into_response())
}
