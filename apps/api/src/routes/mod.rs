pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze/report", post(handlers::handle_report))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::pipeline::SkillGapAnalyzer;
    use crate::config::{Config, LlmConfig, LlmProvider};
    use crate::llm_client::testing::{service_down, StubGenerator};
    use crate::llm_client::LlmError;
    use crate::report::MarkdownReportRenderer;

    const BOUNDARY: &str = "skillfit-test-boundary";
    const RESUME: &str = "Backend developer: Python programming, SQL tuning.";
    const JD: &str = "Looking for Python, SQL and Docker experience.";

    fn scripted(prompt: &str) -> Result<String, LlmError> {
        if prompt.contains(RESUME) {
            Ok("python programming, sql".to_string())
        } else if prompt.contains(JD) {
            Ok("Python, SQL, Docker".to_string())
        } else if prompt.contains("'Docker'") {
            Ok("1. Basics\n2. Course\n3. Project\n4. Portfolio".to_string())
        } else {
            Err(service_down())
        }
    }

    fn test_state() -> AppState {
        let config = Config {
            llm: LlmConfig {
                provider: LlmProvider::Anthropic,
                api_key: "test".to_string(),
                model: "test-model".to_string(),
                timeout: Duration::from_secs(1),
                api_url: None,
            },
            match_threshold: 70,
            roadmap_concurrency: 2,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "info".to_string(),
        };
        let llm = Arc::new(StubGenerator::new(scripted));
        AppState {
            analyzer: Arc::new(SkillGapAnalyzer::new(
                llm,
                config.match_threshold,
                config.roadmap_concurrency,
            )),
            renderer: Arc::new(MarkdownReportRenderer),
            config,
        }
    }

    fn multipart_body(resume: Option<(&str, &[u8])>, jd_text: Option<&str>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some((file_name, bytes)) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        if let Some(text) = jd_text {
            body.extend_from_slice(
                format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"jd_text\"\r\n\r\n{text}\r\n")
                    .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_report_json() {
        let body = multipart_body(Some(("resume.txt", RESUME.as_bytes())), Some(JD));
        let response = build_router(test_state())
            .oneshot(post("/api/v1/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["missing_skills"], serde_json::json!(["Docker"]));
        assert_eq!(json["jd_skills"], serde_json::json!(["Python", "SQL", "Docker"]));
        assert!(json["roadmap"]["Docker"].as_str().unwrap().starts_with("1. Basics"));
        assert_eq!(json["job_description"], JD);
    }

    #[tokio::test]
    async fn test_report_is_markdown_attachment() {
        let body = multipart_body(Some(("resume.md", RESUME.as_bytes())), Some(JD));
        let response = build_router(test_state())
            .oneshot(post("/api/v1/analyze/report", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.contains("career_report.md"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("# SkillFit Career Report"));
        assert!(text.contains("### Docker"));
    }

    #[tokio::test]
    async fn test_missing_resume_is_400() {
        let body = multipart_body(None, Some(JD));
        let response = build_router(test_state())
            .oneshot(post("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_blank_job_description_is_400() {
        let body = multipart_body(Some(("resume.txt", RESUME.as_bytes())), Some("   "));
        let response = build_router(test_state())
            .oneshot(post("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_422() {
        let body = multipart_body(Some(("resume.pdf", &b"definitely not a pdf"[..])), Some(JD));
        let response = build_router(test_state())
            .oneshot(post("/api/v1/analyze", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "MALFORMED_INPUT");
    }
}
