//! Axum route handler for the Analysis API.

use std::collections::BTreeMap;

use axum::extract::{multipart::Field, Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::SkillProfile;
use crate::analysis::pipeline::SkillAnalyzer;
use crate::errors::AppError;
use crate::sources::ProfileLinks;
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub profile: SkillProfile,
    /// Skill → weight (High=3, Medium=2, Low=1) for word-cloud rendering.
    pub skill_weights: BTreeMap<String, u32>,
}

struct UploadedFile {
    content_type: Option<String>,
    data: Bytes,
}

#[derive(Default)]
struct AnalyzeForm {
    cv_file: Option<UploadedFile>,
    links: ProfileLinks,
}

/// POST /analyze/
///
/// Multipart form: `cv_file` (PDF, required), and optional `github_user`,
/// `huggingface_user` (or `hf_user`), `portfolio_url`, `instagram_user`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let model = state.llm.clone().ok_or(AppError::MissingConfiguration)?;

    let AnalyzeForm { cv_file, links } = read_form(multipart).await?;
    let cv_file =
        cv_file.ok_or_else(|| AppError::Validation("cv_file is required".to_string()))?;
    if !is_pdf(cv_file.content_type.as_deref()) {
        return Err(AppError::InvalidFileType);
    }

    let analyzer = SkillAnalyzer::new(
        state.fetcher.clone(),
        model,
        state.config.summary_failure_policy,
        state.config.request_timeout,
    );

    let request_id = Uuid::new_v4();
    let span = info_span!("analyze", %request_id);
    let document = cv_file.data;
    let profile = async {
        info!(
            "Analyzing CV ({} bytes) with {} profile references",
            document.len(),
            links.references().len()
        );
        analyzer.analyze(document, &links).await
    }
    .instrument(span)
    .await?;

    let skill_weights = profile.skill_weights();
    Ok(Json(AnalyzeResponse {
        profile,
        skill_weights,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalyzeForm, AppError> {
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "cv_file" => {
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid cv_file: {e}")))?;
                form.cv_file = Some(UploadedFile { content_type, data });
            }
            "github_user" => form.links.github_user = text_value(field).await?,
            "huggingface_user" | "hf_user" => form.links.huggingface_user = text_value(field).await?,
            "portfolio_url" => form.links.portfolio_url = text_value(field).await?,
            "instagram_user" => form.links.instagram_user = text_value(field).await?,
            _ => {}
        }
    }

    Ok(form)
}

async fn text_value(field: Field<'_>) -> Result<Option<String>, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    let value = field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid {name}: {e}")))?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Compares the MIME essence, ignoring parameters and case.
fn is_pdf(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::build_router;
    use crate::test_support::{
        multipart_request, single_page_pdf, test_state, FakeFetcher, FakeModel, Part,
    };

    async fn send(state: AppState, parts: &[Part<'_>]) -> (StatusCode, serde_json::Value) {
        let response = build_router(state)
            .oneshot(multipart_request("/analyze/", parts))
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Some("application/pdf")));
        assert!(is_pdf(Some("Application/PDF; name=cv.pdf")));
        assert!(!is_pdf(Some("text/plain")));
        assert!(!is_pdf(Some("application/pdfx")));
        assert!(!is_pdf(None));
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected_before_any_external_call() {
        let fetcher = Arc::new(FakeFetcher::default());
        let model = Arc::new(FakeModel::replying(&["unused"]));
        let state = test_state(fetcher.clone(), Some(model.clone()));

        let (status, body) = send(
            state,
            &[
                Part {
                    name: "cv_file",
                    content_type: Some("text/plain"),
                    data: b"Jane Doe, engineer",
                },
                Part {
                    name: "github_user",
                    content_type: None,
                    data: b"janedoe",
                },
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_FILE_TYPE");
        assert!(fetcher.fetched_urls().is_empty());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_server_error() {
        let fetcher = Arc::new(FakeFetcher::default());
        let state = test_state(fetcher.clone(), None);

        let (status, body) = send(
            state,
            &[Part {
                name: "cv_file",
                content_type: Some("application/pdf"),
                data: b"%PDF-1.4",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MISSING_CONFIGURATION");
        assert!(fetcher.fetched_urls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_cv_file_is_validation_error() {
        let state = test_state(
            Arc::new(FakeFetcher::default()),
            Some(Arc::new(FakeModel::replying(&["unused"]))),
        );

        let (status, body) = send(
            state,
            &[Part {
                name: "hf_user",
                content_type: None,
                data: b"janedoe",
            }],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_invalid_document() {
        let fetcher = Arc::new(FakeFetcher::default());
        let model = Arc::new(FakeModel::replying(&["unused"]));
        let state = test_state(fetcher.clone(), Some(model.clone()));

        let (status, body) = send(
            state,
            &[
                Part {
                    name: "cv_file",
                    content_type: Some("application/pdf"),
                    data: b"this is not really a pdf",
                },
                Part {
                    name: "instagram_user",
                    content_type: None,
                    data: b"janedoe",
                },
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DOCUMENT");
        assert!(fetcher.fetched_urls().is_empty());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_pdf_returns_profile_and_weights() {
        let fetcher = Arc::new(FakeFetcher::default());
        let model = Arc::new(FakeModel::replying(&[
            "Here you go:\n```json\n{\"professional_summary\": \"Backend engineer\", \"technical_skills\": [{\"skill\": \"Rust\", \"confidence\": \"High\", \"evidence\": \"CV\"}], \"soft_skills\": [{\"skill\": \"Mentoring\", \"confidence\": \"Low\", \"evidence\": \"CV\"}], \"tools_and_technologies\": [{\"skill\": \"Docker\", \"confidence\": \"Medium\", \"evidence\": \"CV\"}]}\n```",
        ]));
        let state = test_state(fetcher.clone(), Some(model.clone()));
        let pdf = single_page_pdf("Jane Doe Rust engineer");

        let (status, body) = send(
            state,
            &[Part {
                name: "cv_file",
                content_type: Some("application/pdf"),
                data: &pdf,
            }],
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["professional_summary"], "Backend engineer");
        assert_eq!(body["technical_skills"][0]["skill"], "Rust");
        assert_eq!(body["skill_weights"]["Rust"], 3);
        assert_eq!(body["skill_weights"]["Docker"], 2);
        assert!(body["skill_weights"].get("Mentoring").is_none());
        assert_eq!(body["soft_skills"][0]["skill"], "Mentoring");
        assert!(fetcher.fetched_urls().is_empty());

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].parts[1].contains("Jane Doe Rust engineer"));
    }

    #[test]
    fn test_response_flattens_profile() {
        let profile: SkillProfile = serde_json::from_str(
            r#"{"professional_summary": "X", "technical_skills": [{"skill": "Rust", "confidence": "High", "evidence": "CV"}]}"#,
        )
        .unwrap();
        let skill_weights = profile.skill_weights();
        let value = serde_json::to_value(AnalyzeResponse {
            profile,
            skill_weights,
        })
        .unwrap();

        assert_eq!(value["professional_summary"], "X");
        assert_eq!(value["technical_skills"][0]["skill"], "Rust");
        assert_eq!(value["skill_weights"]["Rust"], 3);
        assert!(value["soft_skills"].as_array().unwrap().is_empty());
    }
}
