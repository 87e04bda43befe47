//! Axum route handlers for the resume analysis API.

use axum::{
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::analysis::pipeline::{analyze_resume, AnalyzeInput, AnalyzeResponse, ResumeSource};
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysisRow;
use crate::routes::EmailQuery;
use crate::state::AppState;

const MISSING_INPUT: &str = "Missing resume text or user email.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJsonRequest {
    pub resume_text: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

/// POST /api/analyze
///
/// Accepts either JSON `{resumeText, userEmail}` or multipart `{file, userEmail}`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let input = if is_multipart(&request) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;
        read_multipart(multipart).await?
    } else {
        let Json(body) = Json::<AnalyzeJsonRequest>::from_request(request, &state)
            .await
            .map_err(|e| rejection_error(e.status(), e.body_text()))?;
        input_from_json(body)?
    };

    let response = analyze_resume(&state, input).await?;
    Ok(Json(response))
}

/// GET /api/analyses?email=
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<ResumeAnalysisRow>>, AppError> {
    Ok(Json(state.store.list_analyses(query.email()).await?))
}

/// GET /api/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResumeAnalysisRow>, AppError> {
    let row = state
        .store
        .get_analysis(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(row))
}

/// Body-limit rejections keep their 413; everything else is a bad request.
fn rejection_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn input_from_json(body: AnalyzeJsonRequest) -> Result<AnalyzeInput, AppError> {
    let (Some(resume_text), Some(user_email)) =
        (non_blank(body.resume_text), non_blank(body.user_email))
    else {
        return Err(AppError::Validation(MISSING_INPUT.to_string()));
    };

    Ok(AnalyzeInput {
        user_email,
        user_name: non_blank(body.user_name),
        source: ResumeSource::Text(resume_text),
    })
}

async fn read_multipart(mut multipart: Multipart) -> Result<AnalyzeInput, AppError> {
    let mut user_email = None;
    let mut user_name = None;
    let mut resume_text = None;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| rejection_error(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| rejection_error(e.status(), e.body_text()))?;
                if !bytes.is_empty() {
                    upload = Some(ResumeSource::Upload { file_name, bytes });
                }
            }
            "userEmail" | "userName" | "resumeText" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| rejection_error(e.status(), e.body_text()))?;
                match name.as_str() {
                    "userEmail" => user_email = non_blank(Some(value)),
                    "userName" => user_name = non_blank(Some(value)),
                    _ => resume_text = non_blank(Some(value)),
                }
            }
            _ => {}
        }
    }

    let source = upload.or(resume_text.map(ResumeSource::Text));
    let (Some(source), Some(user_email)) = (source, user_email) else {
        return Err(AppError::Validation(
            "Missing resume file or user email.".to_string(),
        ));
    };

    Ok(AnalyzeInput {
        user_email,
        user_name,
        source,
    })
}
