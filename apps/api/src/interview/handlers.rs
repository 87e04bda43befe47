//! Axum route handlers for the interview coach API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::flow::{ask_question, evaluate_answer, InterviewReply};
use crate::models::interview::InterviewSessionRow;
use crate::routes::EmailQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub job_description: Option<String>,
    pub user_email: Option<String>,
    /// Absent, empty and whitespace-only all mean "no answer yet".
    pub user_answer: Option<String>,
    pub session_id: Option<i64>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /api/interview
///
/// Without `userAnswer`: generates a question. With it: returns feedback.
pub async fn handle_interview(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewReply>, AppError> {
    let email = non_blank(request.user_email.as_deref())
        .ok_or_else(|| AppError::Validation("userEmail is required".to_string()))?;

    let reply = match non_blank(request.user_answer.as_deref()) {
        None => {
            let job_description = non_blank(request.job_description.as_deref())
                .ok_or_else(|| AppError::Validation("jobDescription is required".to_string()))?;
            ask_question(
                state.store.as_ref(),
                state.llm.as_ref(),
                email,
                job_description,
            )
            .await?
        }
        Some(answer) => {
            evaluate_answer(
                state.store.as_ref(),
                state.llm.as_ref(),
                email,
                answer,
                request.session_id,
            )
            .await?
        }
    };

    Ok(Json(reply))
}

/// GET /api/interview/history?email=
///
/// Sessions newest first.
pub async fn handle_interview_history(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<InterviewSessionRow>>, AppError> {
    let mut sessions = state.store.list_sessions(query.email()).await?;
    sessions.reverse();
    Ok(Json(sessions))
}

/// GET /api/interview/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<InterviewSessionRow>, AppError> {
    let session = state
        .store
        .get_session(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview session {id} not found")))?;
    Ok(Json(session))
}
