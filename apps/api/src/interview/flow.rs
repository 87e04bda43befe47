//! Two-state interview flow.
//!
//! QUESTION: job description → one generated question, stored as a new session.
//! FEEDBACK: answer → evaluation of the stored question, written back to that
//! same session exactly once.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::interview::prompts::{
    FALLBACK_QUESTION, FEEDBACK_PROMPT, NO_FEEDBACK_FALLBACK, QUESTION_PROMPT,
};
use crate::llm_client::prompts::{content_or, fill_template, truncate_chars};
use crate::llm_client::ChatModel;
use crate::store::Store;

const JOB_DESCRIPTION_LIMIT: usize = 6_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum InterviewReply {
    #[serde(rename = "question", rename_all = "camelCase")]
    Question { question: String, session_id: i64 },
    #[serde(rename = "feedback", rename_all = "camelCase")]
    Feedback { feedback: String, session_id: i64 },
}

pub async fn ask_question(
    store: &dyn Store,
    llm: &dyn ChatModel,
    email: &str,
    job_description: &str,
) -> Result<InterviewReply, AppError> {
    let prompt = fill_template(
        QUESTION_PROMPT,
        &[(
            "job_description",
            truncate_chars(job_description, JOB_DESCRIPTION_LIMIT),
        )],
    );
    let content = llm
        .complete(None, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Interview question generation failed: {e}")))?;
    let question = content_or(content, FALLBACK_QUESTION);

    store.upsert_user(email, None).await?;
    let session = store
        .create_session(email, job_description, &question)
        .await?;

    Ok(InterviewReply::Question {
        question,
        session_id: session.id,
    })
}

pub async fn evaluate_answer(
    store: &dyn Store,
    llm: &dyn ChatModel,
    email: &str,
    answer: &str,
    session_id: Option<i64>,
) -> Result<InterviewReply, AppError> {
    let Some(session) = store.find_pending_session(email, session_id).await? else {
        return Err(missing_session_error(store, email, session_id).await?);
    };

    let prompt = fill_template(
        FEEDBACK_PROMPT,
        &[
            (
                "job_description",
                truncate_chars(&session.job_description, JOB_DESCRIPTION_LIMIT),
            ),
            ("question", session.question.as_str()),
            ("answer", answer),
        ],
    );
    let content = llm
        .complete(None, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Interview feedback failed: {e}")))?;
    let feedback = content_or(content, NO_FEEDBACK_FALLBACK);

    let Some(completed) = store
        .complete_session(session.id, email, answer, &feedback)
        .await?
    else {
        warn!("Interview session {} was answered concurrently", session.id);
        return Err(AppError::Conflict(format!(
            "Interview session {} has already been answered",
            session.id
        )));
    };

    info!("Recorded answer for interview session {}", completed.id);
    Ok(InterviewReply::Feedback {
        feedback,
        session_id: completed.id,
    })
}

/// Distinguishes "already answered" (409) from "no such session" (404).
async fn missing_session_error(
    store: &dyn Store,
    email: &str,
    session_id: Option<i64>,
) -> Result<AppError, AppError> {
    let Some(id) = session_id else {
        return Ok(AppError::NotFound(format!(
            "No unanswered interview session for {email}"
        )));
    };

    match store.get_session(id).await? {
        Some(session) if session.user_email == email && session.is_answered() => Ok(
            AppError::Conflict(format!("Interview session {id} has already been answered")),
        ),
        _ => Ok(AppError::NotFound(format!(
            "No unanswered interview session {id} for {email}"
        ))),
    }
}
