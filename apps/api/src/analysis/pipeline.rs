use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::feedback::request_feedback;
use crate::analysis::heuristic::score_resume;
use crate::errors::AppError;
use crate::models::analysis::NewAnalysis;
use crate::state::AppState;

/// Where the resume text comes from.
pub enum ResumeSource {
    Text(String),
    Upload { file_name: String, bytes: Bytes },
}

pub struct AnalyzeInput {
    pub user_email: String,
    pub user_name: Option<String>,
    pub source: ResumeSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub message: String,
    pub id: i64,
    pub score: u32,
    pub tips: Vec<String>,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Full analysis: extract → heuristic score → model feedback → (upload) → persist.
/// Any failing step fails the whole request; nothing is stored partially.
pub async fn analyze_resume(
    state: &AppState,
    input: AnalyzeInput,
) -> Result<AnalyzeResponse, AppError> {
    let AnalyzeInput {
        user_email,
        user_name,
        source,
    } = input;

    let (resume_text, upload) = match source {
        ResumeSource::Text(text) => (text.trim().to_string(), None),
        ResumeSource::Upload { file_name, bytes } => {
            let extracted = state.extractor.extract(&file_name, bytes.clone()).await?;
            if extracted.used_ocr {
                info!("Resume {file_name} for {user_email} was read via OCR");
            }
            (extracted.text, Some((extracted.kind, bytes)))
        }
    };

    if resume_text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No readable text found in the resume".to_string(),
        ));
    }

    let report = score_resume(&resume_text);
    info!(
        "Heuristic score {} for {} ({} words)",
        report.score, user_email, report.word_count
    );

    let feedback = request_feedback(state.llm.as_ref(), &resume_text, &report).await?;

    let file_url = match (&state.uploads, upload) {
        (Some(uploads), Some((kind, bytes))) => Some(uploads.put_resume(kind, bytes).await?),
        _ => None,
    };

    state
        .store
        .upsert_user(&user_email, user_name.as_deref())
        .await?;

    let row = state
        .store
        .insert_analysis(NewAnalysis {
            user_email: &user_email,
            resume_text: &resume_text,
            score: Some(report.score as i32),
            feedback: &feedback,
            file_url: file_url.as_deref(),
        })
        .await?;

    Ok(AnalyzeResponse {
        success: true,
        message: "Resume analyzed successfully!".to_string(),
        id: row.id,
        score: report.score,
        tips: report.tips,
        feedback,
        file_url,
    })
}
