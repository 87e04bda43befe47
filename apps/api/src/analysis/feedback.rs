use crate::analysis::heuristic::HeuristicReport;
use crate::analysis::prompts::{NO_FEEDBACK_FALLBACK, RESUME_REVIEW_PROMPT, RESUME_REVIEW_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{content_or, fill_template, truncate_chars};
use crate::llm_client::ChatModel;

/// Maximum number of resume characters sent to the model.
pub const PROMPT_TEXT_LIMIT: usize = 6_000;

pub fn build_review_prompt(resume_text: &str, report: &HeuristicReport) -> String {
    let tips = if report.tips.is_empty() {
        "- none".to_string()
    } else {
        report
            .tips
            .iter()
            .map(|t| format!("- {t}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let score = report.score.to_string();
    fill_template(
        RESUME_REVIEW_PROMPT,
        &[
            ("score", score.as_str()),
            ("tips", tips.as_str()),
            ("resume_text", truncate_chars(resume_text, PROMPT_TEXT_LIMIT)),
        ],
    )
}

/// Asks the model for free-text resume feedback.
pub async fn request_feedback(
    llm: &dyn ChatModel,
    resume_text: &str,
    report: &HeuristicReport,
) -> Result<String, AppError> {
    let prompt = build_review_prompt(resume_text, report);
    let content = llm
        .complete(Some(RESUME_REVIEW_SYSTEM), &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Resume feedback failed: {e}")))?;

    Ok(content_or(content, NO_FEEDBACK_FALLBACK))
}
