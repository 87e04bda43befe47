use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::dashboard::aggregator::{build_report, DashboardReport};
use crate::errors::AppError;
use crate::models::analysis::ResumeAnalysisRow;
use crate::models::interview::InterviewSessionRow;
use crate::routes::EmailQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_resumes: i64,
    pub total_interviews: i64,
    pub latest_resume: Option<ResumeAnalysisRow>,
    pub latest_interview: Option<InterviewSessionRow>,
}

/// GET /api/dashboard?email=
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<DashboardReport>, AppError> {
    let email = query.email();
    let (analyses, sessions) = tokio::try_join!(
        state.store.list_analyses(email),
        state.store.list_sessions(email),
    )?;

    Ok(Json(build_report(analyses, sessions)))
}

/// GET /api/dashboard/summary?email=
///
/// Counts and latest rows only, without loading full histories.
pub async fn handle_dashboard_summary(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let email = query.email();
    let (total_resumes, total_interviews, latest_resume, latest_interview) = tokio::try_join!(
        state.store.count_analyses(email),
        state.store.count_sessions(email),
        state.store.latest_analysis(email),
        state.store.latest_session(email),
    )?;

    Ok(Json(DashboardSummary {
        total_resumes,
        total_interviews,
        latest_resume,
        latest_interview,
    }))
}
