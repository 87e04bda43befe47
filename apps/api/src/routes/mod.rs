pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::analysis::handlers as analysis;
use crate::dashboard::handlers as dashboard;
use crate::interview::handlers as interview;
use crate::state::AppState;

/// `?email=` filter shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// Blank `?email=` is treated as "all users".
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route("/api/analyze", post(analysis::handle_analyze))
        .route("/api/analyses", get(analysis::handle_list_analyses))
        .route("/api/analyses/:id", get(analysis::handle_get_analysis))
        // Interview coach
        .route("/api/interview", post(interview::handle_interview))
        .route(
            "/api/interview/history",
            get(interview::handle_interview_history),
        )
        .route(
            "/api/interview/sessions/:id",
            get(interview::handle_get_session),
        )
        // Dashboard
        .route("/api/dashboard", get(dashboard::handle_dashboard))
        .route(
            "/api/dashboard/summary",
            get(dashboard::handle_dashboard_summary),
        )
        .with_state(state)
}
