use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored resume analysis. Rows are insert-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeAnalysisRow {
    pub id: i64,
    pub user_email: String,
    pub resume_text: String,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values for a new `resume_analysis` row.
#[derive(Debug, Clone)]
pub struct NewAnalysis<'a> {
    pub user_email: &'a str,
    pub resume_text: &'a str,
    pub score: Option<i32>,
    pub feedback: &'a str,
    pub file_url: Option<&'a str>,
}
