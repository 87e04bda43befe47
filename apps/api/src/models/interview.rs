use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A mock-interview session: created with a question, answered at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct InterviewSessionRow {
    pub id: i64,
    pub user_email: String,
    pub job_description: String,
    pub question: String,
    pub answer: Option<String>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InterviewSessionRow {
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}
