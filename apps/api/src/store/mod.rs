//! Persistence gateway. Handlers hold an `Arc<dyn Store>`; production uses
//! `PgStore`, tests use the in-memory store.
//!
//! Listing queries return rows oldest first. An `email` of `None` means
//! "all users".

use async_trait::async_trait;

use crate::models::analysis::{NewAnalysis, ResumeAnalysisRow};
use crate::models::interview::InterviewSessionRow;
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Maximum number of resume characters persisted per analysis.
pub const STORED_TEXT_LIMIT: usize = 10_000;

#[async_trait]
pub trait Store: Send + Sync {
    /// Creates the user on first sight; a non-null `name` overwrites the stored one.
    async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<User, sqlx::Error>;

    async fn insert_analysis(
        &self,
        analysis: NewAnalysis<'_>,
    ) -> Result<ResumeAnalysisRow, sqlx::Error>;

    async fn get_analysis(&self, id: i64) -> Result<Option<ResumeAnalysisRow>, sqlx::Error>;

    async fn list_analyses(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<ResumeAnalysisRow>, sqlx::Error>;

    async fn latest_analysis(
        &self,
        email: Option<&str>,
    ) -> Result<Option<ResumeAnalysisRow>, sqlx::Error>;

    async fn count_analyses(&self, email: Option<&str>) -> Result<i64, sqlx::Error>;

    async fn create_session(
        &self,
        email: &str,
        job_description: &str,
        question: &str,
    ) -> Result<InterviewSessionRow, sqlx::Error>;

    async fn get_session(&self, id: i64) -> Result<Option<InterviewSessionRow>, sqlx::Error>;

    /// The unanswered session to attach an answer to: the given id when
    /// present, else the most recent unanswered session for `email`.
    async fn find_pending_session(
        &self,
        email: &str,
        session_id: Option<i64>,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error>;

    /// Records the answer and feedback. Returns `None` when the session was
    /// already answered (or does not belong to `email`).
    async fn complete_session(
        &self,
        id: i64,
        email: &str,
        answer: &str,
        feedback: &str,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error>;

    async fn list_sessions(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<InterviewSessionRow>, sqlx::Error>;

    async fn latest_session(
        &self,
        email: Option<&str>,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error>;

    async fn count_sessions(&self, email: Option<&str>) -> Result<i64, sqlx::Error>;
}
