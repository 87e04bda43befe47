use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::llm_client::prompts::truncate_chars;
use crate::models::analysis::{NewAnalysis, ResumeAnalysisRow};
use crate::models::interview::InterviewSessionRow;
use crate::models::user::User;
use crate::store::{Store, STORED_TEXT_LIMIT};

/// PostgreSQL-backed store. `$n IS NULL OR user_email = $n` lets one query
/// serve both the per-user and the all-users case.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE
                SET name = COALESCE(EXCLUDED.name, users.name)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    async fn insert_analysis(
        &self,
        analysis: NewAnalysis<'_>,
    ) -> Result<ResumeAnalysisRow, sqlx::Error> {
        let row = sqlx::query_as::<_, ResumeAnalysisRow>(
            r#"
            INSERT INTO resume_analysis (user_email, resume_text, score, feedback, file_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(analysis.user_email)
        .bind(truncate_chars(analysis.resume_text, STORED_TEXT_LIMIT))
        .bind(analysis.score)
        .bind(analysis.feedback)
        .bind(analysis.file_url)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted resume analysis {} for {}", row.id, row.user_email);
        Ok(row)
    }

    async fn get_analysis(&self, id: i64) -> Result<Option<ResumeAnalysisRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeAnalysisRow>("SELECT * FROM resume_analysis WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_analyses(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<ResumeAnalysisRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeAnalysisRow>(
            r#"
            SELECT * FROM resume_analysis
            WHERE $1::text IS NULL OR user_email = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    async fn latest_analysis(
        &self,
        email: Option<&str>,
    ) -> Result<Option<ResumeAnalysisRow>, sqlx::Error> {
        sqlx::query_as::<_, ResumeAnalysisRow>(
            r#"
            SELECT * FROM resume_analysis
            WHERE $1::text IS NULL OR user_email = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn count_analyses(&self, email: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM resume_analysis WHERE $1::text IS NULL OR user_email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }

    async fn create_session(
        &self,
        email: &str,
        job_description: &str,
        question: &str,
    ) -> Result<InterviewSessionRow, sqlx::Error> {
        let row = sqlx::query_as::<_, InterviewSessionRow>(
            r#"
            INSERT INTO interview_sessions (user_email, job_description, question)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(job_description)
        .bind(question)
        .fetch_one(&self.pool)
        .await?;

        info!("Created interview session {} for {}", row.id, row.user_email);
        Ok(row)
    }

    async fn get_session(&self, id: i64) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        sqlx::query_as::<_, InterviewSessionRow>("SELECT * FROM interview_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn find_pending_session(
        &self,
        email: &str,
        session_id: Option<i64>,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        sqlx::query_as::<_, InterviewSessionRow>(
            r#"
            SELECT * FROM interview_sessions
            WHERE user_email = $1
              AND answer IS NULL
              AND ($2::bigint IS NULL OR id = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn complete_session(
        &self,
        id: i64,
        email: &str,
        answer: &str,
        feedback: &str,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        // Guarded by `answer IS NULL`: only the first concurrent submission wins.
        sqlx::query_as::<_, InterviewSessionRow>(
            r#"
            UPDATE interview_sessions
            SET answer = $3, feedback = $4
            WHERE id = $1 AND user_email = $2 AND answer IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(answer)
        .bind(feedback)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_sessions(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<InterviewSessionRow>, sqlx::Error> {
        sqlx::query_as::<_, InterviewSessionRow>(
            r#"
            SELECT * FROM interview_sessions
            WHERE $1::text IS NULL OR user_email = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    async fn latest_session(
        &self,
        email: Option<&str>,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        sqlx::query_as::<_, InterviewSessionRow>(
            r#"
            SELECT * FROM interview_sessions
            WHERE $1::text IS NULL OR user_email = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn count_sessions(&self, email: Option<&str>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM interview_sessions WHERE $1::text IS NULL OR user_email = $1",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
    }
}
