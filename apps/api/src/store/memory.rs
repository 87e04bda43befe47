use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::llm_client::prompts::truncate_chars;
use crate::models::analysis::{NewAnalysis, ResumeAnalysisRow};
use crate::models::interview::InterviewSessionRow;
use crate::models::user::User;
use crate::store::{Store, STORED_TEXT_LIMIT};

/// In-memory `Store` for tests. Rows keep insertion order, which is also
/// `created_at` order.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    analyses: Vec<ResumeAnalysisRow>,
    sessions: Vec<InterviewSessionRow>,
}

fn matches_email(row_email: &str, email: Option<&str>) -> bool {
    email.map_or(true, |e| e == row_email)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts every session's `created_at` so the dashboard can be tested
    /// against realistic spacing. `offsets_days[i]` applies to the i-th session.
    pub fn backdate_sessions(&self, offsets_days: &[i64]) {
        let mut tables = self.inner.lock().unwrap();
        let now = Utc::now();
        for (session, days) in tables.sessions.iter_mut().zip(offsets_days) {
            session.created_at = now - Duration::days(*days);
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<User, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.email == email) {
            if let Some(name) = name {
                user.name = Some(name.to_string());
            }
            return Ok(user.clone());
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn insert_analysis(
        &self,
        analysis: NewAnalysis<'_>,
    ) -> Result<ResumeAnalysisRow, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let row = ResumeAnalysisRow {
            id: tables.analyses.len() as i64 + 1,
            user_email: analysis.user_email.to_string(),
            resume_text: truncate_chars(analysis.resume_text, STORED_TEXT_LIMIT).to_string(),
            score: analysis.score,
            feedback: Some(analysis.feedback.to_string()),
            file_url: analysis.file_url.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.analyses.push(row.clone());
        Ok(row)
    }

    async fn get_analysis(&self, id: i64) -> Result<Option<ResumeAnalysisRow>, sqlx::Error> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.analyses.iter().find(|a| a.id == id).cloned())
    }

    async fn list_analyses(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<ResumeAnalysisRow>, sqlx::Error> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .analyses
            .iter()
            .filter(|a| matches_email(&a.user_email, email))
            .cloned()
            .collect())
    }

    async fn latest_analysis(
        &self,
        email: Option<&str>,
    ) -> Result<Option<ResumeAnalysisRow>, sqlx::Error> {
        Ok(self.list_analyses(email).await?.pop())
    }

    async fn count_analyses(&self, email: Option<&str>) -> Result<i64, sqlx::Error> {
        Ok(self.list_analyses(email).await?.len() as i64)
    }

    async fn create_session(
        &self,
        email: &str,
        job_description: &str,
        question: &str,
    ) -> Result<InterviewSessionRow, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let row = InterviewSessionRow {
            id: tables.sessions.len() as i64 + 1,
            user_email: email.to_string(),
            job_description: job_description.to_string(),
            question: question.to_string(),
            answer: None,
            feedback: None,
            created_at: Utc::now(),
        };
        tables.sessions.push(row.clone());
        Ok(row)
    }

    async fn get_session(&self, id: i64) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        let tables = self.inner.lock().unwrap();
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn find_pending_session(
        &self,
        email: &str,
        session_id: Option<i64>,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .sessions
            .iter()
            .rev()
            .find(|s| {
                s.user_email == email
                    && !s.is_answered()
                    && session_id.map_or(true, |id| s.id == id)
            })
            .cloned())
    }

    async fn complete_session(
        &self,
        id: i64,
        email: &str,
        answer: &str,
        feedback: &str,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        let mut tables = self.inner.lock().unwrap();
        let Some(session) = tables
            .sessions
            .iter_mut()
            .find(|s| s.id == id && s.user_email == email && !s.is_answered())
        else {
            return Ok(None);
        };
        session.answer = Some(answer.to_string());
        session.feedback = Some(feedback.to_string());
        Ok(Some(session.clone()))
    }

    async fn list_sessions(
        &self,
        email: Option<&str>,
    ) -> Result<Vec<InterviewSessionRow>, sqlx::Error> {
        let tables = self.inner.lock().unwrap();
        Ok(tables
            .sessions
            .iter()
            .filter(|s| matches_email(&s.user_email, email))
            .cloned()
            .collect())
    }

    async fn latest_session(
        &self,
        email: Option<&str>,
    ) -> Result<Option<InterviewSessionRow>, sqlx::Error> {
        Ok(self.list_sessions(email).await?.pop())
    }

    async fn count_sessions(&self, email: Option<&str>) -> Result<i64, sqlx::Error> {
        Ok(self.list_sessions(email).await?.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stored_text_is_truncated() {
        let store = MemoryStore::new();
        let text = "r".repeat(STORED_TEXT_LIMIT + 10);
        let row = store
            .insert_analysis(NewAnalysis {
                user_email: "a@b.c",
                resume_text: &text,
                score: Some(50),
                feedback: "ok",
                file_url: None,
            })
            .await
            .unwrap();
        assert_eq!(row.resume_text.chars().count(), STORED_TEXT_LIMIT);
    }

    #[tokio::test]
    async fn test_upsert_user_keeps_name_when_none() {
        let store = MemoryStore::new();
        let first = store.upsert_user("a@b.c", Some("Ada")).await.unwrap();
        let second = store.upsert_user("a@b.c", None).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_complete_session_only_once() {
        let store = MemoryStore::new();
        let session = store.create_session("a@b.c", "jd", "q").await.unwrap();

        let first = store
            .complete_session(session.id, "a@b.c", "answer", "fb")
            .await
            .unwrap();
        let second = store
            .complete_session(session.id, "a@b.c", "other", "fb2")
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(store
            .find_pending_session("a@b.c", None)
            .await
            .unwrap()
            .is_none());
    }
}
