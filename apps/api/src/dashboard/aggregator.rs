//! Dashboard aggregation: pure functions over rows loaded oldest first.
//! Nothing computed here is persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::analysis::ResumeAnalysisRow;
use crate::models::interview::InterviewSessionRow;

/// Minimum first-to-last score gain worth calling out.
const OVERALL_IMPROVEMENT_THRESHOLD: f64 = 5.0;
/// Both histories must be longer than this for the overall-trend insight.
const OVERALL_TREND_MIN_ROWS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub created_at: DateTime<Utc>,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub avg_score: i64,
    pub total_resumes: usize,
    pub total_interviews: usize,
    pub latest_resume: Option<ResumeAnalysisRow>,
    pub latest_interview: Option<InterviewSessionRow>,
    pub score_trend: Vec<TrendPoint>,
    pub insights: Vec<String>,
}

/// Missing scores count as zero.
fn score_of(row: &ResumeAnalysisRow) -> f64 {
    f64::from(row.score.unwrap_or(0))
}

/// Mean score rounded to the nearest integer; 0 with no analyses.
pub fn average_score(analyses: &[ResumeAnalysisRow]) -> i64 {
    if analyses.is_empty() {
        return 0;
    }
    let total: f64 = analyses.iter().map(score_of).sum();
    (total / analyses.len() as f64).round() as i64
}

pub fn score_trend(analyses: &[ResumeAnalysisRow]) -> Vec<TrendPoint> {
    analyses
        .iter()
        .map(|a| TrendPoint {
            created_at: a.created_at,
            score: a.score.unwrap_or(0),
        })
        .collect()
}

pub fn build_insights(
    analyses: &[ResumeAnalysisRow],
    sessions: &[InterviewSessionRow],
) -> Vec<String> {
    let mut insights = Vec::new();

    if let [.., previous, latest] = analyses {
        let diff = score_of(latest) - score_of(previous);
        let insight = if diff > 0.0 {
            format!(
                "Your average resume score improved by {diff:.1}% compared to the previous analysis. Great progress!"
            )
        } else if diff < 0.0 {
            format!(
                "Your latest resume score dropped by {:.1}%. Review your recent changes to strengthen it again.",
                diff.abs()
            )
        } else {
            "Your resume performance remains consistent. Keep refining details for better results."
                .to_string()
        };
        insights.push(insight);
    }

    if let [.., previous, latest] = sessions {
        let seconds = (latest.created_at - previous.created_at).num_seconds() as f64;
        let days = (seconds / 86_400.0).round() as i64;
        insights.push(format!(
            "Your interview practice interval is about {days} days apart. Keeping a steady rhythm is key for confidence."
        ));
    }

    if analyses.len() > OVERALL_TREND_MIN_ROWS && sessions.len() > OVERALL_TREND_MIN_ROWS {
        if let (Some(first), Some(last)) = (analyses.first(), analyses.last()) {
            let improvement = score_of(last) - score_of(first);
            if improvement > OVERALL_IMPROVEMENT_THRESHOLD {
                insights.push(format!(
                    "Your resume score improved by {improvement:.1}% overall, a sign of steady career development!"
                ));
            }
        }
    }

    if !analyses.is_empty() && !sessions.is_empty() {
        insights.push(format!(
            "You've analyzed {} resumes and completed {} interviews. Consistency is building your professional growth!",
            analyses.len(),
            sessions.len()
        ));
    }

    insights
}

pub fn build_report(
    analyses: Vec<ResumeAnalysisRow>,
    sessions: Vec<InterviewSessionRow>,
) -> DashboardReport {
    DashboardReport {
        avg_score: average_score(&analyses),
        total_resumes: analyses.len(),
        total_interviews: sessions.len(),
        score_trend: score_trend(&analyses),
        insights: build_insights(&analyses, &sessions),
        latest_resume: analyses.last().cloned(),
        latest_interview: sessions.last().cloned(),
    }
}
