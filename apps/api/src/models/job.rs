use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting, either scouted from a job source or pasted by the user.
/// Skill and responsibility lists are LLM-extracted from the description.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobOpportunityRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: String,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub key_responsibilities: Vec<String>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user's application against a job opportunity, carrying the status
/// (validated by `jobs::status`) and every artifact the agent pipeline
/// produced for it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    /// Validated against the `ApplicationStatus` transition table.
    pub status: String,
    pub qualification_score: Option<i32>,
    pub strategic_rationale: Option<String>,
    pub tailored_resume: Option<String>,
    pub match_confidence: Option<i32>,
    pub missing_keywords: Vec<String>,
    pub cover_letter: Option<String>,
    pub linkedin_message: Option<String>,
    pub resume_url: Option<String>,
    pub cover_letter_url: Option<String>,
    pub message_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
