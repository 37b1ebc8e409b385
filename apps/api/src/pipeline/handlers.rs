use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::matcher::{match_achievements, strong_matches};
use crate::models::job::{ApplicationRow, JobOpportunityRow};
use crate::models::profile::AchievementRow;
use crate::pipeline::assembler::{assemble_package, ArtifactUrls};
use crate::pipeline::stages::{
    hunt_contacts, profile_posting, qualify, scribe, tailor, HiringContact, Outreach,
    ProfileDigest, Qualification,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct QualifyResponse {
    pub application_id: Uuid,
    pub digest: ProfileDigest,
    pub qualification: Qualification,
}

/// POST /api/v1/applications/:id/qualify
/// Runs Profiler then Qualifier and persists score + rationale.
pub async fn handle_qualify(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<QualifyResponse>, AppError> {
    let application = load_application(&state, id, params.user_id).await?;
    let job = load_job(&state, application.job_id).await?;
    let achievements = load_achievements(&state, params.user_id).await?;

    let digest = profile_posting(state.llm.as_ref(), &job, &achievements).await?;
    let qualification = qualify(state.llm.as_ref(), &job, &digest).await?;

    sqlx::query(
        "UPDATE applications SET qualification_score = $1, strategic_rationale = $2, updated_at = now() WHERE id = $3",
    )
    .bind(qualification.score)
    .bind(&qualification.rationale)
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(QualifyResponse {
        application_id: id,
        digest,
        qualification,
    }))
}

/// POST /api/v1/applications/:id/hunt
/// Contact suggestions are ephemeral: returned, never persisted.
pub async fn handle_hunt(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<HiringContact>>, AppError> {
    let application = load_application(&state, id, params.user_id).await?;
    let job = load_job(&state, application.job_id).await?;
    let contacts = hunt_contacts(state.llm.as_ref(), &job).await?;
    Ok(Json(contacts))
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub application_id: Uuid,
    pub resume_markdown: String,
    pub confidence: i32,
    pub missing_keywords: Vec<String>,
    pub evidence_count: usize,
}

/// POST /api/v1/applications/:id/tailor
/// Feeds the JobMatcher's strong matches to the Tailor stage as evidence.
/// When nothing clears the strong-match bar, all achievements are used so
/// the stage still has material to work from.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TailorResponse>, AppError> {
    let application = load_application(&state, id, params.user_id).await?;
    let job = load_job(&state, application.job_id).await?;
    let achievements = load_achievements(&state, params.user_id).await?;

    let results = match_achievements(state.llm.as_ref(), &job, &achievements).await?;
    let strong_ids: Vec<Uuid> = strong_matches(&results)
        .iter()
        .map(|r| r.achievement_id)
        .collect();
    let evidence: Vec<AchievementRow> = if strong_ids.is_empty() {
        achievements
    } else {
        achievements
            .into_iter()
            .filter(|a| strong_ids.contains(&a.id))
            .collect()
    };

    let tailored = tailor(state.llm.as_ref(), &job, &evidence).await?;

    sqlx::query(
        "UPDATE applications SET tailored_resume = $1, match_confidence = $2, missing_keywords = $3, updated_at = now() WHERE id = $4",
    )
    .bind(&tailored.resume_markdown)
    .bind(tailored.confidence)
    .bind(&tailored.missing_keywords)
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(TailorResponse {
        application_id: id,
        resume_markdown: tailored.resume_markdown,
        confidence: tailored.confidence,
        missing_keywords: tailored.missing_keywords,
        evidence_count: evidence.len(),
    }))
}

/// POST /api/v1/applications/:id/scribe
/// Produces and persists the cover letter and LinkedIn message.
pub async fn handle_scribe(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Outreach>, AppError> {
    let application = load_application(&state, id, params.user_id).await?;
    let job = load_job(&state, application.job_id).await?;
    let achievements = load_achievements(&state, params.user_id).await?;

    let outreach = scribe(state.llm.as_ref(), &job, &achievements).await?;

    sqlx::query(
        "UPDATE applications SET cover_letter = $1, linkedin_message = $2, updated_at = now() WHERE id = $3",
    )
    .bind(&outreach.cover_letter)
    .bind(&outreach.linkedin_message)
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(outreach))
}

/// POST /api/v1/applications/:id/assemble
/// Uploads the final package to object storage and persists the URLs.
pub async fn handle_assemble(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ArtifactUrls>, AppError> {
    let application = load_application(&state, id, params.user_id).await?;

    let urls = assemble_package(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_endpoint,
        &application,
    )
    .await?;

    sqlx::query(
        "UPDATE applications SET resume_url = $1, cover_letter_url = $2, message_url = $3, updated_at = now() WHERE id = $4",
    )
    .bind(&urls.resume_url)
    .bind(&urls.cover_letter_url)
    .bind(&urls.message_url)
    .bind(id)
    .execute(&state.db)
    .await?;

    Ok(Json(urls))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared loaders
// ────────────────────────────────────────────────────────────────────────────

async fn load_application(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
) -> Result<ApplicationRow, AppError> {
    sqlx::query_as("SELECT * FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

async fn load_job(state: &AppState, job_id: Uuid) -> Result<JobOpportunityRow, AppError> {
    sqlx::query_as("SELECT * FROM job_opportunities WHERE id = $1")
        .bind(job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

async fn load_achievements(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<AchievementRow>, AppError> {
    Ok(
        sqlx::query_as("SELECT * FROM achievements WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&state.db)
            .await?,
    )
}
