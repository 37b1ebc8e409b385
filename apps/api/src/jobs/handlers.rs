use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::matcher::{match_achievements, MatchResult, STRONG_MATCH_THRESHOLD};
use crate::jobs::prompts::{JD_EXTRACT_PROMPT_TEMPLATE, JD_EXTRACT_SYSTEM};
use crate::jobs::source::{JobQuery, ScoutedJob};
use crate::jobs::status::{transition, ApplicationStatus};
use crate::llm::complete_json;
use crate::models::job::{ApplicationRow, JobOpportunityRow};
use crate::models::profile::AchievementRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Job opportunities
// ────────────────────────────────────────────────────────────────────────────

/// Structured JD fields as returned by the extraction LLM call.
#[derive(Debug, Deserialize)]
struct ExtractedJd {
    title: String,
    company: String,
    location: Option<String>,
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(default)]
    preferred_skills: Vec<String>,
    #[serde(default)]
    key_responsibilities: Vec<String>,
    salary_min: Option<i32>,
    salary_max: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub jd_text: String,
    pub source_url: Option<String>,
}

/// POST /api/v1/jobs
/// Creates a job opportunity from a pasted (or scouted) description.
/// Skills and responsibilities are LLM-extracted at creation time.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<Json<JobOpportunityRow>, AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Field 'jd_text' must not be empty".to_string(),
        ));
    }

    let prompt = JD_EXTRACT_PROMPT_TEMPLATE.replace("{jd_text}", &req.jd_text);
    let extracted: ExtractedJd = complete_json(state.llm.as_ref(), &prompt, JD_EXTRACT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD extraction failed: {e}")))?;

    let row: JobOpportunityRow = sqlx::query_as(
        r#"
        INSERT INTO job_opportunities
            (id, title, company, location, description, required_skills,
             preferred_skills, key_responsibilities, salary_min, salary_max,
             source_url, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&extracted.title)
    .bind(&extracted.company)
    .bind(&extracted.location)
    .bind(&req.jd_text)
    .bind(&extracted.required_skills)
    .bind(&extracted.preferred_skills)
    .bind(&extracted.key_responsibilities)
    .bind(extracted.salary_min)
    .bind(extracted.salary_max)
    .bind(&req.source_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobOpportunityRow>>, AppError> {
    let rows: Vec<JobOpportunityRow> =
        sqlx::query_as("SELECT * FROM job_opportunities ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobOpportunityRow>, AppError> {
    let row: JobOpportunityRow = sqlx::query_as("SELECT * FROM job_opportunities WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/jobs/scout
/// Queries the injected job source. Results are raw postings; saving one as
/// a job opportunity goes through POST /api/v1/jobs.
pub async fn handle_scout(
    State(state): State<AppState>,
    Json(query): Json<JobQuery>,
) -> Result<Json<Vec<ScoutedJob>>, AppError> {
    let postings = state.job_source.search(&query).await?;
    Ok(Json(postings))
}

// ────────────────────────────────────────────────────────────────────────────
// Matching
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub job_id: Uuid,
    pub results: Vec<MatchResult>,
    pub strong_match_threshold: i32,
}

/// POST /api/v1/jobs/:id/match
/// Scores all of the user's achievements against one job. On scorer outage
/// the caller receives MATCHING_UNAVAILABLE and should render the
/// achievements unscored.
pub async fn handle_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MatchResponse>, AppError> {
    let job: JobOpportunityRow = sqlx::query_as("SELECT * FROM job_opportunities WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    let achievements: Vec<AchievementRow> =
        sqlx::query_as("SELECT * FROM achievements WHERE user_id = $1")
            .bind(params.user_id)
            .fetch_all(&state.db)
            .await?;

    let results = match_achievements(state.llm.as_ref(), &job, &achievements).await?;

    Ok(Json(MatchResponse {
        job_id: id,
        results,
        strong_match_threshold: STRONG_MATCH_THRESHOLD,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Applications
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub user_id: Uuid,
    pub job_id: Uuid,
}

/// POST /api/v1/applications
/// Creates an application in the initial `scouted` state.
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(req): Json<CreateApplicationRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    // The job must exist before an application can reference it
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM job_opportunities WHERE id = $1")
        .bind(req.job_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", req.job_id)))?;

    let row: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, user_id, job_id, status, missing_keywords, created_at, updated_at)
        VALUES ($1, $2, $3, $4, '{}', now(), now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.user_id)
    .bind(req.job_id)
    .bind(ApplicationStatus::Scouted.as_str())
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let rows: Vec<ApplicationRow> = sqlx::query_as(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub user_id: Uuid,
    pub status: ApplicationStatus,
}

/// PATCH /api/v1/applications/:id/status
/// Every status change is validated against the transition table; invalid
/// jumps are rejected before the row is touched.
pub async fn handle_change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let existing: ApplicationRow =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(req.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    let current = ApplicationStatus::parse(&existing.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "application {id} has unknown status '{}'",
            existing.status
        ))
    })?;

    let next =
        transition(current, req.status).map_err(|e| AppError::Validation(e.to_string()))?;

    let row: ApplicationRow = sqlx::query_as(
        "UPDATE applications SET status = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(next.as_str())
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}
