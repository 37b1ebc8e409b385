use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{AchievementRow, SourceMaterialRow, SourceStatus};
use crate::profile::impact::score_result;
use crate::profile::ingest::{
    insert_achievement, persist_candidates, run_extraction, validate_star,
    CandidateAchievement, ExtractionReport,
};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Source materials
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateSourceRequest {
    pub user_id: Uuid,
    /// Pasted document text. Exactly one of `raw_text` / `source_url`.
    pub raw_text: Option<String>,
    /// Link to fetch. Exactly one of `raw_text` / `source_url`.
    pub source_url: Option<String>,
}

/// POST /api/v1/profile/sources
/// Registers a pasted-text or linked-URL source material in `pending` state.
pub async fn handle_create_source(
    State(state): State<AppState>,
    Json(req): Json<CreateSourceRequest>,
) -> Result<Json<SourceMaterialRow>, AppError> {
    let (kind, raw_text, source_url) = match (req.raw_text, req.source_url) {
        (Some(text), None) => {
            if text.trim().is_empty() {
                return Err(AppError::Validation(
                    "Field 'raw_text' must not be empty".to_string(),
                ));
            }
            ("text", text, None)
        }
        (None, Some(url)) => {
            let text = fetch_url_text(&url).await?;
            ("url", text, Some(url))
        }
        _ => {
            return Err(AppError::Validation(
                "Provide exactly one of 'raw_text' or 'source_url'".to_string(),
            ))
        }
    };

    let row = insert_source(&state, req.user_id, kind, None, source_url, raw_text).await?;
    Ok(Json(row))
}

/// POST /api/v1/profile/sources/upload (multipart)
/// Accepts a resume file; PDFs go through text extraction, anything else is
/// treated as UTF-8 text.
pub async fn handle_upload_source(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SourceMaterialRow>, AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid user_id field: {e}")))?;
                user_id = Some(
                    text.parse()
                        .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?,
                );
            }
            Some("file") => {
                file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let user_id =
        user_id.ok_or_else(|| AppError::Validation("Missing 'user_id' field".to_string()))?;
    let bytes =
        file_bytes.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    let is_pdf = file_name
        .as_deref()
        .map(|n| n.to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
        || bytes.starts_with(b"%PDF");

    let raw_text = if is_pdf {
        extract_pdf_text(bytes).await?
    } else {
        String::from_utf8(bytes)
            .map_err(|_| AppError::Validation("Uploaded file is not valid UTF-8 text".to_string()))?
    };

    if raw_text.trim().is_empty() {
        return Err(AppError::Extraction(
            "No text could be extracted from the uploaded file".to_string(),
        ));
    }

    let row = insert_source(&state, user_id, "file", file_name, None, raw_text).await?;
    Ok(Json(row))
}

/// GET /api/v1/profile/sources
pub async fn handle_list_sources(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SourceMaterialRow>>, AppError> {
    let rows: Vec<SourceMaterialRow> = sqlx::query_as(
        "SELECT * FROM source_materials WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// POST /api/v1/profile/sources/:id/extract
/// Runs (or retries) achievement extraction for a source material.
pub async fn handle_extract_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ExtractionReport>, AppError> {
    let report = run_extraction(&state.db, state.llm.as_ref(), id, params.user_id).await?;
    Ok(Json(report))
}

// ────────────────────────────────────────────────────────────────────────────
// Achievements
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/profile/achievements
pub async fn handle_list_achievements(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AchievementRow>>, AppError> {
    let rows: Vec<AchievementRow> = sqlx::query_as(
        "SELECT * FROM achievements WHERE user_id = $1 ORDER BY impact_meter_score DESC, created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreateAchievementRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub candidate: CandidateAchievement,
}

/// POST /api/v1/profile/achievements
/// Manual entry. Validated field-by-field; the Impact Meter is computed at
/// insert from the result text.
pub async fn handle_create_achievement(
    State(state): State<AppState>,
    Json(req): Json<CreateAchievementRequest>,
) -> Result<Json<AchievementRow>, AppError> {
    validate_star(&req.candidate)?;
    let row = insert_achievement(&state.db, req.user_id, None, &req.candidate).await?;
    Ok(Json(row))
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub user_id: Uuid,
    pub achievements: Vec<CandidateAchievement>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub added: usize,
    pub skipped_duplicates: usize,
    pub message: String,
}

/// POST /api/v1/profile/achievements/import
/// Bulk import with dedup against the user's existing achievements.
pub async fn handle_import_achievements(
    State(state): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    let report = persist_candidates(&state.db, req.user_id, None, req.achievements).await?;
    Ok(Json(ImportResponse {
        added: report.added,
        skipped_duplicates: report.skipped_duplicates,
        message: report.message,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAchievementRequest {
    pub user_id: Uuid,
    pub situation: Option<String>,
    pub task: Option<String>,
    pub action: Option<String>,
    pub result: Option<String>,
    pub xyz_accomplishment: Option<String>,
    pub company: Option<String>,
    pub role_title: Option<String>,
    pub keywords: Option<Vec<String>>,
}

/// PATCH /api/v1/profile/achievements/:id
/// Updates overwrite in place. The Impact Meter breakdown is recomputed from
/// the final result text on every update: it is never left stale.
pub async fn handle_update_achievement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAchievementRequest>,
) -> Result<Json<AchievementRow>, AppError> {
    let existing: AchievementRow =
        sqlx::query_as("SELECT * FROM achievements WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(req.user_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))?;

    let merged = CandidateAchievement {
        situation: req.situation.unwrap_or(existing.situation),
        task: req.task.unwrap_or(existing.task),
        action: req.action.unwrap_or(existing.action),
        result: req.result.unwrap_or(existing.result),
        xyz_accomplishment: req.xyz_accomplishment.or(existing.xyz_accomplishment),
        company: req.company.or(existing.company),
        role_title: req.role_title.or(existing.role_title),
        keywords: req.keywords.unwrap_or(existing.keywords),
    };
    validate_star(&merged)?;

    let breakdown = score_result(&merged.result);

    let row: AchievementRow = sqlx::query_as(
        r#"
        UPDATE achievements
        SET situation = $1, task = $2, action = $3, result = $4,
            xyz_accomplishment = $5, impact_meter_score = $6,
            has_strong_verb = $7, has_metric = $8, has_methodology = $9,
            company = $10, role_title = $11, keywords = $12, updated_at = now()
        WHERE id = $13 AND user_id = $14
        RETURNING *
        "#,
    )
    .bind(&merged.situation)
    .bind(&merged.task)
    .bind(&merged.action)
    .bind(&merged.result)
    .bind(&merged.xyz_accomplishment)
    .bind(breakdown.score)
    .bind(breakdown.has_strong_verb)
    .bind(breakdown.has_metric)
    .bind(breakdown.has_methodology)
    .bind(&merged.company)
    .bind(&merged.role_title)
    .bind(&merged.keywords)
    .bind(id)
    .bind(req.user_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn insert_source(
    state: &AppState,
    user_id: Uuid,
    kind: &str,
    file_name: Option<String>,
    source_url: Option<String>,
    raw_text: String,
) -> Result<SourceMaterialRow, AppError> {
    let row: SourceMaterialRow = sqlx::query_as(
        r#"
        INSERT INTO source_materials
            (id, user_id, kind, file_name, source_url, raw_text, status, error_message, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NULL, now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(kind)
    .bind(file_name)
    .bind(source_url)
    .bind(raw_text)
    .bind(SourceStatus::Pending.as_str())
    .fetch_one(&state.db)
    .await?;
    Ok(row)
}

async fn fetch_url_text(url: &str) -> Result<String, AppError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| AppError::Extraction(format!("Could not fetch '{url}': {e}")))?;
    if !response.status().is_success() {
        return Err(AppError::Extraction(format!(
            "Fetching '{url}' returned status {}",
            response.status()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| AppError::Extraction(format!("Could not read body of '{url}': {e}")))
}

/// PDF text extraction is blocking; run it off the async executor.
async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let mut file = tempfile::NamedTempFile::new()
            .map_err(|e| AppError::Extraction(format!("Could not stage upload: {e}")))?;
        file.write_all(&bytes)
            .map_err(|e| AppError::Extraction(format!("Could not stage upload: {e}")))?;
        pdf_extract::extract_text(file.path())
            .map_err(|e| AppError::Extraction(format!("PDF text extraction failed: {e}")))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))?
}
