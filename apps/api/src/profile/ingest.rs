//! Source material intake and achievement extraction.
//!
//! Flow: create source (file / text / url, status `pending`) → extract
//! (LLM parses STAR achievements → impact-score → dedupe against existing →
//! insert kept) → source marked `processed`, or `failed` with a stored
//! error message. Extraction is re-runnable: a retry re-runs the same
//! synthesis, and dedup keeps repeated runs from piling up duplicates.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm::{complete_json, TextCompletion};
use crate::models::profile::{AchievementRow, SourceMaterialRow, SourceStatus};
use crate::profile::dedup::{dedupe_by_action, import_summary, DEDUPE_THRESHOLD};
use crate::profile::impact::score_result;
use crate::profile::prompts::{EXTRACT_PROMPT_TEMPLATE, EXTRACT_SYSTEM};

/// One achievement as proposed by the extraction LLM call, before
/// deduplication and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAchievement {
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
    pub xyz_accomplishment: Option<String>,
    pub company: Option<String>,
    pub role_title: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Outcome of one extraction run over a source material.
#[derive(Debug, Serialize)]
pub struct ExtractionReport {
    /// Absent for direct bulk imports that bypass a source material.
    pub source_id: Option<Uuid>,
    pub added: usize,
    pub skipped_duplicates: usize,
    pub message: String,
}

/// Validates a STAR candidate before persistence.
/// Every STAR field must be non-empty; failures carry the field name.
pub fn validate_star(candidate: &CandidateAchievement) -> Result<(), AppError> {
    let fields = [
        ("situation", &candidate.situation),
        ("task", &candidate.task),
        ("action", &candidate.action),
        ("result", &candidate.result),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Field '{name}' must not be empty"
            )));
        }
    }
    Ok(())
}

/// Runs achievement extraction for one source material.
///
/// An LLM failure, or LLM output that fails STAR validation, is recorded on
/// the source row (`failed` + error message) and surfaced as
/// `AppError::Extraction`; the run can be retried.
pub async fn run_extraction(
    pool: &PgPool,
    llm: &dyn TextCompletion,
    source_id: Uuid,
    user_id: Uuid,
) -> Result<ExtractionReport, AppError> {
    let source: SourceMaterialRow = sqlx::query_as(
        "SELECT * FROM source_materials WHERE id = $1 AND user_id = $2",
    )
    .bind(source_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Source material {source_id} not found")))?;

    let prompt = EXTRACT_PROMPT_TEMPLATE.replace("{raw_text}", &source.raw_text);
    let candidates: Vec<CandidateAchievement> =
        match complete_json(llm, &prompt, EXTRACT_SYSTEM).await {
            Ok(c) => c,
            Err(e) => {
                let message = format!("Achievement extraction failed: {e}");
                warn!("{message} (source {source_id})");
                mark_source(pool, source_id, SourceStatus::Failed, Some(&message)).await?;
                return Err(AppError::Extraction(message));
            }
        };

    if let Err(err) = validate_extracted(&candidates) {
        if let AppError::Extraction(message) = &err {
            warn!("{message} (source {source_id})");
            mark_source(pool, source_id, SourceStatus::Failed, Some(message.as_str())).await?;
        }
        return Err(err);
    }

    let report = persist_candidates(pool, user_id, Some(source_id), candidates).await?;
    mark_source(pool, source_id, SourceStatus::Processed, None).await?;

    info!(
        "Extraction for source {source_id}: {} added, {} duplicates skipped",
        report.added, report.skipped_duplicates
    );
    Ok(report)
}

/// Checks a batch of LLM-produced candidates. LLM output is not user input:
/// a candidate that fails STAR validation is a failed synthesis, reported as
/// an extraction error rather than a caller error.
fn validate_extracted(candidates: &[CandidateAchievement]) -> Result<(), AppError> {
    for candidate in candidates {
        if let Err(err) = validate_star(candidate) {
            let detail = match err {
                AppError::Validation(msg) => msg,
                other => other.to_string(),
            };
            return Err(AppError::Extraction(format!(
                "Extraction produced an invalid achievement: {detail}"
            )));
        }
    }
    Ok(())
}

/// Validates, dedupes, and inserts a batch of candidates. Shared by LLM
/// extraction and bulk import.
pub async fn persist_candidates(
    pool: &PgPool,
    user_id: Uuid,
    source_material_id: Option<Uuid>,
    candidates: Vec<CandidateAchievement>,
) -> Result<ExtractionReport, AppError> {
    for candidate in &candidates {
        validate_star(candidate)?;
    }

    let existing_actions: Vec<String> =
        sqlx::query_scalar("SELECT action FROM achievements WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    let outcome = dedupe_by_action(&existing_actions, candidates, DEDUPE_THRESHOLD, |c| {
        c.action.as_str()
    });

    let added = outcome.kept.len();
    for candidate in outcome.kept {
        insert_achievement(pool, user_id, source_material_id, &candidate).await?;
    }

    Ok(ExtractionReport {
        source_id: source_material_id,
        added,
        skipped_duplicates: outcome.skipped_count,
        message: import_summary(added, outcome.skipped_count),
    })
}

/// Inserts one achievement, computing the Impact Meter breakdown from the
/// result text at write time.
pub async fn insert_achievement(
    pool: &PgPool,
    user_id: Uuid,
    source_material_id: Option<Uuid>,
    candidate: &CandidateAchievement,
) -> Result<AchievementRow, AppError> {
    let breakdown = score_result(&candidate.result);

    let row: AchievementRow = sqlx::query_as(
        r#"
        INSERT INTO achievements
            (id, user_id, situation, task, action, result, xyz_accomplishment,
             impact_meter_score, has_strong_verb, has_metric, has_methodology,
             company, role_title, keywords, source_material_id,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, now(), now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&candidate.situation)
    .bind(&candidate.task)
    .bind(&candidate.action)
    .bind(&candidate.result)
    .bind(&candidate.xyz_accomplishment)
    .bind(breakdown.score)
    .bind(breakdown.has_strong_verb)
    .bind(breakdown.has_metric)
    .bind(breakdown.has_methodology)
    .bind(&candidate.company)
    .bind(&candidate.role_title)
    .bind(&candidate.keywords)
    .bind(source_material_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

async fn mark_source(
    pool: &PgPool,
    source_id: Uuid,
    status: SourceStatus,
    error_message: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query("UPDATE source_materials SET status = $1, error_message = $2 WHERE id = $3")
        .bind(status.as_str())
        .bind(error_message)
        .bind(source_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(action: &str, result: &str) -> CandidateAchievement {
        CandidateAchievement {
            situation: "Legacy deploys took a full day".to_string(),
            task: "Shorten the release cycle".to_string(),
            action: action.to_string(),
            result: result.to_string(),
            xyz_accomplishment: None,
            company: None,
            role_title: None,
            keywords: vec![],
        }
    }

    #[test]
    fn test_validate_star_accepts_complete_candidate() {
        let c = candidate("Built CI/CD pipeline", "Cut deploy time by 90% using automation");
        assert!(validate_star(&c).is_ok());
    }

    #[test]
    fn test_validate_star_rejects_empty_result_with_field_name() {
        let c = candidate("Built CI/CD pipeline", "   ");
        let err = validate_star(&c).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("result"), "message: {msg}"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_star_rejects_empty_situation() {
        let mut c = candidate("Built CI/CD pipeline", "Cut deploy time by 90%");
        c.situation = String::new();
        let err = validate_star(&c).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("situation")));
    }

    #[test]
    fn test_extracted_candidate_with_blank_field_is_extraction_failure() {
        let mut c = candidate("Built CI/CD pipeline", "Cut deploy time by 90%");
        c.situation = String::new();
        let err = validate_extracted(&[c]).unwrap_err();
        match err {
            AppError::Extraction(msg) => assert!(msg.contains("situation"), "message: {msg}"),
            other => panic!("expected Extraction, got {other:?}"),
        }
    }

    #[test]
    fn test_extracted_valid_batch_passes() {
        let batch = vec![
            candidate("Built CI/CD pipeline", "Cut deploy time by 90% using automation"),
            candidate("Led migration to Postgres", "Dropped query latency by 60%"),
        ];
        assert!(validate_extracted(&batch).is_ok());
    }

    #[test]
    fn test_candidate_deserializes_without_keywords() {
        let json = r#"{
            "situation": "s",
            "task": "t",
            "action": "a",
            "result": "r",
            "xyz_accomplishment": null,
            "company": null,
            "role_title": null
        }"#;
        let c: CandidateAchievement = serde_json::from_str(json).unwrap();
        assert!(c.keywords.is_empty());
    }
}
