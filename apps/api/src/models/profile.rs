use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A STAR-format achievement owned by a user.
///
/// `impact_meter_score` and the three heuristic flags are always a
/// deterministic function of `result`: recomputed on every write that
/// touches `result`, never left stale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AchievementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
    /// Single-sentence "Accomplished X, measured by Y, by doing Z" rewrite.
    pub xyz_accomplishment: Option<String>,
    pub impact_meter_score: i32,
    pub has_strong_verb: bool,
    pub has_metric: bool,
    pub has_methodology: bool,
    pub company: Option<String>,
    pub role_title: Option<String>,
    pub keywords: Vec<String>,
    /// Set when the achievement was extracted from a source material.
    pub source_material_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of an uploaded or linked source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Pending,
    Processed,
    Failed,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceStatus::Pending => "pending",
            SourceStatus::Processed => "processed",
            SourceStatus::Failed => "failed",
        }
    }
}

/// An uploaded resume file, pasted text blob, or linked URL awaiting
/// achievement extraction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SourceMaterialRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// "file" | "text" | "url"
    pub kind: String,
    pub file_name: Option<String>,
    pub source_url: Option<String>,
    pub raw_text: String,
    /// "pending" | "processed" | "failed"
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}
