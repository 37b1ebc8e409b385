//! Agent pipeline stages: Profiler, Qualifier, Hunter, Tailor, Scribe.
//!
//! Each stage is a stateless transformation: explicit input, explicit
//! output, one LLM call, no shared mutable state. The caller persists
//! results between stages, so a failure in one stage never rolls back work
//! an earlier stage already committed. (Scout lives in `jobs::source`;
//! Assembler, the only stage that touches storage, in `pipeline::assembler`.)

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::llm::prompts::GROUNDING_INSTRUCTION;
use crate::llm::{complete_json, TextCompletion};
use crate::models::job::JobOpportunityRow;
use crate::models::profile::AchievementRow;
use crate::pipeline::prompts::*;

/// Profiler output: how the candidate's record maps onto one posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDigest {
    pub summary: String,
    #[serde(default)]
    pub aligned_strengths: Vec<String>,
    #[serde(default)]
    pub evident_gaps: Vec<String>,
}

/// Qualifier verdict on whether to invest in an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualifierVerdict {
    Pursue,
    Skip,
}

/// Qualifier output: a 0-100 qualification score plus strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qualification {
    pub score: i32,
    pub rationale: String,
    pub verdict: QualifierVerdict,
}

/// One likely hiring contact. The stage produces titles and search hints,
/// never fabricated people, so `name` is usually null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiringContact {
    pub name: Option<String>,
    pub title: String,
    pub search_hint: Option<String>,
    pub confidence: f32,
}

/// Tailor output: the tailored resume body plus coverage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub resume_markdown: String,
    pub confidence: i32,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
}

/// Scribe output: cover letter and LinkedIn outreach message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outreach {
    pub cover_letter: String,
    pub linkedin_message: String,
}

/// Profiler: annotate a posting against the user's achievements.
pub async fn profile_posting(
    llm: &dyn TextCompletion,
    job: &JobOpportunityRow,
    achievements: &[AchievementRow],
) -> Result<ProfileDigest, AppError> {
    let prompt = PROFILER_PROMPT_TEMPLATE
        .replace("{job_json}", &job_summary_json(job))
        .replace("{achievements_json}", &evidence_json(achievements));
    complete_json(llm, &prompt, PROFILER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Profiler stage failed: {e}")))
}

/// Qualifier: score the candidacy, consuming the Profiler's digest.
pub async fn qualify(
    llm: &dyn TextCompletion,
    job: &JobOpportunityRow,
    digest: &ProfileDigest,
) -> Result<Qualification, AppError> {
    let prompt = QUALIFIER_PROMPT_TEMPLATE
        .replace("{job_json}", &job_summary_json(job))
        .replace(
            "{digest_json}",
            &serde_json::to_string(digest).unwrap_or_default(),
        );
    let mut qualification: Qualification = complete_json(llm, &prompt, QUALIFIER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Qualifier stage failed: {e}")))?;
    qualification.score = qualification.score.clamp(0, 100);
    Ok(qualification)
}

/// Hunter: best-guess hiring contacts for a posting.
pub async fn hunt_contacts(
    llm: &dyn TextCompletion,
    job: &JobOpportunityRow,
) -> Result<Vec<HiringContact>, AppError> {
    let prompt = HUNTER_PROMPT_TEMPLATE.replace("{job_json}", &job_summary_json(job));
    let mut contacts: Vec<HiringContact> = complete_json(llm, &prompt, HUNTER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Hunter stage failed: {e}")))?;
    for contact in &mut contacts {
        contact.confidence = contact.confidence.clamp(0.0, 1.0);
    }
    contacts.truncate(3);
    Ok(contacts)
}

/// Tailor: produce the tailored resume body from pre-selected evidence
/// (the JobMatcher's strong matches).
pub async fn tailor(
    llm: &dyn TextCompletion,
    job: &JobOpportunityRow,
    evidence: &[AchievementRow],
) -> Result<TailoredResume, AppError> {
    let prompt = TAILOR_PROMPT_TEMPLATE
        .replace("{grounding}", GROUNDING_INSTRUCTION)
        .replace("{job_json}", &job_summary_json(job))
        .replace("{evidence_json}", &evidence_json(evidence));
    let mut tailored: TailoredResume = complete_json(llm, &prompt, TAILOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Tailor stage failed: {e}")))?;
    tailored.confidence = tailored.confidence.clamp(0, 100);
    Ok(tailored)
}

/// Scribe: cover letter + LinkedIn message from the same evidence.
pub async fn scribe(
    llm: &dyn TextCompletion,
    job: &JobOpportunityRow,
    evidence: &[AchievementRow],
) -> Result<Outreach, AppError> {
    let prompt = SCRIBE_PROMPT_TEMPLATE
        .replace("{job_json}", &job_summary_json(job))
        .replace("{evidence_json}", &evidence_json(evidence));
    complete_json(llm, &prompt, SCRIBE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Scribe stage failed: {e}")))
}

fn job_summary_json(job: &JobOpportunityRow) -> String {
    json!({
        "title": job.title,
        "company": job.company,
        "location": job.location,
        "required_skills": job.required_skills,
        "preferred_skills": job.preferred_skills,
        "key_responsibilities": job.key_responsibilities,
    })
    .to_string()
}

fn evidence_json(achievements: &[AchievementRow]) -> String {
    let evidence: Vec<_> = achievements
        .iter()
        .map(|a| {
            json!({
                "achievement_id": a.id,
                "company": a.company,
                "role_title": a.role_title,
                "action": a.action,
                "result": a.result,
                "xyz_accomplishment": a.xyz_accomplishment,
                "keywords": a.keywords,
            })
        })
        .collect();
    serde_json::to_string(&evidence).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::StubCompletion;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_job() -> JobOpportunityRow {
        JobOpportunityRow {
            id: Uuid::new_v4(),
            title: "Senior Backend Engineer".to_string(),
            company: "Streamline Analytics".to_string(),
            location: Some("Remote".to_string()),
            description: "Build ingestion services".to_string(),
            required_skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            preferred_skills: vec!["Kubernetes".to_string()],
            key_responsibilities: vec!["Operate ingestion".to_string()],
            salary_min: None,
            salary_max: None,
            source_url: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_qualifier_clamps_score() {
        let stub = StubCompletion::new(vec![
            r#"{"score": 130, "rationale": "overflow", "verdict": "pursue"}"#,
        ]);
        let digest = ProfileDigest {
            summary: "good fit".to_string(),
            aligned_strengths: vec![],
            evident_gaps: vec![],
        };
        let q = qualify(&stub, &make_job(), &digest).await.unwrap();
        assert_eq!(q.score, 100);
        assert_eq!(q.verdict, QualifierVerdict::Pursue);
    }

    #[tokio::test]
    async fn test_hunter_caps_contacts_and_clamps_confidence() {
        let stub = StubCompletion::new(vec![
            r#"[
                {"name": null, "title": "EM, Payments", "search_hint": null, "confidence": 1.4},
                {"name": null, "title": "Recruiter", "search_hint": null, "confidence": 0.5},
                {"name": null, "title": "VP Eng", "search_hint": null, "confidence": 0.2},
                {"name": null, "title": "CEO", "search_hint": null, "confidence": 0.1}
            ]"#,
        ]);
        let contacts = hunt_contacts(&stub, &make_job()).await.unwrap();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].confidence, 1.0);
    }

    #[tokio::test]
    async fn test_stage_failure_is_local_llm_error() {
        let digest = ProfileDigest {
            summary: String::new(),
            aligned_strengths: vec![],
            evident_gaps: vec![],
        };
        let err = qualify(&StubCompletion::failing(), &make_job(), &digest)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[test]
    fn test_verdict_serde_snake_case() {
        let v: QualifierVerdict = serde_json::from_str("\"skip\"").unwrap();
        assert_eq!(v, QualifierVerdict::Skip);
        assert_eq!(serde_json::to_string(&QualifierVerdict::Pursue).unwrap(), "\"pursue\"");
    }

    #[tokio::test]
    async fn test_tailor_defaults_missing_keywords() {
        let stub = StubCompletion::new(vec![
            r###"{"resume_markdown": "## Experience", "confidence": 80}"###,
        ]);
        let tailored = tailor(&stub, &make_job(), &[]).await.unwrap();
        assert!(tailored.missing_keywords.is_empty());
        assert_eq!(tailored.confidence, 80);
    }
}
