//! Job matcher: scores a user's achievements against one job opportunity.
//!
//! Per-achievement scoring is delegated to the LLM in a single batched
//! request; this module owns only aggregation, ordering, and the selection
//! policy. Match results are ephemeral: recomputed per request, never
//! persisted.

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::llm::{complete_json, TextCompletion};
use crate::models::job::JobOpportunityRow;
use crate::models::profile::AchievementRow;

/// Achievements scoring at or above this are pre-selected as strong matches
/// for resume tailoring. Everything is still returned for display.
pub const STRONG_MATCH_THRESHOLD: i32 = 70;

/// One achievement's match against a job. Ephemeral: never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub achievement_id: Uuid,
    pub match_score: i32,
    pub reason: String,
    pub strong_match: bool,
}

/// Shape the LLM is instructed to return, one element per achievement.
#[derive(Debug, Deserialize)]
pub struct ScoredAchievement {
    pub achievement_id: Uuid,
    pub match_score: i32,
    pub reason: String,
}

/// Scores every achievement against the job in one batched LLM request.
///
/// If the scorer cannot be reached the caller gets
/// `AppError::MatchingUnavailable` and should fall back to showing the
/// achievements unscored: no achievement silently disappears.
pub async fn match_achievements(
    llm: &dyn TextCompletion,
    job: &JobOpportunityRow,
    achievements: &[AchievementRow],
) -> Result<Vec<MatchResult>, AppError> {
    if achievements.is_empty() {
        return Ok(Vec::new());
    }

    let evidence: Vec<_> = achievements
        .iter()
        .map(|a| {
            json!({
                "achievement_id": a.id,
                "action": a.action,
                "result": a.result,
                "keywords": a.keywords,
            })
        })
        .collect();

    let prompt = MATCH_PROMPT_TEMPLATE
        .replace("{job_title}", &job.title)
        .replace(
            "{required_skills}",
            &job.required_skills.join(", "),
        )
        .replace(
            "{preferred_skills}",
            &job.preferred_skills.join(", "),
        )
        .replace(
            "{key_responsibilities}",
            &job.key_responsibilities.join("; "),
        )
        .replace(
            "{achievements_json}",
            &serde_json::to_string(&evidence).unwrap_or_default(),
        );

    let scored: Vec<ScoredAchievement> = complete_json(llm, &prompt, MATCH_SYSTEM)
        .await
        .map_err(|e| AppError::MatchingUnavailable(e.to_string()))?;

    Ok(aggregate(achievements, scored))
}

/// Pure aggregation step, kept separate so it tests without network.
///
/// Guarantees: every input achievement appears exactly once; scores are
/// clamped to 0..=100; output is sorted descending by score; `strong_match`
/// marks scores >= `STRONG_MATCH_THRESHOLD`.
pub fn aggregate(
    achievements: &[AchievementRow],
    scored: Vec<ScoredAchievement>,
) -> Vec<MatchResult> {
    let mut by_id: std::collections::HashMap<Uuid, (i32, String)> = scored
        .into_iter()
        .map(|s| (s.achievement_id, (s.match_score, s.reason)))
        .collect();

    let mut results: Vec<MatchResult> = achievements
        .iter()
        .map(|a| {
            let (score, reason) = by_id
                .remove(&a.id)
                .unwrap_or((0, "No score returned by the match scorer".to_string()));
            let match_score = score.clamp(0, 100);
            MatchResult {
                achievement_id: a.id,
                match_score,
                reason,
                strong_match: match_score >= STRONG_MATCH_THRESHOLD,
            }
        })
        .collect();

    // Stable sort: ties keep achievement input order
    results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    results
}

/// The pre-selection policy for resume tailoring.
pub fn strong_matches(results: &[MatchResult]) -> Vec<&MatchResult> {
    results.iter().filter(|r| r.strong_match).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_achievement(id: Uuid, action: &str) -> AchievementRow {
        AchievementRow {
            id,
            user_id: Uuid::new_v4(),
            situation: "Team lacked automated coverage".to_string(),
            task: "Stabilize releases".to_string(),
            action: action.to_string(),
            result: "Reduced regressions by 40% using CI gates".to_string(),
            xyz_accomplishment: None,
            impact_meter_score: 100,
            has_strong_verb: true,
            has_metric: true,
            has_methodology: true,
            company: None,
            role_title: None,
            keywords: vec!["testing".to_string()],
            source_material_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn scored(id: Uuid, score: i32) -> ScoredAchievement {
        ScoredAchievement {
            achievement_id: id,
            match_score: score,
            reason: format!("scored {score}"),
        }
    }

    #[test]
    fn test_aggregate_sorts_descending() {
        let a = make_achievement(Uuid::new_v4(), "Built CI/CD pipeline");
        let b = make_achievement(Uuid::new_v4(), "Led team of 5 engineers");
        let c = make_achievement(Uuid::new_v4(), "Designed database schema");
        let results = aggregate(
            &[a.clone(), b.clone(), c.clone()],
            vec![scored(a.id, 40), scored(b.id, 90), scored(c.id, 65)],
        );
        let scores: Vec<i32> = results.iter().map(|r| r.match_score).collect();
        assert_eq!(scores, vec![90, 65, 40]);
        assert_eq!(results[0].achievement_id, b.id);
    }

    #[test]
    fn test_aggregate_never_drops_an_achievement() {
        let a = make_achievement(Uuid::new_v4(), "Built CI/CD pipeline");
        let b = make_achievement(Uuid::new_v4(), "Led team of 5 engineers");
        // Scorer only returned one of the two
        let results = aggregate(&[a.clone(), b.clone()], vec![scored(a.id, 80)]);
        assert_eq!(results.len(), 2);
        let unscored = results.iter().find(|r| r.achievement_id == b.id).unwrap();
        assert_eq!(unscored.match_score, 0);
        assert!(unscored.reason.contains("No score"));
    }

    #[test]
    fn test_aggregate_clamps_out_of_range_scores() {
        let a = make_achievement(Uuid::new_v4(), "Built CI/CD pipeline");
        let b = make_achievement(Uuid::new_v4(), "Led team of 5 engineers");
        let results = aggregate(
            &[a.clone(), b.clone()],
            vec![scored(a.id, 140), scored(b.id, -20)],
        );
        assert_eq!(results[0].match_score, 100);
        assert_eq!(results[1].match_score, 0);
    }

    #[test]
    fn test_strong_match_threshold_is_inclusive_at_70() {
        let a = make_achievement(Uuid::new_v4(), "Built CI/CD pipeline");
        let b = make_achievement(Uuid::new_v4(), "Led team of 5 engineers");
        let results = aggregate(
            &[a.clone(), b.clone()],
            vec![scored(a.id, 70), scored(b.id, 69)],
        );
        assert!(results[0].strong_match);
        assert!(!results[1].strong_match);
        assert_eq!(strong_matches(&results).len(), 1);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let a = make_achievement(Uuid::new_v4(), "first");
        let b = make_achievement(Uuid::new_v4(), "second");
        let results = aggregate(
            &[a.clone(), b.clone()],
            vec![scored(a.id, 50), scored(b.id, 50)],
        );
        assert_eq!(results[0].achievement_id, a.id);
        assert_eq!(results[1].achievement_id, b.id);
    }

    #[tokio::test]
    async fn test_unreachable_scorer_is_matching_unavailable() {
        use crate::llm::testing::StubCompletion;

        let job = JobOpportunityRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: None,
            description: "Build services".to_string(),
            required_skills: vec!["rust".to_string()],
            preferred_skills: vec![],
            key_responsibilities: vec![],
            salary_min: None,
            salary_max: None,
            source_url: None,
            created_at: Utc::now(),
        };
        let achievements = vec![make_achievement(Uuid::new_v4(), "Built CI/CD pipeline")];

        let err = match_achievements(&StubCompletion::failing(), &job, &achievements)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MatchingUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_achievements_short_circuits() {
        use crate::llm::testing::StubCompletion;

        let job = JobOpportunityRow {
            id: Uuid::new_v4(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: None,
            description: "Build services".to_string(),
            required_skills: vec![],
            preferred_skills: vec![],
            key_responsibilities: vec![],
            salary_min: None,
            salary_max: None,
            source_url: None,
            created_at: Utc::now(),
        };

        // No LLM call should happen; even the failing stub must succeed.
        let results = match_achievements(&StubCompletion::failing(), &job, &[])
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
