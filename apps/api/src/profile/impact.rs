//! Impact Meter: heuristic 0-100 quality score for an achievement's
//! `result` text.
//!
//! Three independent signals, summed: strong verb (+10), concrete metric
//! (+40), methodology connective (+50). Advisory only: a high score is a
//! hint that the bullet reads well, not a guarantee of substance.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Power verbs recognized by the strong-verb heuristic.
pub const POWER_VERBS: &[&str] = &[
    "accelerated",
    "achieved",
    "automated",
    "built",
    "created",
    "decreased",
    "delivered",
    "designed",
    "developed",
    "engineered",
    "generated",
    "grew",
    "implemented",
    "increased",
    "launched",
    "led",
    "optimized",
    "reduced",
    "saved",
];

const VERB_POINTS: i32 = 10;
const METRIC_POINTS: i32 = 40;
const METHODOLOGY_POINTS: i32 = 50;

static VERB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", POWER_VERBS.join("|"))).expect("valid verb regex")
});

/// Digits, currency, percentages, or scale words count as a metric.
static METRIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d|%|\$|\b(?:percent|million|thousand|hours?|days?|users?|customers?)\b")
        .expect("valid metric regex")
});

/// Connectives that signal the "by doing Z" half of an XYZ accomplishment.
static METHODOLOGY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:by|using|through|via|with|implementing|leveraging|utilizing|applying)\b")
        .expect("valid methodology regex")
});

/// Breakdown of the Impact Meter score for one result text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    pub score: i32,
    pub has_strong_verb: bool,
    pub has_metric: bool,
    pub has_methodology: bool,
}

/// Scores a result text. Deterministic, order-independent, max 100.
pub fn score_result(result_text: &str) -> ImpactBreakdown {
    let has_strong_verb = VERB_RE.is_match(result_text);
    let has_metric = METRIC_RE.is_match(result_text);
    let has_methodology = METHODOLOGY_RE.is_match(result_text);

    let score = has_strong_verb as i32 * VERB_POINTS
        + has_metric as i32 * METRIC_POINTS
        + has_methodology as i32 * METHODOLOGY_POINTS;

    ImpactBreakdown {
        score,
        has_strong_verb,
        has_metric,
        has_methodology,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_three_heuristics_score_100() {
        let b = score_result("Led team using agile methodology to cut costs by 20%");
        assert!(b.has_strong_verb);
        assert!(b.has_metric);
        assert!(b.has_methodology);
        assert_eq!(b.score, 100);
    }

    #[test]
    fn test_vague_text_scores_zero() {
        let b = score_result("helped out");
        assert!(!b.has_strong_verb);
        assert!(!b.has_metric);
        assert!(!b.has_methodology);
        assert_eq!(b.score, 0);
    }

    #[test]
    fn test_verb_only_scores_10() {
        let b = score_result("Engineered the checkout flow");
        assert_eq!(b.score, 10);
        assert!(b.has_strong_verb);
    }

    #[test]
    fn test_metric_only_scores_40() {
        let b = score_result("revenue rose 3 million");
        assert_eq!(b.score, 40);
        assert!(b.has_metric);
    }

    #[test]
    fn test_methodology_only_scores_50() {
        let b = score_result("ran outreach via cold email");
        assert_eq!(b.score, 50);
        assert!(b.has_methodology);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let b = score_result("REDUCED churn USING cohort analysis");
        assert!(b.has_strong_verb);
        assert!(b.has_methodology);
    }

    #[test]
    fn test_word_boundaries_prevent_substring_hits() {
        // "misled" must not count as "led"; "outfit" must not count as "out".
        let b = score_result("misled nobody about the outcome");
        assert!(!b.has_strong_verb);
    }

    #[test]
    fn test_percent_word_counts_as_metric() {
        assert!(score_result("cut onboarding time twenty percent").has_metric);
    }

    #[test]
    fn test_dollar_sign_counts_as_metric() {
        assert!(score_result("saved the company $40k annually").has_metric);
    }

    #[test]
    fn test_adding_metric_never_decreases_score() {
        // Per-heuristic monotonicity: a verb-only string plus a metric
        // scores at least as high as the verb-only string.
        let verb_only = score_result("Generated new leads");
        let with_metric = score_result("Generated 200 new leads");
        assert!(with_metric.score >= verb_only.score);
        assert_eq!(with_metric.score, verb_only.score + 40);
    }

    #[test]
    fn test_power_verb_list_size() {
        assert_eq!(POWER_VERBS.len(), 19);
    }

    #[test]
    fn test_score_bounded_at_100() {
        let b = score_result(
            "Generated, engineered, and reduced everything by 300% using $2M with 40 users",
        );
        assert_eq!(b.score, 100);
    }
}
