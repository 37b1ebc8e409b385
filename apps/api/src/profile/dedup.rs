//! Achievement deduplication: filters newly extracted candidates against a
//! user's existing achievements by action-text similarity.
//!
//! Candidates are only compared against `existing`, never against each other.
//! Cross-candidate dedup within one batch is an open product question and is
//! deliberately not done here.

use crate::profile::similarity::similarity;

/// Similarity above which a candidate is considered a duplicate of an
/// existing achievement. Strictly greater-than: a score exactly equal to
/// the threshold is treated as unique.
pub const DEDUPE_THRESHOLD: f64 = 0.85;

/// Result of a dedup pass. `kept` preserves candidate input order.
#[derive(Debug)]
pub struct DedupeOutcome<T> {
    pub kept: Vec<T>,
    pub skipped_count: usize,
}

/// Filters `candidates` against `existing_actions`, discarding any candidate
/// whose action is more than `threshold` similar to ANY existing action.
///
/// `action` projects the comparable action text out of a candidate. With an
/// empty `existing_actions` nothing is filtered.
pub fn dedupe_by_action<T>(
    existing_actions: &[String],
    candidates: Vec<T>,
    threshold: f64,
    action: impl Fn(&T) -> &str,
) -> DedupeOutcome<T> {
    let mut kept = Vec::with_capacity(candidates.len());
    let mut skipped_count = 0;

    for candidate in candidates {
        let is_duplicate = existing_actions
            .iter()
            .any(|existing| similarity(action(&candidate), existing) > threshold);

        if is_duplicate {
            skipped_count += 1;
        } else {
            kept.push(candidate);
        }
    }

    DedupeOutcome {
        kept,
        skipped_count,
    }
}

/// User-facing summary for an import / extraction run.
///
/// Mentions duplicates only when some were skipped, with correct pluralization.
pub fn import_summary(added: usize, skipped: usize) -> String {
    let base = if added == 1 {
        "Added 1 achievement to your Master Profile.".to_string()
    } else {
        format!("Added {added} achievements to your Master Profile.")
    };

    match skipped {
        0 => base,
        1 => format!("{base} 1 duplicate removed."),
        n => format!("{base} {n} duplicates removed."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actions(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_duplicate_is_skipped() {
        let existing = actions(&["Implemented automated testing framework"]);
        let candidates = vec![
            "Implemented automated testing framework",
            "Designed database schema",
        ];

        let outcome = dedupe_by_action(&existing, candidates, DEDUPE_THRESHOLD, |c| *c);
        assert_eq!(outcome.kept, vec!["Designed database schema"]);
        assert_eq!(outcome.skipped_count, 1);
    }

    #[test]
    fn test_empty_existing_keeps_everything() {
        let candidates = vec!["Led team of 5 engineers", "Built CI/CD pipeline"];
        let outcome = dedupe_by_action(&[], candidates.clone(), DEDUPE_THRESHOLD, |c| *c);
        assert_eq!(outcome.kept, candidates);
        assert_eq!(outcome.skipped_count, 0);
    }

    #[test]
    fn test_kept_order_preserves_input_order() {
        let existing = actions(&["Built CI/CD pipeline"]);
        let candidates = vec!["Zebra task", "Built CI/CD pipeline", "Alpha task"];
        let outcome = dedupe_by_action(&existing, candidates, DEDUPE_THRESHOLD, |c| *c);
        assert_eq!(outcome.kept, vec!["Zebra task", "Alpha task"]);
    }

    #[test]
    fn test_similarity_equal_to_threshold_is_unique() {
        // Threshold comparison is strict `>`: a candidate sitting exactly at
        // the threshold must be kept. Identical strings score 1.0, so pin
        // the threshold to 1.0 and feed an identical pair.
        let existing = actions(&["Implemented automated testing framework"]);
        let candidates = vec!["Implemented automated testing framework"];
        let outcome = dedupe_by_action(&existing, candidates, 1.0, |c| *c);
        assert_eq!(outcome.kept.len(), 1);
        assert_eq!(outcome.skipped_count, 0);
    }

    #[test]
    fn test_candidates_not_compared_to_each_other() {
        // Two identical candidates, neither in existing: both are kept.
        let candidates = vec!["Designed database schema", "Designed database schema"];
        let outcome = dedupe_by_action(&[], candidates, DEDUPE_THRESHOLD, |c| *c);
        assert_eq!(outcome.kept.len(), 2);
        assert_eq!(outcome.skipped_count, 0);
    }

    #[test]
    fn test_end_to_end_two_kept_two_skipped() {
        let existing = actions(&[
            "Implemented automated testing framework",
            "Led team of 5 engineers",
        ]);
        let candidates = vec![
            "Implemented automated testing framework",
            "Led team of 5 engineers",
            "Designed database schema",
            "Built CI/CD pipeline",
        ];

        let outcome = dedupe_by_action(&existing, candidates, DEDUPE_THRESHOLD, |c| *c);
        assert_eq!(
            outcome.kept,
            vec!["Designed database schema", "Built CI/CD pipeline"]
        );
        assert_eq!(outcome.skipped_count, 2);
    }

    #[test]
    fn test_summary_no_duplicates_omits_duplicate_mention() {
        let msg = import_summary(5, 0);
        assert!(!msg.contains("duplicate"), "message was: {msg}");
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_summary_one_duplicate_is_singular() {
        let msg = import_summary(4, 1);
        assert!(msg.contains("1 duplicate removed"), "message was: {msg}");
        assert!(!msg.contains("duplicates"));
    }

    #[test]
    fn test_summary_many_duplicates_is_plural() {
        let msg = import_summary(3, 5);
        assert!(msg.contains("5 duplicates removed"), "message was: {msg}");
    }

    #[test]
    fn test_summary_single_added_is_singular() {
        let msg = import_summary(1, 0);
        assert!(msg.contains("1 achievement "), "message was: {msg}");
    }
}
