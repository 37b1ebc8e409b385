//! String similarity: the primitive underneath achievement deduplication.
//!
//! Character-bigram Sørensen-Dice coefficient, case-normalized. Pure and
//! infallible: always returns a value in [0, 1].

/// Returns the similarity of two strings in [0, 1].
///
/// Both inputs are lowercased before comparison. Identical strings score
/// 1.0; if either string is empty the score is 0.0; everything else is the
/// Dice coefficient over character bigrams. Symmetric by construction.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    strsim::sorensen_dice(&a, &b)
}
