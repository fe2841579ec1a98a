//! Lexical Similarity Scorer: TF-IDF cosine over a two-document corpus.
//!
//! The vector space is rebuilt from exactly the resume and the job description on
//! every call, so IDF only distinguishes "shared" from "one-sided" terms. Scores are
//! comparable between calls of the same shape, not globally calibrated.
//!
//! Weighting: raw term counts × smoothed IDF `ln((1 + n) / (1 + df)) + 1`.

use std::collections::BTreeMap;

use crate::matching::normalize::NormalizedText;

/// Corpus size. Always the resume plus one job description.
const CORPUS_SIZE: f64 = 2.0;

/// Sparse TF-IDF weights keyed by term. Ordered so sums run in a fixed order.
type TermVector<'a> = BTreeMap<&'a str, f64>;

/// Cosine similarity of the two texts in their shared TF-IDF space, in [0, 1].
/// Returns exactly 0.0 when either text is empty.
pub fn lexical_score(a: &NormalizedText, b: &NormalizedText) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let counts_a = term_counts(a);
    let counts_b = term_counts(b);

    let vector_a = weigh(&counts_a, &counts_b);
    let vector_b = weigh(&counts_b, &counts_a);

    cosine(&vector_a, &vector_b)
}

fn term_counts(text: &NormalizedText) -> BTreeMap<&str, u32> {
    let mut counts = BTreeMap::new();
    for token in text.tokens() {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// TF-IDF weights for `own`, with document frequency taken over `own` and `other`.
fn weigh<'a>(own: &BTreeMap<&'a str, u32>, other: &BTreeMap<&str, u32>) -> TermVector<'a> {
    own.iter()
        .map(|(&term, &count)| {
            let df = if other.contains_key(term) { 2.0 } else { 1.0 };
            (term, count as f64 * smoothed_idf(df))
        })
        .collect()
}

fn smoothed_idf(doc_frequency: f64) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + doc_frequency)).ln() + 1.0
}

/// Cosine similarity; zero vectors score 0.0 rather than dividing by zero.
fn cosine(a: &TermVector<'_>, b: &TermVector<'_>) -> f64 {
    let norm_sq_a: f64 = a.values().map(|w| w * w).sum();
    let norm_sq_b: f64 = b.values().map(|w| w * w).sum();
    if norm_sq_a == 0.0 || norm_sq_b == 0.0 {
        return 0.0;
    }

    // Walk the smaller map but in key order, so dot(a, b) and dot(b, a) sum identically.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    // Folded from +0.0: an empty `sum()` of f64 is -0.0.
    let dot = small
        .iter()
        .filter_map(|(term, w)| large.get(*term).map(|other| w * other))
        .fold(0.0, |acc, x| acc + x);

    // sqrt(x·y) rather than sqrt(x)·sqrt(y): a vector against itself lands on exactly 1.0.
    (dot / (norm_sq_a * norm_sq_b).sqrt()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::normalize::normalize;

    const RESUME: &str = "Senior backend engineer with eight years building distributed \
        systems in Rust and Go. Led migration of payment services to Kubernetes. \
        MSc Computer Science.";
    const JOB: &str = "We are hiring a backend engineer to build distributed payment \
        systems. Rust or Go required; Kubernetes experience preferred. Degree in \
        Computer Science.";

    #[test]
    fn test_identical_documents_score_one() {
        let a = normalize(RESUME);
        let score = lexical_score(&a, &a.clone());
        assert!((score - 1.0).abs() < 1e-12, "score was {score}");
    }

    #[test]
    fn test_single_token_document_scores_one_against_itself() {
        let a = normalize("x");
        assert!(!a.is_empty());
        assert!((lexical_score(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_symmetric() {
        let a = normalize(RESUME);
        let b = normalize(JOB);
        assert_eq!(lexical_score(&a, &b), lexical_score(&b, &a));
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let a = normalize(RESUME);
        let empty = normalize("");
        assert_eq!(lexical_score(&a, &empty), 0.0);
        assert_eq!(lexical_score(&empty, &a), 0.0);
        assert_eq!(lexical_score(&empty, &empty), 0.0);
    }

    #[test]
    fn test_stopword_only_input_scores_zero() {
        let a = normalize(RESUME);
        let stopwords = normalize("the and of to");
        assert!(stopwords.is_empty());
        assert_eq!(lexical_score(&a, &stopwords), 0.0);
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let a = normalize("rust kubernetes");
        let b = normalize("painting sculpture");
        assert_eq!(lexical_score(&a, &b), 0.0);
    }

    #[test]
    fn test_disjoint_documents_score_positive_zero() {
        let score = lexical_score(&normalize("rust kubernetes"), &normalize("painting sculpture"));
        assert!(score.is_sign_positive(), "score was {score:?}");
        assert_eq!(serde_json::to_string(&score).unwrap(), "0.0");
    }

    #[test]
    fn test_partial_overlap_matches_hand_computed_value() {
        // shared "rust": idf 1.0; one-sided terms: idf ln(1.5) + 1.
        // cos = 1 / (1 + (ln(1.5) + 1)^2)
        let a = normalize("rust go");
        let b = normalize("rust python");
        let one_sided = (1.5_f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + one_sided * one_sided);
        let score = lexical_score(&a, &b);
        assert!((score - expected).abs() < 1e-12, "score was {score}");
        assert!((score - 0.3361).abs() < 1e-3);
    }

    #[test]
    fn test_related_documents_score_between_zero_and_one() {
        let score = lexical_score(&normalize(RESUME), &normalize(JOB));
        assert!(score > 0.0 && score < 1.0, "score was {score}");
    }

    #[test]
    fn test_term_frequency_affects_score() {
        let job = normalize("rust rust rust python");
        let rust_heavy = normalize("rust rust rust java");
        let rust_light = normalize("rust java java java");
        assert!(lexical_score(&rust_heavy, &job) > lexical_score(&rust_light, &job));
    }
}
