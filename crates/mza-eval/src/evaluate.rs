//! Scoring of a learner's answer against a question's accepted answers.
//!
//! An exact match after normalization is a full score. Anything else is
//! graded by word overlap: the fraction of an accepted answer's words that
//! the learner produced, taken over the best-matching accepted answer, and
//! mapped onto a discrete 1-5 scale. Word overlap (rather than edit
//! distance) tolerates answers given as a subset or superset of the
//! accepted phrase, which fits short factual answers ("é Brasília" vs.
//! "Brasília").

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Score awarded on an exact normalized match.
pub const EXACT_SCORE: u8 = 5;

/// Overlap ratio at or above which a near-miss scores 4.
pub const HIGH_OVERLAP: f64 = 0.8;
/// Overlap ratio at or above which a partial answer scores 3.
pub const PARTIAL_OVERLAP: f64 = 0.5;
/// Overlap ratio at or above which a weak answer scores 2.
pub const LOW_OVERLAP: f64 = 0.3;

/// Outcome of grading one candidate answer.
///
/// `correct` is true only on the exact-match path, in which case `score`
/// is [`EXACT_SCORE`] and `similarity` is `1.0`. Otherwise `score` is in
/// `1..=4` and is a deterministic function of `similarity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: bool,
    pub score: u8,
    pub detail: String,
    pub similarity: f64,
}

/// Map a best-overlap ratio onto the discrete score scale.
///
/// Thresholds are hand-tuned configuration, evaluated high to low. Note
/// that even a ratio of `1.0` caps at 4 here: a full 5 is reserved for the
/// exact-match path in [`evaluate`] (same word set in a different order is
/// not an exact answer).
pub fn score_for_ratio(ratio: f64) -> u8 {
    if ratio >= HIGH_OVERLAP {
        4
    } else if ratio >= PARTIAL_OVERLAP {
        3
    } else if ratio >= LOW_OVERLAP {
        2
    } else {
        1
    }
}

/// Grade `candidate` against the question's accepted answers.
///
/// Pure and infallible: empty candidates and empty answer sets produce a
/// low score, never an error. Callers on a live input path should still
/// require a non-empty candidate before submitting.
pub fn evaluate<S: AsRef<str>>(candidate: &str, accepted_answers: &[S]) -> Evaluation {
    let base = normalize(candidate);

    for answer in accepted_answers {
        if normalize(answer.as_ref()) == base {
            return Evaluation {
                correct: true,
                score: EXACT_SCORE,
                detail: "exact match".to_owned(),
                similarity: 1.0,
            };
        }
    }

    let base_tokens: HashSet<&str> = base.split_whitespace().collect();
    let mut best = 0.0_f64;
    for answer in accepted_answers {
        let normalized = normalize(answer.as_ref());
        let words: Vec<&str> = normalized.split_whitespace().collect();
        // Membership test against the candidate's token set; duplicated
        // words in the accepted answer count once per occurrence.
        let intersection = words.iter().filter(|w| base_tokens.contains(*w)).count();
        let ratio = intersection as f64 / words.len().max(1) as f64;
        if ratio > best {
            best = ratio;
        }
    }

    Evaluation {
        correct: false,
        score: score_for_ratio(best),
        detail: format!("similarity {}%", (best * 100.0).round() as u32),
        similarity: best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_exact_match() {
        let result = evaluate("Brasília", &answers(&["brasilia", "brasília"]));
        assert!(result.correct);
        assert_eq!(result.score, 5);
        assert_eq!(result.similarity, 1.0);
        assert_eq!(result.detail, "exact match");
    }

    #[test]
    fn test_exact_match_ignores_case_accents_punctuation() {
        let result = evaluate("  BRASÍLIA! ", &answers(&["brasilia"]));
        assert!(result.correct);
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_no_overlap() {
        let result = evaluate("banana", &answers(&["brasilia", "brasília"]));
        assert!(!result.correct);
        assert_eq!(result.score, 1);
        assert_eq!(result.similarity, 0.0);
        assert_eq!(result.detail, "similarity 0%");
    }

    #[test]
    fn test_partial_overlap_scores_three() {
        // 2 of 3 words of "cartao de estudo" present: ratio ~0.67
        let result = evaluate(
            "cartao estudo",
            &answers(&[
                "cartao de memorizacao",
                "cartao de estudo",
                "ferramenta de estudo",
            ]),
        );
        assert!(!result.correct);
        assert_eq!(result.score, 3);
        assert!((result.similarity - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.detail, "similarity 67%");
    }

    #[test]
    fn test_best_answer_wins() {
        // One word of four vs. two words of two: the higher ratio counts
        let result = evaluate("capital federal", &answers(&["a capital do brasil", "capital federal brasileira"]));
        assert_eq!(result.similarity, 2.0 / 3.0);
        assert_eq!(result.score, 3);
    }

    #[test]
    fn test_reordered_words_are_not_exact() {
        let result = evaluate("estudo de cartao", &answers(&["cartao de estudo"]));
        assert!(!result.correct);
        // All three words present, but not an exact match: caps at 4
        assert_eq!(result.score, 4);
        assert_eq!(result.similarity, 1.0);
    }

    #[test]
    fn test_superset_candidate() {
        // Extra words in the candidate do not reduce the ratio
        let result = evaluate("é Brasília", &answers(&["brasilia"]));
        assert!(!result.correct);
        assert_eq!(result.similarity, 1.0);
        assert_eq!(result.score, 4);
    }

    #[test]
    fn test_empty_answer_set() {
        let result = evaluate("anything", &Vec::<String>::new());
        assert!(!result.correct);
        assert_eq!(result.score, 1);
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_empty_candidate() {
        let result = evaluate("", &answers(&["brasilia"]));
        assert!(!result.correct);
        assert_eq!(result.score, 1);
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_empty_candidate_and_empty_accepted_answer() {
        // Both normalize to "": the exact-match path catches it
        let result = evaluate("?!", &answers(&[" . "]));
        assert!(result.correct);
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_score_for_ratio_thresholds() {
        assert_eq!(score_for_ratio(1.0), 4);
        assert_eq!(score_for_ratio(HIGH_OVERLAP), 4);
        assert_eq!(score_for_ratio(0.79), 3);
        assert_eq!(score_for_ratio(PARTIAL_OVERLAP), 3);
        assert_eq!(score_for_ratio(0.49), 2);
        assert_eq!(score_for_ratio(LOW_OVERLAP), 2);
        assert_eq!(score_for_ratio(0.29), 1);
        assert_eq!(score_for_ratio(0.0), 1);
    }

    #[test]
    fn test_score_monotone_in_ratio() {
        let ratios = [0.0, 0.1, 0.29, 0.3, 0.49, 0.5, 0.67, 0.79, 0.8, 0.9, 1.0];
        let scores: Vec<u8> = ratios.iter().map(|r| score_for_ratio(*r)).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_score_always_in_range() {
        let sets: &[&[&str]] = &[
            &[],
            &["brasilia"],
            &["cartao de estudo", "ferramenta de estudo"],
            &[""],
        ];
        let candidates = ["", "banana", "cartao", "cartao de estudo", "?!"];
        for set in sets {
            for candidate in candidates {
                let result = evaluate(candidate, &answers(set));
                assert!((1..=5).contains(&result.score));
                assert!((0.0..=1.0).contains(&result.similarity));
                assert_eq!(result.correct, result.score == 5);
            }
        }
    }

    #[test]
    fn test_duplicate_words_in_accepted_answer() {
        // "de de capital" has 3 occurrences; "de" and "capital" both present
        let result = evaluate("de capital", &answers(&["de de capital x"]));
        assert_eq!(result.similarity, 0.75);
        assert_eq!(result.score, 3);
    }
}
