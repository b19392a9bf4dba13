//! Progressive hint generation.
//!
//! A hint shows the question's preferred answer with words masked out.
//! A word is revealed when the learner has already typed it (matching
//! after normalization) or when enough hints have been requested to cover
//! its position. The caller owns the reveal counter and bumps it once per
//! hint request; this module is stateless.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::normalize::{has_diacritic, normalize, normalized_tokens};

/// Character used to mask hidden answer words.
pub const MASK_CHAR: char = '▁';

/// Maximum number of mask characters per word, so long words do not give
/// away their exact length.
pub const MAX_MASK_LEN: usize = 10;

/// Hint returned when the question has no accepted answers to reveal.
pub const NO_DATA_MESSAGE: &str = "Sem dados.";

/// The ordered accepted answers for one question.
///
/// The preferred display form defaults to the first entry containing an
/// accented character (taken as the most complete spelling), falling back
/// to the first entry. A caller that knows better can pin the preferred
/// entry explicitly with [`AnswerSet::with_preferred`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    answers: Vec<String>,
    preferred: Option<usize>,
}

impl AnswerSet {
    pub fn new(answers: Vec<String>) -> Self {
        Self {
            answers,
            preferred: None,
        }
    }

    /// Pin the canonical display entry. An out-of-range index falls back
    /// to the default heuristic.
    pub fn with_preferred(answers: Vec<String>, preferred: usize) -> Self {
        Self {
            answers,
            preferred: Some(preferred),
        }
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// The answer used for hint display, capitalized for presentation.
    /// `None` when the set is empty or the chosen entry is blank.
    pub fn preferred_answer(&self) -> Option<String> {
        let chosen = self
            .preferred
            .and_then(|i| self.answers.get(i))
            .or_else(|| self.answers.iter().find(|a| has_diacritic(a)))
            .or_else(|| self.answers.first())?;
        if chosen.is_empty() {
            return None;
        }
        Some(capitalize_first(chosen))
    }

    /// Render the masked hint for this answer set. See [`hint`].
    pub fn hint(&self, reveal_count: usize, draft_input: &str) -> String {
        let Some(preferred) = self.preferred_answer() else {
            return NO_DATA_MESSAGE.to_owned();
        };

        let words: Vec<&str> = preferred.split_whitespace().collect();
        let reveal = reveal_count.min(words.len());
        let credited: HashSet<String> = normalized_tokens(draft_input).into_iter().collect();

        let mut missing = 0_usize;
        let shown: Vec<String> = words
            .iter()
            .enumerate()
            .map(|(idx, word)| {
                let norm = normalize(word);
                let already_said = !norm.is_empty() && credited.contains(&norm);
                if !already_said && idx >= reveal && !norm.is_empty() {
                    missing += 1;
                }
                if already_said || idx < reveal {
                    (*word).to_owned()
                } else {
                    let len = word.chars().count().min(MAX_MASK_LEN);
                    MASK_CHAR.to_string().repeat(len)
                }
            })
            .collect();

        let mut out = shown.join(" ");
        if missing > 0 {
            out.push_str(&format!("  ({missing} palavra(s) faltando)"));
        }
        out
    }
}

/// Generate a hint using the default preferred-answer heuristic.
///
/// `reveal_count` words from the start are always shown; words the learner
/// already typed in `draft_input` are shown regardless of position; the
/// rest are masked. A reveal count beyond the word count reveals all.
pub fn hint<S: AsRef<str>>(
    accepted_answers: &[S],
    reveal_count: usize,
    draft_input: &str,
) -> String {
    let set = AnswerSet::new(
        accepted_answers
            .iter()
            .map(|s| s.as_ref().to_owned())
            .collect(),
    );
    set.hint(reveal_count, draft_input)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_fully_masked_single_word() {
        // "Brasília" has 8 characters, all masked, one word missing
        let result = hint(&answers(&["Brasília"]), 0, "");
        assert_eq!(result, format!("{}  (1 palavra(s) faltando)", "▁".repeat(8)));
    }

    #[test]
    fn test_reveal_covers_single_word() {
        let result = hint(&answers(&["Brasília"]), 1, "");
        assert_eq!(result, "Brasília");
    }

    #[test]
    fn test_reveal_count_beyond_word_count() {
        let result = hint(&answers(&["cartão de estudo"]), 99, "");
        assert_eq!(result, "Cartão de estudo");
    }

    #[test]
    fn test_mask_length_capped() {
        let result = hint(&answers(&["inconstitucionalissimamente"]), 0, "");
        assert_eq!(
            result,
            format!("{}  (1 palavra(s) faltando)", "▁".repeat(10))
        );
    }

    #[test]
    fn test_preferred_answer_is_accented_entry() {
        // First accented entry wins over an earlier plain one
        let set = AnswerSet::new(answers(&["cartao de estudo", "cartão de estudo"]));
        assert_eq!(set.preferred_answer().as_deref(), Some("Cartão de estudo"));
    }

    #[test]
    fn test_preferred_answer_falls_back_to_first() {
        let set = AnswerSet::new(answers(&["sete", "7"]));
        assert_eq!(set.preferred_answer().as_deref(), Some("Sete"));
    }

    #[test]
    fn test_preferred_answer_pinned() {
        let set = AnswerSet::with_preferred(answers(&["sete", "7"]), 1);
        assert_eq!(set.preferred_answer().as_deref(), Some("7"));
    }

    #[test]
    fn test_preferred_answer_pin_out_of_range() {
        let set = AnswerSet::with_preferred(answers(&["sete", "7"]), 5);
        assert_eq!(set.preferred_answer().as_deref(), Some("Sete"));
    }

    #[test]
    fn test_empty_answer_set() {
        assert_eq!(hint(&Vec::<String>::new(), 0, ""), NO_DATA_MESSAGE);
        assert_eq!(hint(&answers(&[""]), 3, "draft"), NO_DATA_MESSAGE);
    }

    #[test]
    fn test_draft_word_revealed_despite_case_and_accents() {
        // The learner typed "cartao" without the accent; still credited
        let result = hint(&answers(&["cartão de estudo"]), 0, "CARTAO");
        assert_eq!(result, "Cartão ▁▁ ▁▁▁▁▁▁  (2 palavra(s) faltando)");
    }

    #[test]
    fn test_wrong_draft_words_ignored() {
        let result = hint(&answers(&["cartão de estudo"]), 0, "banana verde");
        assert_eq!(result, "▁▁▁▁▁▁ ▁▁ ▁▁▁▁▁▁  (3 palavra(s) faltando)");
    }

    #[test]
    fn test_reveal_window_plus_credit() {
        let result = hint(&answers(&["cartão de estudo"]), 1, "estudo");
        assert_eq!(result, "Cartão ▁▁ estudo  (1 palavra(s) faltando)");
    }

    #[test]
    fn test_no_suffix_when_everything_revealed() {
        let result = hint(&answers(&["cartão de estudo"]), 0, "cartao de estudo");
        assert_eq!(result, "Cartão de estudo");
    }

    #[test]
    fn test_reveal_monotone() {
        // Raising the reveal count never re-masks a revealed word
        let set = AnswerSet::new(answers(&["qual é a capital do brasil"]));
        let mut previously_revealed = 0;
        for reveal in 0..8 {
            let rendered = set.hint(reveal, "capital");
            let words = rendered.split("  (").next().unwrap();
            let revealed = words
                .split_whitespace()
                .filter(|w| !w.starts_with(MASK_CHAR))
                .count();
            assert!(revealed >= previously_revealed);
            previously_revealed = revealed;
        }
    }
}
