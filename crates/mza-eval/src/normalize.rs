//! Answer normalization for comparison.
//!
//! This module handles the critical task of comparing learner answers
//! against accepted answers. It must be lenient on accents, casing,
//! punctuation, and whitespace while still being strict enough to verify
//! actual knowledge. The evaluator's score thresholds depend on the token
//! boundaries this module produces, so the pipeline order is fixed.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Punctuation stripped during normalization (hyphen and en-dash included).
///
/// This is a deliberate fixed set rather than "everything non-alphanumeric":
/// apostrophes, for instance, are kept, so `"it's"` and `"its"` stay
/// distinct answers.
pub const STRIPPED_PUNCTUATION: &[char] = &['!', '?', '.', ',', ';', ':', '-', '–', '_'];

/// Normalize a string for answer comparison.
///
/// Applies the following transformations in order:
/// 1. Lowercase
/// 2. Unicode NFD decomposition to separate base characters from combining marks
/// 3. Strip combining marks (accents, diacritics), so `"á"` matches `"a"`
/// 4. Strip the fixed punctuation set
/// 5. Collapse and trim whitespace
///
/// Any input produces a valid output; the empty string normalizes to the
/// empty string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a string and split it into comparison tokens.
pub fn normalized_tokens(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Whether a string contains at least one character that carries a
/// combining mark under NFD (an accented letter, `ç`, `ñ`, ...).
///
/// Used by the hint generator to pick the "most complete" display form of
/// an answer.
pub(crate) fn has_diacritic(text: &str) -> bool {
    text.nfd().any(is_combining_mark)
}
