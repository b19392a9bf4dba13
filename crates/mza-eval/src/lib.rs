//! Answer-evaluation library for Memoriza
//!
//! This crate provides the core grading pipeline for flashcard study
//! sessions: text normalization, fuzzy answer scoring, and progressive
//! hint generation. Everything here is pure and synchronous; callers own
//! the question/deck data and any persistence of the results.

pub mod evaluate;
pub mod hint;
pub mod normalize;

pub use evaluate::{Evaluation, evaluate, score_for_ratio};
pub use hint::{AnswerSet, NO_DATA_MESSAGE, hint};
pub use normalize::{normalize, normalized_tokens};
