use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Submission of one answer for grading.
///
/// `deck_id` and `card_index` are optional: when both are present the
/// result is also forwarded to the progress sink. The accepted answers are
/// supplied by the caller; this service does not own deck data.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub candidate: String,
    pub accepted_answers: Vec<String>,
    #[serde(default)]
    pub deck_id: Option<Uuid>,
    #[serde(default)]
    pub card_index: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct HintRequest {
    pub accepted_answers: Vec<String>,
    pub reveal_count: u32,
    #[serde(default)]
    pub draft_input: String,
    /// Pins the displayed answer; defaults to the accented-entry heuristic.
    #[serde(default)]
    pub preferred_index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub hint: String,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}
