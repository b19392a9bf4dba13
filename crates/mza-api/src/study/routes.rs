use axum::{Json, Router, extract::State, routing::post};
use chrono::Utc;
use mza_eval::{AnswerSet, Evaluation, normalize};

use crate::{
    ApiState,
    error::ApiError,
    metrics,
    progress::ProgressUpdate,
    validation::{validate_accepted_answers, validate_candidate, validate_text},
};

use super::model::{
    EvaluateRequest, HintRequest, HintResponse, NormalizeRequest, NormalizeResponse,
};

/// Create the study routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/study/evaluate", post(evaluate_answer))
        .route("/study/hint", post(hint_answer))
        .route("/study/normalize", post(normalize_text))
}

/// Grade a submitted answer against the question's accepted answers.
async fn evaluate_answer(
    State(state): State<ApiState>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, ApiError> {
    validate_candidate(&payload.candidate)?;
    validate_accepted_answers(&payload.accepted_answers)?;

    let evaluation = mza_eval::evaluate(&payload.candidate, &payload.accepted_answers);

    metrics::record_evaluation(evaluation.score, evaluation.correct);
    tracing::debug!(
        score = evaluation.score,
        correct = evaluation.correct,
        similarity = evaluation.similarity,
        "answer evaluated"
    );

    // Fire-and-forget: the response never waits on the progress store
    if let (Some(deck_id), Some(card_index)) = (payload.deck_id, payload.card_index) {
        state.progress.record(ProgressUpdate {
            deck_id,
            card_index,
            score: evaluation.score,
            correct: evaluation.correct,
            recorded_at: Utc::now(),
        });
    }

    Ok(Json(evaluation))
}

/// Produce the partially-masked preferred answer for the current question.
async fn hint_answer(Json(payload): Json<HintRequest>) -> Result<Json<HintResponse>, ApiError> {
    validate_accepted_answers(&payload.accepted_answers)?;
    validate_text("draft_input", &payload.draft_input)?;

    let set = match payload.preferred_index {
        Some(index) => AnswerSet::with_preferred(payload.accepted_answers, index),
        None => AnswerSet::new(payload.accepted_answers),
    };
    let hint = set.hint(payload.reveal_count as usize, &payload.draft_input);

    metrics::record_hint();

    Ok(Json(HintResponse { hint }))
}

/// Expose the normalizer so the frontend can preview comparison forms.
async fn normalize_text(
    Json(payload): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, ApiError> {
    validate_text("text", &payload.text)?;

    Ok(Json(NormalizeResponse {
        normalized: normalize(&payload.text),
    }))
}
