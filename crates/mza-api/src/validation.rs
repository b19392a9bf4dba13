use crate::error::ApiError;

/// Longest accepted answer or candidate, in characters. Answers are short
/// phrases; anything longer is a malformed request, not a study answer.
pub const MAX_TEXT_CHARS: usize = 1_000;

/// Most accepted answers one question may carry.
pub const MAX_ACCEPTED_ANSWERS: usize = 64;

/// Validate a learner's submitted answer.
///
/// The evaluator itself never fails, but an empty submission on the live
/// input path is a caller mistake: reject it at the boundary instead of
/// returning an honest-but-useless score of 1.
pub fn validate_candidate(candidate: &str) -> Result<(), ApiError> {
    if candidate.trim().is_empty() {
        return Err(ApiError::Validation(
            "Candidate answer cannot be empty".to_string(),
        ));
    }
    validate_text("candidate", candidate)
}

/// Validate free text fields (candidate, draft input, normalize payloads).
pub fn validate_text(field: &str, text: &str) -> Result<(), ApiError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ApiError::Validation(format!(
            "Field '{field}' exceeds {MAX_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate an accepted-answer list. An empty list is legal (a question
/// with no known answer scores 1), but oversized lists or entries are not.
pub fn validate_accepted_answers(answers: &[String]) -> Result<(), ApiError> {
    if answers.len() > MAX_ACCEPTED_ANSWERS {
        return Err(ApiError::Validation(format!(
            "At most {MAX_ACCEPTED_ANSWERS} accepted answers per question"
        )));
    }
    for answer in answers {
        validate_text("accepted_answers", answer)?;
    }
    Ok(())
}
