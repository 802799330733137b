use tracing::debug;

use quiz_core::model::{QuestionRecord, QuestionSet};

use crate::error::MalformedData;

/// Parse the external JSON question format into a validated `QuestionSet`.
///
/// The input is an array of records with `question`, four `answers` (first
/// one correct) and optional `image`/`hint`/`trivia` strings. Any malformed
/// record rejects the entire load.
///
/// # Errors
///
/// Returns `MalformedData` for unparseable JSON, an empty array, or a record
/// that fails validation.
pub fn load_question_set(raw: &str) -> Result<QuestionSet, MalformedData> {
    let records: Vec<QuestionRecord> = serde_json::from_str(raw)?;
    let set = QuestionSet::from_records(records)?;
    debug!(questions = set.len(), "question set loaded");
    Ok(set)
}
