use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Every question carries exactly this many answers.
pub const ANSWER_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("expected exactly 4 answers, got {got}")]
    WrongAnswerCount { got: usize },

    #[error("answer {index} cannot be empty")]
    EmptyAnswer { index: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionSetError {
    #[error("question set is empty")]
    Empty,

    #[error("question {index}: {source}")]
    Question {
        index: usize,
        source: QuestionError,
    },
}

//
// ─── ANSWER IDENTITY ───────────────────────────────────────────────────────────
//

/// Identity of an answer: its slot in storage order.
///
/// Display order is a per-question permutation of these ids; correctness is
/// always decided by comparing ids, never display positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerId(usize);

impl AnswerId {
    /// The storage slot that always holds the correct answer.
    pub const CORRECT: AnswerId = AnswerId(0);

    /// Creates a new `AnswerId`
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying storage index
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// Returns true for the id of the correct answer.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        *self == Self::CORRECT
    }
}

impl fmt::Debug for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnswerId({})", self.0)
    }
}

//
// ─── INPUT RECORD ──────────────────────────────────────────────────────────────
//

/// Raw question record in the external JSON format.
///
/// The external format uses empty strings for missing optional fields, so
/// `image`, `hint` and `trivia` default to `""` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answers: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub trivia: String,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated quiz question.
///
/// The answer at storage index 0 is the correct one, independent of any
/// display shuffle applied later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: [String; ANSWER_COUNT],
    image: Option<String>,
    hint: Option<String>,
    trivia: Option<String>,
}

impl Question {
    /// Validate a raw record into a `Question`.
    ///
    /// Empty optional fields are normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, the answer count is not
    /// exactly four, or an answer is blank.
    pub fn from_record(record: QuestionRecord) -> Result<Self, QuestionError> {
        let text = record.question.trim();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        let text = text.to_owned();

        let got = record.answers.len();
        let answers: [String; ANSWER_COUNT] = record
            .answers
            .try_into()
            .map_err(|_| QuestionError::WrongAnswerCount { got })?;

        for (index, answer) in answers.iter().enumerate() {
            if answer.trim().is_empty() {
                return Err(QuestionError::EmptyAnswer { index });
            }
        }

        Ok(Self {
            text,
            answers,
            image: none_if_blank(record.image),
            hint: none_if_blank(record.hint),
            trivia: none_if_blank(record.trivia),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[String; ANSWER_COUNT] {
        &self.answers
    }

    /// Returns the answer text for the given id, or `None` when out of range.
    #[must_use]
    pub fn answer(&self, id: AnswerId) -> Option<&str> {
        self.answers.get(id.value()).map(String::as_str)
    }

    /// Text of the correct answer.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.answers[AnswerId::CORRECT.value()]
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[must_use]
    pub fn trivia(&self) -> Option<&str> {
        self.trivia.as_deref()
    }
}

fn none_if_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Immutable ordered set of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate raw records into a `QuestionSet`.
    ///
    /// Any invalid record rejects the whole load; no partial set is produced.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::Empty` for an empty input, or
    /// `QuestionSetError::Question` carrying the index of the first record
    /// that fails validation.
    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self, QuestionSetError> {
        if records.is_empty() {
            return Err(QuestionSetError::Empty);
        }

        let mut questions = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let question = Question::from_record(record)
                .map_err(|source| QuestionSetError::Question { index, source })?;
            questions.push(question);
        }

        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
