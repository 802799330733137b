//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionSetError;

/// Question-set input that cannot be turned into a playable session.
///
/// Any violation rejects the whole load; the session never starts on
/// malformed data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MalformedData {
    #[error("question data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] QuestionSetError),
}

/// A help aid request that cannot be honored right now.
///
/// Failures never mutate state; the caller decides what feedback to show.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Unavailable {
    #[error("no open question is accepting input")]
    Locked,
    #[error("no uses of this help aid remain")]
    Exhausted,
    #[error("the current question has no hint")]
    NoHint,
    #[error("this help aid is already active for the current question")]
    AlreadyActive,
    #[error("fewer than two answers qualify for removal")]
    NotEnoughCandidates,
}

/// Command issued out of sequence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("the session is already finished")]
    Finished,
    #[error("advance is only possible once feedback is revealed")]
    NotRevealed,
    #[error("no evaluation is pending")]
    NotLocked,
}

/// Invalid session settings.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("reveal delay must be positive")]
    InvalidRevealDelay,
}

/// Errors emitted by the authoring operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error("question index {index} is out of range")]
    OutOfRange { index: usize },
}
