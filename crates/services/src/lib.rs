#![forbid(unsafe_code)]

pub mod authoring;
pub mod error;
pub mod loader;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{AuthoringError, MalformedData, SessionError, SettingsError, Unavailable};
pub use loader::load_question_set;

pub use sessions::{
    AdvanceOutcome, AnswerChoiceView, QuestionPhase, QuestionView, QuizSession, RevealDriver,
    SelectOutcome, SessionProgress, SessionSettings,
};
