mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{SessionError, Unavailable};
pub use progress::SessionProgress;
pub use service::{
    AdvanceOutcome, DEFAULT_REVEAL_DELAY_MS, QuestionPhase, QuizSession, SelectOutcome,
    SessionSettings,
};
pub use view::{AnswerChoiceView, QuestionView, render_report};
pub use workflow::RevealDriver;
