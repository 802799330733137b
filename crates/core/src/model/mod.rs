mod help;
mod question;
mod record;
mod summary;

pub use help::{HelpCounters, HelpKind};
pub use question::{
    ANSWER_COUNT, AnswerId, Question, QuestionError, QuestionRecord, QuestionSet,
    QuestionSetError,
};
pub use record::AnswerRecord;
pub use summary::QuizSummary;
