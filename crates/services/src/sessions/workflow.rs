use quiz_core::Clock;
use quiz_core::model::{AnswerId, AnswerRecord};

use super::service::{AdvanceOutcome, QuizSession, SelectOutcome};
use crate::error::SessionError;

/// Drives a session against the services layer clock.
///
/// The lock-to-reveal transition is the session's only suspension point;
/// `run_reveal` sleeps out the remaining delay and fires it at the scheduled
/// instant. There is no cancellation path: once a selection locks, the
/// verdict always reveals.
#[derive(Debug, Clone, Copy)]
pub struct RevealDriver {
    clock: Clock,
}

impl RevealDriver {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Apply a selection stamped with the driver clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last question.
    pub fn select_answer(
        &self,
        session: &mut QuizSession,
        id: AnswerId,
    ) -> Result<SelectOutcome, SessionError> {
        session.select(id, self.clock.now())
    }

    /// Wait out the pending reveal delay and fire the reveal.
    ///
    /// Fires at the scheduled instant even under a fixed clock, so tests
    /// with a paused runtime stay deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLocked` when no evaluation is pending.
    pub async fn run_reveal(&self, session: &mut QuizSession) -> Result<AnswerRecord, SessionError> {
        let reveal_at = session.reveal_at().ok_or(SessionError::NotLocked)?;

        if let Ok(wait) = (reveal_at - self.clock.now()).to_std() {
            tokio::time::sleep(wait).await;
        }

        session
            .try_reveal(reveal_at)
            .cloned()
            .ok_or(SessionError::NotLocked)
    }

    /// Step to the next question stamped with the driver clock.
    ///
    /// # Errors
    ///
    /// Propagates the session's sequencing errors.
    pub fn advance(&self, session: &mut QuizSession) -> Result<AdvanceOutcome, SessionError> {
        session.advance(self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::SessionSettings;
    use quiz_core::model::{QuestionRecord, QuestionSet};
    use quiz_core::time::{fixed_clock, fixed_now};
    use std::time::Duration as StdDuration;

    fn one_question_session() -> QuizSession {
        let record = QuestionRecord {
            question: "Capital of France?".to_owned(),
            answers: ["Paris", "London", "Berlin", "Madrid"]
                .iter()
                .map(|a| (*a).to_owned())
                .collect(),
            image: String::new(),
            hint: String::new(),
            trivia: String::new(),
        };
        let set = QuestionSet::from_records(vec![record]).unwrap();
        QuizSession::new(set, SessionSettings::default(), fixed_now()).with_rng_seed(3)
    }

    #[tokio::test(start_paused = true)]
    async fn run_reveal_fires_after_the_full_delay() {
        let mut session = one_question_session();
        let driver = RevealDriver::new(fixed_clock());

        driver
            .select_answer(&mut session, AnswerId::CORRECT)
            .unwrap();

        let before = tokio::time::Instant::now();
        let record = driver.run_reveal(&mut session).await.unwrap();
        let waited = tokio::time::Instant::now() - before;

        assert!(record.is_correct);
        assert_eq!(waited, StdDuration::from_millis(5_000));
        assert_eq!(driver.advance(&mut session).unwrap(), AdvanceOutcome::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn run_reveal_without_a_lock_is_an_error() {
        let mut session = one_question_session();
        let driver = RevealDriver::new(fixed_clock());

        let err = driver.run_reveal(&mut session).await.unwrap_err();
        assert_eq!(err, SessionError::NotLocked);
    }
}
