use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;
use tracing::{debug, info};

use quiz_core::model::{
    ANSWER_COUNT, AnswerId, AnswerRecord, HelpCounters, HelpKind, Question, QuestionSet,
    QuizSummary,
};

use super::progress::SessionProgress;
use crate::error::{SessionError, SettingsError, Unavailable};

/// Delay between locking a selection and revealing the verdict.
pub const DEFAULT_REVEAL_DELAY_MS: i64 = 5_000;

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration for one quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    half: u32,
    hint: u32,
    double: u32,
    reveal_delay: Duration,
    shuffle_answers: bool,
}

impl SessionSettings {
    /// Creates custom session settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRevealDelay` when the delay is not
    /// positive.
    pub fn new(
        half: u32,
        hint: u32,
        double: u32,
        reveal_delay: Duration,
    ) -> Result<Self, SettingsError> {
        if reveal_delay <= Duration::zero() {
            return Err(SettingsError::InvalidRevealDelay);
        }
        Ok(Self {
            half,
            hint,
            double,
            reveal_delay,
            shuffle_answers: true,
        })
    }

    /// Disable the presentation shuffle for deterministic harnesses.
    #[must_use]
    pub fn with_shuffle_answers(mut self, shuffle: bool) -> Self {
        self.shuffle_answers = shuffle;
        self
    }

    #[must_use]
    pub fn initial_counters(&self) -> HelpCounters {
        HelpCounters::new(self.half, self.hint, self.double)
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            half: 1,
            hint: 1,
            double: 1,
            reveal_delay: Duration::milliseconds(DEFAULT_REVEAL_DELAY_MS),
            shuffle_answers: true,
        }
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Per-question phase of the answer state machine.
///
/// `Locked` is the only mutual-exclusion mechanism: while it holds, no
/// command mutates state and nothing is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    /// Accepting selections.
    Open,
    /// Evaluation in progress; the reveal fires at the recorded instant.
    Locked { reveal_at: DateTime<Utc> },
    /// Verdict visible; advancing is now possible.
    Revealed,
}

/// Result of a `select` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The selection was not applicable (locked, hidden or unknown answer)
    /// and nothing changed.
    Ignored,
    /// Double-chance mode: the pick was toggled and more input is expected.
    Pending { selected: usize },
    /// The question is locked for evaluation; feedback reveals at the given
    /// instant.
    Locked { reveal_at: DateTime<Utc> },
}

/// Result of an `advance` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The next question is open.
    Next,
    /// The question set is exhausted; the summary is available.
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session stepping through a question set.
///
/// All state lives in this one context object; timestamps come from the
/// caller so the services layer clock stays in charge of time.
pub struct QuizSession {
    questions: QuestionSet,
    settings: SessionSettings,
    counters: HelpCounters,
    current: usize,
    phase: QuestionPhase,
    presentation: Vec<AnswerId>,
    hidden: [bool; ANSWER_COUNT],
    selections: Vec<AnswerId>,
    double_active: bool,
    hint_visible: bool,
    records: Vec<AnswerRecord>,
    correct_count: usize,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    rng: StdRng,
}

impl QuizSession {
    /// Create a session positioned on the first question.
    ///
    /// `started_at` should come from the services layer clock.
    #[must_use]
    pub fn new(questions: QuestionSet, settings: SessionSettings, started_at: DateTime<Utc>) -> Self {
        let counters = settings.initial_counters();
        let mut session = Self {
            questions,
            settings,
            counters,
            current: 0,
            phase: QuestionPhase::Open,
            presentation: Vec::with_capacity(ANSWER_COUNT),
            hidden: [false; ANSWER_COUNT],
            selections: Vec::with_capacity(2),
            double_active: false,
            hint_visible: false,
            records: Vec::new(),
            correct_count: 0,
            started_at,
            finished_at: None,
            rng: StdRng::from_os_rng(),
        };
        session.enter_question();
        session
    }

    /// Reseed the session RNG for deterministic shuffles in tests.
    ///
    /// Re-enters the current question so the presentation order reflects the
    /// seed.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        if !self.is_finished() && self.records.len() == self.current {
            self.enter_question();
        }
        self
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub fn counters(&self) -> HelpCounters {
        self.counters
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn phase(&self) -> QuestionPhase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Display order of the active question's answers.
    #[must_use]
    pub fn presentation(&self) -> &[AnswerId] {
        &self.presentation
    }

    /// Whether the answer was removed from play by the half aid.
    #[must_use]
    pub fn is_hidden(&self, id: AnswerId) -> bool {
        self.hidden.get(id.value()).copied().unwrap_or(false)
    }

    /// Current picks in selection order (at most two).
    #[must_use]
    pub fn selections(&self) -> &[AnswerId] {
        &self.selections
    }

    #[must_use]
    pub fn double_active(&self) -> bool {
        self.double_active
    }

    #[must_use]
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    #[must_use]
    pub fn trivia_visible(&self) -> bool {
        matches!(self.phase, QuestionPhase::Revealed)
    }

    /// Instant the pending reveal fires, while locked.
    #[must_use]
    pub fn reveal_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            QuestionPhase::Locked { reveal_at } => Some(reveal_at),
            _ => None,
        }
    }

    /// The append-only answer log in question order.
    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.questions.len(),
            answered: self.records.len(),
            remaining: self.questions.len().saturating_sub(self.current),
            is_complete: self.is_finished(),
        }
    }

    /// Aggregate result, available once the session is finished.
    ///
    /// Pure over the answer log: repeated calls return identical summaries.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.is_finished()
            .then(|| QuizSummary::from_records(&self.records))
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────
    //

    /// Apply a selection to the active question.
    ///
    /// Normal mode locks immediately; double-chance mode toggles membership
    /// and locks at the second pick. Selections while locked or revealed,
    /// of hidden answers, or of unknown ids are ignored without mutation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last question.
    pub fn select(
        &mut self,
        id: AnswerId,
        now: DateTime<Utc>,
    ) -> Result<SelectOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if !matches!(self.phase, QuestionPhase::Open) {
            return Ok(SelectOutcome::Ignored);
        }
        if id.value() >= ANSWER_COUNT || self.is_hidden(id) {
            return Ok(SelectOutcome::Ignored);
        }

        if self.double_active {
            if let Some(position) = self.selections.iter().position(|picked| *picked == id) {
                self.selections.remove(position);
                return Ok(SelectOutcome::Pending {
                    selected: self.selections.len(),
                });
            }
            self.selections.push(id);
            if self.selections.len() < 2 {
                return Ok(SelectOutcome::Pending {
                    selected: self.selections.len(),
                });
            }
        } else {
            self.selections.push(id);
        }

        let reveal_at = now + self.settings.reveal_delay;
        self.phase = QuestionPhase::Locked { reveal_at };
        debug!(question = self.current, picks = self.selections.len(), "selection locked");
        Ok(SelectOutcome::Locked { reveal_at })
    }

    /// Fire the scheduled reveal once its instant has passed.
    ///
    /// Returns the committed record on the lock-to-reveal transition and
    /// `None` otherwise (not locked, or the delay has not elapsed). Scoring
    /// commits exactly once per question here.
    pub fn try_reveal(&mut self, now: DateTime<Utc>) -> Option<&AnswerRecord> {
        let QuestionPhase::Locked { reveal_at } = self.phase else {
            return None;
        };
        if now < reveal_at {
            return None;
        }

        let question = self.questions.get(self.current)?;
        let is_correct = self.selections.contains(&AnswerId::CORRECT);
        let user_answer_text = self
            .selections
            .iter()
            .filter_map(|picked| question.answer(*picked))
            .collect::<Vec<_>>()
            .join(", ");

        self.records.push(AnswerRecord::new(
            self.current,
            question.text().to_owned(),
            is_correct,
            user_answer_text,
        ));
        if is_correct {
            self.correct_count += 1;
        }
        self.phase = QuestionPhase::Revealed;
        debug!(question = self.current, is_correct, "verdict revealed");
        self.records.last()
    }

    /// Step to the next question, or finish the session.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last question and
    /// `SessionError::NotRevealed` before the verdict is visible.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if !matches!(self.phase, QuestionPhase::Revealed) {
            return Err(SessionError::NotRevealed);
        }

        self.current += 1;
        if self.current >= self.questions.len() {
            self.finished_at = Some(now);
            info!(
                correct = self.correct_count,
                total = self.records.len(),
                "session finished"
            );
            return Ok(AdvanceOutcome::Finished);
        }

        self.enter_question();
        Ok(AdvanceOutcome::Next)
    }

    /// Spend a help aid on the active question.
    ///
    /// All aids require an open question and a positive counter; a failed
    /// request mutates nothing.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` with the reason the aid cannot be applied.
    pub fn use_help(&mut self, kind: HelpKind) -> Result<(), Unavailable> {
        if self.is_finished() || !matches!(self.phase, QuestionPhase::Open) {
            return Err(Unavailable::Locked);
        }

        match kind {
            HelpKind::Half => self.use_half()?,
            HelpKind::Hint => self.use_hint()?,
            HelpKind::Double => self.use_double()?,
        }

        debug!(
            aid = kind.as_str(),
            remaining = self.counters.get(kind),
            "help aid used"
        );
        Ok(())
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────
    //

    fn use_half(&mut self) -> Result<(), Unavailable> {
        if self.counters.get(HelpKind::Half) == 0 {
            return Err(Unavailable::Exhausted);
        }

        // Incorrect, still visible, and not part of a pending double pick.
        let mut candidates: Vec<usize> = (1..ANSWER_COUNT)
            .filter(|index| {
                !self.hidden[*index] && !self.selections.contains(&AnswerId::new(*index))
            })
            .collect();
        if candidates.len() < 2 {
            return Err(Unavailable::NotEnoughCandidates);
        }

        candidates.shuffle(&mut self.rng);
        self.counters.consume(HelpKind::Half);
        for index in candidates.into_iter().take(2) {
            self.hidden[index] = true;
        }
        Ok(())
    }

    fn use_hint(&mut self) -> Result<(), Unavailable> {
        if self.counters.get(HelpKind::Hint) == 0 {
            return Err(Unavailable::Exhausted);
        }
        let has_hint = self
            .current_question()
            .is_some_and(|question| question.hint().is_some());
        if !has_hint {
            return Err(Unavailable::NoHint);
        }
        if self.hint_visible {
            return Err(Unavailable::AlreadyActive);
        }

        self.counters.consume(HelpKind::Hint);
        self.hint_visible = true;
        Ok(())
    }

    fn use_double(&mut self) -> Result<(), Unavailable> {
        if self.counters.get(HelpKind::Double) == 0 {
            return Err(Unavailable::Exhausted);
        }
        if self.double_active {
            return Err(Unavailable::AlreadyActive);
        }

        self.counters.consume(HelpKind::Double);
        self.double_active = true;
        Ok(())
    }

    fn enter_question(&mut self) {
        self.phase = QuestionPhase::Open;
        self.presentation = (0..ANSWER_COUNT).map(AnswerId::new).collect();
        if self.settings.shuffle_answers {
            self.presentation.shuffle(&mut self.rng);
        }
        self.hidden = [false; ANSWER_COUNT];
        self.selections.clear();
        self.double_active = false;
        self.hint_visible = false;
        debug!(question = self.current, "question opened");
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("records_len", &self.records.len())
            .field("counters", &self.counters)
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
