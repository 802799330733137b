use quiz_core::locale::{Catalog, LocaleKey};
use quiz_core::model::{AnswerId, HelpCounters, QuizSummary};

use super::service::{QuestionPhase, QuizSession};
use super::progress::SessionProgress;

/// One answer choice in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoiceView {
    pub id: AnswerId,
    pub text: String,
    /// Removed from play by the half aid.
    pub hidden: bool,
    /// Part of the pending double-chance picks.
    pub selected: bool,
}

/// Presentation-agnostic snapshot of the active question.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The render layer decides letters, colors and layout; correctness stays
/// invisible until `revealed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub image: Option<String>,
    /// Choices in display order, shuffled once per question entry.
    pub answers: Vec<AnswerChoiceView>,
    /// Hint text, present only while exposed by the hint aid.
    pub hint: Option<String>,
    /// Trivia text, present only once the verdict is revealed.
    pub trivia: Option<String>,
    pub counters: HelpCounters,
    pub double_active: bool,
    pub locked: bool,
    pub revealed: bool,
    pub progress: SessionProgress,
}

impl QuestionView {
    /// Snapshot the session's active question, or `None` once finished.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;

        let answers = session
            .presentation()
            .iter()
            .filter_map(|id| {
                question.answer(*id).map(|text| AnswerChoiceView {
                    id: *id,
                    text: text.to_owned(),
                    hidden: session.is_hidden(*id),
                    selected: session.selections().contains(id),
                })
            })
            .collect();

        Some(Self {
            index: session.current_index(),
            text: question.text().to_owned(),
            image: question.image().map(str::to_owned),
            answers,
            hint: session
                .hint_visible()
                .then(|| question.hint().unwrap_or_default().to_owned()),
            trivia: session
                .trivia_visible()
                .then(|| question.trivia().map(str::to_owned))
                .flatten(),
            counters: session.counters(),
            double_active: session.double_active(),
            locked: matches!(session.phase(), QuestionPhase::Locked { .. }),
            revealed: matches!(session.phase(), QuestionPhase::Revealed),
            progress: session.progress(),
        })
    }
}

/// Render the final report with locale-supplied display text.
///
/// One results line from the catalog template, then the answer log in
/// question order.
#[must_use]
pub fn render_report(summary: &QuizSummary, catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str(catalog.get(LocaleKey::FinishTitle));
    out.push('\n');
    out.push_str(&catalog.results_line(
        summary.correct(),
        summary.total(),
        summary.percentage(),
    ));
    out.push('\n');

    for record in summary.records() {
        let verdict = if record.is_correct {
            catalog.get(LocaleKey::AnswerCorrect)
        } else {
            catalog.get(LocaleKey::AnswerIncorrect)
        };
        out.push_str(&format!(
            "{}. {}: {} ({verdict})\n",
            record.question_index + 1,
            record.question_text,
            record.user_answer_text,
        ));
    }
    out
}
