use crate::model::AnswerRecord;

/// Aggregate result of a finished quiz session.
///
/// A pure derivation of the answer log: computing it again over the same
/// records yields an identical summary.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSummary {
    correct: usize,
    total: usize,
    records: Vec<AnswerRecord>,
}

impl QuizSummary {
    /// Build a summary from the answer log, preserving question order.
    #[must_use]
    pub fn from_records(records: &[AnswerRecord]) -> Self {
        let correct = records.iter().filter(|record| record.is_correct).count();
        Self {
            correct,
            total: records.len(),
            records: records.to_vec(),
        }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of correct answers in percent, rounded to one decimal.
    ///
    /// `0.0` when no questions were answered.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let raw = self.correct as f64 / self.total as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }

    /// The full answer log in original question order.
    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, is_correct: bool) -> AnswerRecord {
        AnswerRecord::new(index, format!("Q{index}"), is_correct, "a".to_owned())
    }

    #[test]
    fn percentage_is_zero_without_answers() {
        let summary = QuizSummary::from_records(&[]);
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.percentage(), 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        let records: Vec<_> = (0..10).map(|i| record(i, i < 7)).collect();
        let summary = QuizSummary::from_records(&records);

        assert_eq!(summary.correct(), 7);
        assert_eq!(summary.total(), 10);
        assert_eq!(summary.percentage(), 70.0);

        let third: Vec<_> = (0..3).map(|i| record(i, i == 0)).collect();
        assert_eq!(QuizSummary::from_records(&third).percentage(), 33.3);
    }

    #[test]
    fn summary_is_repeatable_and_keeps_order() {
        let records = vec![record(0, true), record(1, false), record(2, true)];

        let first = QuizSummary::from_records(&records);
        let second = QuizSummary::from_records(&records);

        assert_eq!(first, second);
        let indices: Vec<_> = first.records().iter().map(|r| r.question_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
