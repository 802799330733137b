//! Data-side authoring operations behind the quiz editor.
//!
//! The editor UI is an external collaborator; this module owns the draft
//! list it manipulates: add, update, remove, reorder and export. Drafts may
//! hold records that would not validate yet; validation happens when the
//! draft is turned into a playable set.

use quiz_core::model::{QuestionRecord, QuestionSet, QuestionSetError};

use crate::error::{AuthoringError, MalformedData};

/// Mutable question list under authoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizEditor {
    records: Vec<QuestionRecord>,
}

impl QuizEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }

    /// Load an existing quiz file into the editor without validating it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedData::Parse` when the JSON cannot be read.
    pub fn from_json(raw: &str) -> Result<Self, MalformedData> {
        let records: Vec<QuestionRecord> = serde_json::from_str(raw)?;
        Ok(Self { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn add(&mut self, record: QuestionRecord) {
        self.records.push(record);
    }

    /// Replace the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::OutOfRange` for an unknown index.
    pub fn update(&mut self, index: usize, record: QuestionRecord) -> Result<(), AuthoringError> {
        let slot = self
            .records
            .get_mut(index)
            .ok_or(AuthoringError::OutOfRange { index })?;
        *slot = record;
        Ok(())
    }

    /// Remove and return the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::OutOfRange` for an unknown index.
    pub fn remove(&mut self, index: usize) -> Result<QuestionRecord, AuthoringError> {
        if index >= self.records.len() {
            return Err(AuthoringError::OutOfRange { index });
        }
        Ok(self.records.remove(index))
    }

    /// Reorder a question: remove it at `from`, reinsert at `to`.
    ///
    /// `to` addresses the list after removal (splice semantics of the
    /// original drag-and-drop reorder) and is clamped to the end.
    ///
    /// # Errors
    ///
    /// Returns `AuthoringError::OutOfRange` when `from` is unknown.
    pub fn move_question(&mut self, from: usize, to: usize) -> Result<(), AuthoringError> {
        if from >= self.records.len() {
            return Err(AuthoringError::OutOfRange { index: from });
        }
        let record = self.records.remove(from);
        let target = to.min(self.records.len());
        self.records.insert(target, record);
        Ok(())
    }

    /// Serialize the draft to the external JSON format (pretty-printed, the
    /// shape the loader consumes).
    ///
    /// # Errors
    ///
    /// Returns the underlying serializer error.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records)
    }

    /// Validate the draft into a playable `QuestionSet`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError` when the draft is empty or a record fails
    /// validation.
    pub fn into_question_set(self) -> Result<QuestionSet, QuestionSetError> {
        QuestionSet::from_records(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_question_set;

    fn record(question: &str) -> QuestionRecord {
        QuestionRecord {
            question: question.to_owned(),
            answers: ["a", "b", "c", "d"].iter().map(|a| (*a).to_owned()).collect(),
            image: String::new(),
            hint: String::new(),
            trivia: String::new(),
        }
    }

    fn titles(editor: &QuizEditor) -> Vec<&str> {
        editor.records().iter().map(|r| r.question.as_str()).collect()
    }

    #[test]
    fn add_update_remove() {
        let mut editor = QuizEditor::new();
        editor.add(record("Q1"));
        editor.add(record("Q2"));

        editor.update(1, record("Q2b")).unwrap();
        assert_eq!(titles(&editor), vec!["Q1", "Q2b"]);

        let removed = editor.remove(0).unwrap();
        assert_eq!(removed.question, "Q1");
        assert_eq!(editor.len(), 1);

        assert_eq!(
            editor.update(5, record("X")).unwrap_err(),
            AuthoringError::OutOfRange { index: 5 }
        );
    }

    #[test]
    fn move_question_uses_splice_semantics() {
        let mut editor =
            QuizEditor::from_records(vec![record("Q1"), record("Q2"), record("Q3")]);

        editor.move_question(0, 2).unwrap();
        assert_eq!(titles(&editor), vec!["Q2", "Q3", "Q1"]);

        editor.move_question(2, 0).unwrap();
        assert_eq!(titles(&editor), vec!["Q1", "Q2", "Q3"]);

        // Past-the-end targets clamp to the tail.
        editor.move_question(0, 99).unwrap();
        assert_eq!(titles(&editor), vec!["Q2", "Q3", "Q1"]);
    }

    #[test]
    fn exported_draft_reloads_through_the_loader() {
        let mut editor = QuizEditor::new();
        editor.add(record("Q1"));

        let json = editor.export_json().unwrap();
        let set = load_question_set(&json).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().text(), "Q1");
    }

    #[test]
    fn draft_validation_is_deferred_to_set_conversion() {
        let mut bad = record("Q1");
        bad.answers.pop();
        let editor = QuizEditor::from_records(vec![bad]);

        assert!(editor.clone().into_question_set().is_err());
    }
}
