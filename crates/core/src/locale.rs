//! Display-string catalog fed by an external locale collaborator.
//!
//! The collaborator supplies `key=value` pairs (the original locale files are
//! INI-style); the core only knows an enumerated set of keys, each with a
//! built-in fallback, so a lookup can never fail and never blocks progress.

use std::collections::HashMap;

/// Known display-text keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleKey {
    /// Results line template with `{correct}`, `{total}` and `{percent}`
    /// placeholders, substituted verbatim.
    ResultsTemplate,
    FinishTitle,
    AnswerCorrect,
    AnswerIncorrect,
    HintCaption,
    TriviaCaption,
    HelpHalf,
    HelpHint,
    HelpDouble,
}

impl LocaleKey {
    pub const ALL: [LocaleKey; 9] = [
        LocaleKey::ResultsTemplate,
        LocaleKey::FinishTitle,
        LocaleKey::AnswerCorrect,
        LocaleKey::AnswerIncorrect,
        LocaleKey::HintCaption,
        LocaleKey::TriviaCaption,
        LocaleKey::HelpHalf,
        LocaleKey::HelpHint,
        LocaleKey::HelpDouble,
    ];

    /// Key name as it appears in locale files.
    #[must_use]
    pub fn ini_key(self) -> &'static str {
        match self {
            LocaleKey::ResultsTemplate => "results_template",
            LocaleKey::FinishTitle => "finish_title",
            LocaleKey::AnswerCorrect => "answer_correct",
            LocaleKey::AnswerIncorrect => "answer_incorrect",
            LocaleKey::HintCaption => "hint_caption",
            LocaleKey::TriviaCaption => "trivia_caption",
            LocaleKey::HelpHalf => "help_half",
            LocaleKey::HelpHint => "help_hint",
            LocaleKey::HelpDouble => "help_double",
        }
    }

    /// Built-in text used when the catalog has no entry for this key.
    #[must_use]
    pub fn fallback(self) -> &'static str {
        match self {
            LocaleKey::ResultsTemplate => {
                "You answered {correct} of {total} questions correctly ({percent}%)."
            }
            LocaleKey::FinishTitle => "Quiz complete!",
            LocaleKey::AnswerCorrect => "correct",
            LocaleKey::AnswerIncorrect => "incorrect",
            LocaleKey::HintCaption => "Hint",
            LocaleKey::TriviaCaption => "Did you know?",
            LocaleKey::HelpHalf => "50:50",
            LocaleKey::HelpHint => "Hint",
            LocaleKey::HelpDouble => "Double chance",
        }
    }

    fn from_ini_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.ini_key() == raw)
    }
}

/// Parse INI-style `key=value` lines.
///
/// Blank lines and `;`/`#` comments are skipped; values split at the first
/// `=`. Lines without a `=` are ignored rather than rejected, matching the
/// tolerant behavior of the original locale loader.
#[must_use]
pub fn parse_ini(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        pairs.push((key.trim().to_owned(), value.trim().to_owned()));
    }
    pairs
}

/// Key to display-string catalog with per-key fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<LocaleKey, String>,
}

impl Catalog {
    /// Build a catalog from raw `(key, value)` pairs; unknown keys are
    /// ignored.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let entries = pairs
            .into_iter()
            .filter_map(|(key, value)| LocaleKey::from_ini_key(&key).map(|k| (k, value)))
            .collect();
        Self { entries }
    }

    /// Build a catalog from INI-style locale text.
    #[must_use]
    pub fn from_ini(text: &str) -> Self {
        Self::from_pairs(parse_ini(text))
    }

    /// Look up a display string, falling back to the built-in default.
    #[must_use]
    pub fn get(&self, key: LocaleKey) -> &str {
        self.entries
            .get(&key)
            .map_or_else(|| key.fallback(), String::as_str)
    }

    /// Render the results line, substituting the `{correct}`, `{total}` and
    /// `{percent}` placeholders verbatim.
    #[must_use]
    pub fn results_line(&self, correct: usize, total: usize, percentage: f64) -> String {
        self.get(LocaleKey::ResultsTemplate)
            .replace("{correct}", &correct.to_string())
            .replace("{total}", &total.to_string())
            .replace("{percent}", &format!("{percentage:.1}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ini_skips_comments_and_splits_at_first_equals() {
        let text = "\n; comment\n# another\nfinish_title=Kész!\nresults_template={correct}/{total} = {percent}%\nbroken line\n";
        let pairs = parse_ini(text);

        assert_eq!(
            pairs,
            vec![
                ("finish_title".to_owned(), "Kész!".to_owned()),
                (
                    "results_template".to_owned(),
                    "{correct}/{total} = {percent}%".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn catalog_falls_back_on_missing_and_ignores_unknown_keys() {
        let catalog = Catalog::from_ini("finish_title=Vége\nnot_a_known_key=whatever\n");

        assert_eq!(catalog.get(LocaleKey::FinishTitle), "Vége");
        assert_eq!(catalog.get(LocaleKey::HelpHalf), "50:50");
    }

    #[test]
    fn results_line_substitutes_placeholders_verbatim() {
        let catalog = Catalog::from_ini("results_template={correct}/{total} ({percent}%)\n");
        assert_eq!(catalog.results_line(7, 10, 70.0), "7/10 (70.0%)");
    }

    #[test]
    fn results_line_uses_fallback_template() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.results_line(1, 2, 50.0),
            "You answered 1 of 2 questions correctly (50.0%)."
        );
    }
}
