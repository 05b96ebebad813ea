use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Yes/no answers keyed by question id.
///
/// The set only grows during a questionnaire pass; it is dropped as a whole on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, bool>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, question_id: &str, answer: bool) {
        self.0.insert(question_id.to_string(), answer);
    }

    pub fn get(&self, question_id: &str) -> Option<bool> {
        self.0.get(question_id).copied()
    }

    /// `true` only if the question was answered "yes".
    pub fn is_yes(&self, question_id: &str) -> bool {
        self.get(question_id).unwrap_or(false)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, bool>> for AnswerSet {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, bool)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
