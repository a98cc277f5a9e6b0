use serde::{Deserialize, Serialize};

use crate::models::domain::OptionLetter;

/// Parallel arrays of correct letters and explanations, index-aligned with the
/// parsed question list. Built only from quiz text that passed validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerKey {
    pub correct_answers: Vec<OptionLetter>,
    pub explanations: Vec<String>,
}

impl AnswerKey {
    pub fn len(&self) -> usize {
        self.correct_answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correct_answers.is_empty()
    }

    pub fn correct_answer(&self, index: usize) -> Option<OptionLetter> {
        self.correct_answers.get(index).copied()
    }

    pub fn explanation(&self, index: usize) -> Option<&str> {
        self.explanations.get(index).map(String::as_str)
    }
}
