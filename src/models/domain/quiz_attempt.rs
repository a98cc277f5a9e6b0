use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::OptionLetter;

/// One graded submission. Created at submit time, applied to the player's
/// progress immediately, then kept read-only for the results view until the
/// next quiz starts.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub user_answers: Vec<OptionLetter>,
    pub correct_count: usize,
    pub question_count: usize,
    /// 1-based numbers of the questions answered incorrectly.
    pub wrong_questions: Vec<usize>,
    pub base_score: u32,
    pub time_bonus: u32,
    pub level_bonus: u32,
    pub total_score: u32,
    pub submitted_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.question_count
    }
}
