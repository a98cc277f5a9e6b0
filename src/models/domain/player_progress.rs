use serde::{Deserialize, Serialize};

use crate::services::progression;

/// Session-scoped progression totals. Monotonically mutated: the cumulative
/// score never decreases, badges are never revoked, and the level is always
/// derived from `total_score` rather than stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerProgress {
    pub total_score: u32,
    pub quizzes_completed: u32,
    pub perfect_scores: u32,
    /// Append-only; repeats may accumulate, display dedupes.
    pub weak_topics: Vec<String>,
    /// Unlocked badge identifiers in unlock order.
    pub badges: Vec<String>,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        progression::level_for_xp(self.total_score)
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|id| id == badge_id)
    }

    /// The most recent `limit` distinct weak topics, oldest first.
    pub fn recent_weak_topics(&self, limit: usize) -> Vec<String> {
        let mut distinct: Vec<String> = Vec::new();
        for topic in self.weak_topics.iter().rev() {
            if !distinct.iter().any(|t| t == topic) {
                distinct.push(topic.clone());
            }
            if distinct.len() == limit {
                break;
            }
        }
        distinct.reverse();
        distinct
    }
}
