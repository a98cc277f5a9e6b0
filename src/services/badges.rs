//! Monotonic achievement badges. Every predicate only ever flips from false
//! to true as progress accumulates, so a badge, once earned, stays earned.

use crate::models::domain::PlayerProgress;
use crate::services::progression::level_for_xp;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub emoji: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const BADGES: [Badge; 10] = [
    Badge {
        id: "first_quiz",
        emoji: "🎯",
        name: "First Quiz!",
        description: "Complete your first quiz",
    },
    Badge {
        id: "five_quizzes",
        emoji: "📚",
        name: "Quiz Explorer",
        description: "Complete 5 quizzes",
    },
    Badge {
        id: "ten_quizzes",
        emoji: "🏅",
        name: "Quiz Master",
        description: "Complete 10 quizzes",
    },
    Badge {
        id: "points_50",
        emoji: "⭐",
        name: "50 Points!",
        description: "Earn 50 total points",
    },
    Badge {
        id: "points_100",
        emoji: "🌟",
        name: "100 Points!",
        description: "Earn 100 total points",
    },
    Badge {
        id: "points_200",
        emoji: "💫",
        name: "200 Points!",
        description: "Earn 200 total points",
    },
    Badge {
        id: "points_500",
        emoji: "🔥",
        name: "500 Points!",
        description: "Earn 500 total points",
    },
    Badge {
        id: "perfect_score",
        emoji: "💯",
        name: "Perfect Score!",
        description: "Get every question right on a quiz",
    },
    Badge {
        id: "three_perfects",
        emoji: "🏆",
        name: "Perfectionist",
        description: "Get 3 perfect scores",
    },
    Badge {
        id: "level_5",
        emoji: "👑",
        name: "Level 5 Hero",
        description: "Reach Level 5",
    },
];

pub fn badge_by_id(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|badge| badge.id == id)
}

fn badge_satisfied(badge_id: &str, progress: &PlayerProgress) -> bool {
    match badge_id {
        "first_quiz" => progress.quizzes_completed >= 1,
        "five_quizzes" => progress.quizzes_completed >= 5,
        "ten_quizzes" => progress.quizzes_completed >= 10,
        "points_50" => progress.total_score >= 50,
        "points_100" => progress.total_score >= 100,
        "points_200" => progress.total_score >= 200,
        "points_500" => progress.total_score >= 500,
        "perfect_score" => progress.perfect_scores >= 1,
        "three_perfects" => progress.perfect_scores >= 3,
        "level_5" => level_for_xp(progress.total_score) >= 5,
        _ => false,
    }
}

/// Re-evaluates the full badge table against the current progress, unlocking
/// anything newly satisfied. Returns only the badges unlocked by this call so
/// the caller can report them once.
pub fn check_and_award(progress: &mut PlayerProgress) -> Vec<&'static Badge> {
    let mut newly_unlocked = Vec::new();

    for badge in BADGES.iter() {
        if badge_satisfied(badge.id, progress) && !progress.has_badge(badge.id) {
            progress.badges.push(badge.id.to_string());
            newly_unlocked.push(badge);
        }
    }

    newly_unlocked
}
