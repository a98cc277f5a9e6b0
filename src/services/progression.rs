//! Pure-function scoring and leveling model.
//!
//! Level is always derived from cumulative XP through the progressive curve:
//! level 2 costs 50 XP, and each later step costs 25 XP more than the one
//! before it (level 3 at 125 total, level 4 at 225, level 5 at 350, ...).
//! Nothing here performs I/O or fails; inputs arrive pre-validated from the
//! grading pipeline.

use crate::models::domain::{PlayerProgress, QuizAttempt};

/// XP gained per correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;

/// Total XP needed to reach `level`. Level 1 is free.
pub fn xp_required_for_level(level: u32) -> u32 {
    if level <= 1 {
        return 0;
    }
    (2..=level).map(|lvl| 50 + (lvl - 2) * 25).sum()
}

/// The largest level whose threshold is within `total_xp`. Unbounded above.
pub fn level_for_xp(total_xp: u32) -> u32 {
    let mut level = 1;
    while xp_required_for_level(level + 1) <= total_xp {
        level += 1;
    }
    level
}

/// Progress toward the next level as (points into the current level, points
/// the step requires). Drives the progress indicator.
pub fn points_for_next_level(total_xp: u32) -> (u32, u32) {
    let current_level = level_for_xp(total_xp);
    let xp_at_current = xp_required_for_level(current_level);
    let xp_at_next = xp_required_for_level(current_level + 1);
    (total_xp - xp_at_current, xp_at_next - xp_at_current)
}

/// Fraction of the current level step already earned, in `[0, 1)`.
pub fn progress_to_next_level(total_xp: u32) -> f64 {
    let (into, needed) = points_for_next_level(total_xp);
    f64::from(into) / f64::from(needed)
}

pub fn level_title(level: u32) -> &'static str {
    match level {
        0 | 1 => "Curious Beginner 🌱",
        2 => "Knowledge Seeker 📖",
        3 => "Quiz Explorer 🗺️",
        4 => "Brain Builder 🧱",
        5 => "Study Champion 🏅",
        6 => "Wisdom Warrior ⚔️",
        7 => "Master Learner 🎓",
        8 => "Knowledge Knight 🛡️",
        9 => "Quiz Legend 🌟",
        // The capstone title repeats past level 10.
        _ => "Ultimate Genius 👑",
    }
}

pub fn level_perk(level: u32) -> &'static str {
    match level {
        0 | 1 => "Start your learning journey!",
        2 => "Unlock Quiz History tracking",
        3 => "Unlock Timed Challenge Mode",
        4 => "Unlock AI Study Notes",
        5 => "Earn the Study Champion badge!",
        6 => "Get +5% bonus Experience Points on all quizzes",
        7 => "Get +10% bonus Experience Points on all quizzes",
        8 => "Get +15% bonus Experience Points on all quizzes",
        9 => "Get +20% bonus Experience Points on all quizzes",
        _ => "Maximum +25% bonus Experience Points + all features unlocked!",
    }
}

/// Wall-clock facts about a timed run, captured at submission.
#[derive(Clone, Copy, Debug)]
pub struct TimedRun {
    pub seconds_per_question: u64,
    pub elapsed_seconds: f64,
}

/// The additive score parts of one attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub base_score: u32,
    pub time_bonus: u32,
    pub level_bonus: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.base_score + self.time_bonus + self.level_bonus
    }
}

/// Scores one attempt: 10 XP per correct answer, up to 50% of that again as a
/// linear function of unused time in timed mode, plus the level bonus earned
/// by the learner's level *before* this attempt's XP lands.
pub fn score_attempt(
    correct_count: usize,
    question_count: usize,
    timed: Option<TimedRun>,
    pre_attempt_total_xp: u32,
) -> ScoreBreakdown {
    let base_score = correct_count as u32 * POINTS_PER_CORRECT;

    let time_bonus = match timed {
        Some(run) => {
            let allotted = (question_count as u64 * run.seconds_per_question) as f64;
            let remaining = (allotted - run.elapsed_seconds).max(0.0);
            if allotted > 0.0 && remaining > 0.0 {
                ((remaining / allotted) * f64::from(base_score) * 0.5) as u32
            } else {
                0
            }
        }
        None => 0,
    };

    let pre_attempt_level = level_for_xp(pre_attempt_total_xp);
    let bonus_percent = if pre_attempt_level >= 6 {
        ((pre_attempt_level - 5) * 5).min(25)
    } else {
        0
    };
    let level_bonus = base_score * bonus_percent / 100;

    ScoreBreakdown {
        base_score,
        time_bonus,
        level_bonus,
    }
}

/// Folds a graded attempt into the player's progress: cumulative XP and
/// attempt counters only ever grow, and a below-half result flags the topic
/// for review.
pub fn apply_attempt(progress: &mut PlayerProgress, attempt: &QuizAttempt, topic: &str) {
    progress.total_score += attempt.total_score;
    progress.quizzes_completed += 1;

    if attempt.is_perfect() {
        progress.perfect_scores += 1;
    }

    if attempt.correct_count < attempt.question_count / 2 && !topic.is_empty() {
        progress.weak_topics.push(topic.to_string());
    }
}
