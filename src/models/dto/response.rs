use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::constants::gamification;
use crate::models::domain::{ParsedQuestion, PlayerProgress, QuizAttempt};
use crate::services::badges::{self, Badge};
use crate::services::progression;
use crate::services::quiz_session::ActiveQuiz;

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BadgeView {
    pub id: &'static str,
    pub emoji: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl From<&'static Badge> for BadgeView {
    fn from(badge: &'static Badge) -> Self {
        Self {
            id: badge.id,
            emoji: badge.emoji,
            name: badge.name,
            description: badge.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub letter: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub number: u32,
    pub emoji: String,
    pub text: String,
    pub options: Vec<OptionView>,
}

impl From<&ParsedQuestion> for QuestionView {
    fn from(question: &ParsedQuestion) -> Self {
        Self {
            number: question.number,
            emoji: question.emoji.clone(),
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .map(|(letter, text)| OptionView {
                    letter: letter.as_str().to_string(),
                    text: text.clone(),
                })
                .collect(),
        }
    }
}

/// The quiz as the learner sees it before grading: structured questions where
/// parsing succeeded, plus the answer-stripped markdown as a fallback surface.
#[derive(Debug, Serialize)]
pub struct QuizView {
    pub topic: String,
    pub difficulty: String,
    pub question_count: usize,
    pub timed_mode: bool,
    pub seconds_allotted: Option<u64>,
    pub questions: Vec<QuestionView>,
    pub questions_markdown: String,
}

impl QuizView {
    pub fn from_active(quiz: &ActiveQuiz, seconds_per_question: u64) -> Self {
        Self {
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty.clone(),
            question_count: quiz.question_count,
            timed_mode: quiz.timed_mode,
            seconds_allotted: quiz
                .timed_mode
                .then(|| quiz.question_count as u64 * seconds_per_question),
            questions: quiz.questions.iter().map(QuestionView::from).collect(),
            questions_markdown: quiz.questions_only.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradedQuestionView {
    pub number: usize,
    /// Absent when the question block could not be parsed into structure.
    pub question: Option<String>,
    pub your_answer: String,
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct ProgressSnapshot {
    pub total_score: u32,
    pub level: u32,
    pub level_title: &'static str,
    pub level_perk: &'static str,
    pub points_into_level: u32,
    pub points_to_next_level: u32,
    pub level_progress: f64,
    pub quizzes_completed: u32,
    pub perfect_scores: u32,
    pub recent_weak_topics: Vec<String>,
    pub badges: Vec<BadgeView>,
}

impl From<&PlayerProgress> for ProgressSnapshot {
    fn from(progress: &PlayerProgress) -> Self {
        let level = progress.level();
        let (points_into_level, points_to_next_level) =
            progression::points_for_next_level(progress.total_score);
        Self {
            total_score: progress.total_score,
            level,
            level_title: progression::level_title(level),
            level_perk: progression::level_perk(level),
            points_into_level,
            points_to_next_level,
            level_progress: progression::progress_to_next_level(progress.total_score),
            quizzes_completed: progress.quizzes_completed,
            perfect_scores: progress.perfect_scores,
            recent_weak_topics: progress.recent_weak_topics(5),
            badges: progress
                .badges
                .iter()
                .filter_map(|id| badges::badge_by_id(id))
                .map(BadgeView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResultsView {
    pub correct_count: usize,
    pub question_count: usize,
    pub wrong_questions: Vec<usize>,
    pub base_score: u32,
    pub time_bonus: u32,
    pub level_bonus: u32,
    pub total_score: u32,
    pub perfect: bool,
    pub encouragement: &'static str,
    pub questions: Vec<GradedQuestionView>,
    pub newly_unlocked: Vec<BadgeView>,
    pub progress: ProgressSnapshot,
    pub submitted_at: DateTime<Utc>,
}

impl ResultsView {
    pub fn build(
        attempt: &QuizAttempt,
        quiz: &ActiveQuiz,
        newly_unlocked: &[&'static Badge],
        progress: &PlayerProgress,
    ) -> Self {
        let questions = (0..attempt.question_count)
            .map(|i| {
                let number = i + 1;
                // The structured question list can be shorter than the answer
                // key when some blocks failed to parse, so match by number.
                let question = quiz
                    .questions
                    .iter()
                    .find(|q| q.number as usize == number)
                    .map(|q| q.text.clone());
                let your_answer = attempt.user_answers[i];
                let correct_answer = quiz.answer_key.correct_answer(i);
                Self::graded_question(number, question, your_answer, correct_answer, quiz, i)
            })
            .collect();

        Self {
            correct_count: attempt.correct_count,
            question_count: attempt.question_count,
            wrong_questions: attempt.wrong_questions.clone(),
            base_score: attempt.base_score,
            time_bonus: attempt.time_bonus,
            level_bonus: attempt.level_bonus,
            total_score: attempt.total_score,
            perfect: attempt.is_perfect(),
            encouragement: gamification::random_encouragement(),
            questions,
            newly_unlocked: newly_unlocked.iter().copied().map(BadgeView::from).collect(),
            progress: ProgressSnapshot::from(progress),
            submitted_at: attempt.submitted_at,
        }
    }

    fn graded_question(
        number: usize,
        question: Option<String>,
        your_answer: crate::models::domain::OptionLetter,
        correct_answer: Option<crate::models::domain::OptionLetter>,
        quiz: &ActiveQuiz,
        index: usize,
    ) -> GradedQuestionView {
        let correct = correct_answer.map(|c| c == your_answer).unwrap_or(false);
        GradedQuestionView {
            number,
            question,
            your_answer: your_answer.as_str().to_string(),
            correct_answer: correct_answer
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            correct,
            explanation: quiz
                .answer_key
                .explanation(index)
                .unwrap_or(crate::services::quiz_parser::FALLBACK_EXPLANATION)
                .to_string(),
        }
    }
}
