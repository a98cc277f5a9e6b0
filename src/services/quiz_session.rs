//! Explicit lifecycle for one learner's session, replacing ambient mutable
//! state with a single owned value and named transitions:
//!
//! ```text
//! CollectingInput --begin_generation--> Generating
//! Generating --complete_generation--> Answering
//! Generating --fail / malformed parse--> CollectingInput
//! Answering --submit_answers--> Graded
//! Graded --begin_generation / reset--> ...
//! ```

use std::time::Instant;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AnswerKey, OptionLetter, ParsedQuestion, PlayerProgress, QuizAttempt};
use crate::services::badges::{self, Badge};
use crate::services::progression::{self, TimedRun};
use crate::services::quiz_parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    CollectingInput,
    Generating,
    Answering,
    Graded,
}

/// The quiz currently in front of the learner. Dropped wholesale when a new
/// generation starts; nothing here holds external resources.
#[derive(Clone, Debug)]
pub struct ActiveQuiz {
    pub topic: String,
    pub difficulty: String,
    pub question_count: usize,
    pub questions: Vec<ParsedQuestion>,
    pub answer_key: AnswerKey,
    /// Markdown with all answer content stripped, safe to show pre-grading.
    pub questions_only: String,
    pub timed_mode: bool,
    started: Instant,
}

pub struct QuizSession {
    pub id: Uuid,
    phase: SessionPhase,
    active: Option<ActiveQuiz>,
    last_attempt: Option<QuizAttempt>,
    newly_unlocked: Vec<&'static Badge>,
    pub progress: PlayerProgress,
    seconds_per_question: u64,
}

impl QuizSession {
    pub fn new(id: Uuid, seconds_per_question: u64) -> Self {
        Self {
            id,
            phase: SessionPhase::CollectingInput,
            active: None,
            last_attempt: None,
            newly_unlocked: Vec::new(),
            progress: PlayerProgress::new(),
            seconds_per_question,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn active_quiz(&self) -> Option<&ActiveQuiz> {
        self.active.as_ref()
    }

    pub fn last_attempt(&self) -> Option<&QuizAttempt> {
        self.last_attempt.as_ref()
    }

    /// Badges unlocked by the most recent graded attempt.
    pub fn newly_unlocked(&self) -> &[&'static Badge] {
        &self.newly_unlocked
    }

    /// Starts a new generation, abandoning any quiz or results currently in
    /// flight. Progress is kept; quiz state is not.
    pub fn begin_generation(&mut self) -> AppResult<()> {
        if self.phase == SessionPhase::Generating {
            return Err(AppError::InvalidState(
                "a quiz generation is already in progress".to_string(),
            ));
        }
        self.active = None;
        self.last_attempt = None;
        self.newly_unlocked.clear();
        self.phase = SessionPhase::Generating;
        Ok(())
    }

    /// Collaborator-failure path: generation never produced text.
    pub fn fail_generation(&mut self) {
        self.phase = SessionPhase::CollectingInput;
    }

    /// Runs the parser pipeline over the generated markdown. Validation
    /// failure rejects the whole quiz as malformed and returns the session to
    /// input collection so the learner can re-trigger generation.
    pub fn complete_generation(
        &mut self,
        raw_text: &str,
        topic: String,
        difficulty: String,
        question_count: usize,
        timed_mode: bool,
    ) -> AppResult<()> {
        if self.phase != SessionPhase::Generating {
            return Err(AppError::InvalidState(
                "no generation in progress".to_string(),
            ));
        }

        let mut data = quiz_parser::extract_answers(raw_text);
        if !quiz_parser::validate_quiz_data(&mut data, question_count) {
            self.phase = SessionPhase::CollectingInput;
            log::warn!(
                "rejected malformed generation for topic '{}': {} answers recovered, {} expected",
                topic,
                data.correct_answers.len(),
                question_count
            );
            return Err(AppError::MalformedGeneration(format!(
                "The quiz about '{}' came back incomplete. Please try again!",
                topic
            )));
        }

        let answer_key = quiz_parser::build_answer_key(&data);
        let questions = quiz_parser::parse_individual_questions(raw_text);
        let questions_only = quiz_parser::strip_answers(raw_text);

        log::info!(
            "quiz ready for topic '{}': {} question blocks, {} answers",
            topic,
            questions.len(),
            answer_key.len()
        );

        self.active = Some(ActiveQuiz {
            topic,
            difficulty,
            question_count,
            questions,
            answer_key,
            questions_only,
            timed_mode,
            started: Instant::now(),
        });
        self.phase = SessionPhase::Answering;
        Ok(())
    }

    /// Grades a full submission. Answers are matched positionally against the
    /// answer key; an incomplete submission is rejected with a message naming
    /// every unanswered question number.
    pub fn submit_answers(
        &mut self,
        answers: &[Option<OptionLetter>],
    ) -> AppResult<&QuizAttempt> {
        if self.phase != SessionPhase::Answering {
            return Err(AppError::InvalidState(
                "no quiz is awaiting answers".to_string(),
            ));
        }
        let quiz = self
            .active
            .as_ref()
            .ok_or_else(|| AppError::InternalError("answering phase without a quiz".into()))?;

        let unanswered: Vec<usize> = (0..quiz.question_count)
            .filter(|&i| answers.get(i).copied().flatten().is_none())
            .map(|i| i + 1)
            .collect();
        if !unanswered.is_empty() {
            let message = if unanswered.len() == 1 {
                format!(
                    "⚠️ Please answer Question {} before submitting!",
                    unanswered[0]
                )
            } else {
                let numbers: Vec<String> = unanswered.iter().map(usize::to_string).collect();
                format!(
                    "⚠️ Please answer Questions {} before submitting!",
                    numbers.join(", ")
                )
            };
            return Err(AppError::IncompleteSubmission(message));
        }

        let user_answers: Vec<OptionLetter> = answers
            .iter()
            .take(quiz.question_count)
            .filter_map(|answer| *answer)
            .collect();

        let correct_answers = quiz.answer_key.correct_answers.clone();
        let topic = quiz.topic.clone();
        let timed = quiz.timed_mode.then(|| TimedRun {
            seconds_per_question: self.seconds_per_question,
            elapsed_seconds: quiz.started.elapsed().as_secs_f64(),
        });

        let graded_count = user_answers.len().min(correct_answers.len());
        let mut correct_count = 0;
        let mut wrong_questions = Vec::new();
        for i in 0..graded_count {
            if user_answers[i] == correct_answers[i] {
                correct_count += 1;
            } else {
                wrong_questions.push(i + 1);
            }
        }

        let score = progression::score_attempt(
            correct_count,
            graded_count,
            timed,
            self.progress.total_score,
        );

        let attempt = QuizAttempt {
            user_answers,
            correct_count,
            question_count: graded_count,
            wrong_questions,
            base_score: score.base_score,
            time_bonus: score.time_bonus,
            level_bonus: score.level_bonus,
            total_score: score.total(),
            submitted_at: chrono::Utc::now(),
        };

        progression::apply_attempt(&mut self.progress, &attempt, &topic);
        self.newly_unlocked = badges::check_and_award(&mut self.progress);

        log::info!(
            "graded attempt for '{}': {}/{} correct, {} XP earned, {} badges unlocked",
            topic,
            attempt.correct_count,
            attempt.question_count,
            attempt.total_score,
            self.newly_unlocked.len()
        );

        self.last_attempt = Some(attempt);
        self.phase = SessionPhase::Graded;

        self.last_attempt
            .as_ref()
            .ok_or_else(|| AppError::InternalError("attempt vanished after grading".into()))
    }

    /// Discards quiz and attempt state, returning to input collection.
    pub fn reset(&mut self) {
        self.active = None;
        self.last_attempt = None;
        self.newly_unlocked.clear();
        self.phase = SessionPhase::CollectingInput;
    }
}
