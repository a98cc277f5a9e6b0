//! Orchestrates one generation round trip: sanitize the request, build the
//! prompt, call the model collaborator, and hand the raw markdown to the
//! session for parsing and validation.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::Validate;

use crate::config::Config;
use crate::constants::quiz_prompt;
use crate::errors::{AppError, AppResult};
use crate::models::dto::{GenerateQuizRequest, ImageQuizRequest};
use crate::services::model_service::{user_facing_generation_error, QuizGenerator};
use crate::services::quiz_parser;
use crate::services::quiz_session::QuizSession;

/// Characters stripped from topics before they are embedded in a prompt.
static TOPIC_STRIP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[<>{}|\[\]\\^`]").expect("topic strip pattern is valid")
});

const MAX_TOPIC_CHARS: usize = 100;
const IMAGE_FALLBACK_TOPIC: &str = "Image Analysis";

pub struct QuizFlowService {
    generator: Arc<dyn QuizGenerator>,
    default_question_count: usize,
    max_question_count: usize,
}

impl QuizFlowService {
    pub fn new(generator: Arc<dyn QuizGenerator>, config: &Config) -> Self {
        Self {
            generator,
            default_question_count: config.default_question_count,
            max_question_count: config.max_question_count,
        }
    }

    /// Removes prompt-structure characters and caps the length. Sanitizing
    /// can empty a topic that length validation accepted.
    pub fn sanitize_topic(topic: &str) -> String {
        let cleaned = TOPIC_STRIP_RE.replace_all(topic, "");
        cleaned.trim().chars().take(MAX_TOPIC_CHARS).collect()
    }

    fn resolve_question_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_question_count)
            .clamp(1, self.max_question_count)
    }

    pub async fn generate_topic_quiz(
        &self,
        session: &mut QuizSession,
        request: &GenerateQuizRequest,
    ) -> AppResult<()> {
        request.validate()?;

        let topic = Self::sanitize_topic(&request.topic);
        if topic.is_empty() {
            return Err(AppError::ValidationError(
                "Please enter a topic for your quiz! 📚".to_string(),
            ));
        }
        let question_count = self.resolve_question_count(request.question_count);
        let difficulty = quiz_prompt::clean_difficulty(&request.difficulty).to_string();

        session.begin_generation()?;

        let weak_topics = session.progress.recent_weak_topics(5);
        let prompt = quiz_prompt::build_topic_quiz_prompt(
            &topic,
            &difficulty,
            request.grade_level.as_deref(),
            &weak_topics,
            question_count,
        );

        log::info!(
            "generating {} {} questions about '{}' for session {}",
            question_count,
            difficulty,
            topic,
            session.id
        );

        match self.generator.generate_topic_quiz(&prompt).await {
            Ok(raw) => session.complete_generation(
                &raw,
                topic,
                difficulty,
                question_count,
                request.timed_mode,
            ),
            Err(err) => {
                log::error!("quiz generation failed for '{}': {}", topic, err);
                session.fail_generation();
                Err(user_facing_generation_error(err))
            }
        }
    }

    pub async fn generate_image_quiz(
        &self,
        session: &mut QuizSession,
        request: &ImageQuizRequest,
    ) -> AppResult<()> {
        request.validate()?;

        let question_count = self.resolve_question_count(request.question_count);
        let difficulty = quiz_prompt::clean_difficulty(&request.difficulty).to_string();

        session.begin_generation()?;

        let prompt = quiz_prompt::build_image_quiz_prompt(
            &difficulty,
            request.grade_level.as_deref(),
            question_count,
        );

        log::info!(
            "generating {} {} questions from an image for session {}",
            question_count,
            difficulty,
            session.id
        );

        match self
            .generator
            .generate_image_quiz(&prompt, &request.image_base64, &request.mime_type)
            .await
        {
            Ok(raw) => {
                let topic = quiz_parser::extract_image_topic(&raw)
                    .unwrap_or_else(|| IMAGE_FALLBACK_TOPIC.to_string());
                session.complete_generation(
                    &raw,
                    topic,
                    difficulty,
                    question_count,
                    request.timed_mode,
                )
            }
            Err(err) => {
                log::error!("image quiz generation failed: {}", err);
                session.fail_generation();
                Err(user_facing_generation_error(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::model_service::MockQuizGenerator;
    use crate::services::quiz_session::SessionPhase;
    use crate::test_utils::fixtures::sample_quiz_markdown;
    use uuid::Uuid;

    fn flow(mock: MockQuizGenerator) -> QuizFlowService {
        QuizFlowService::new(Arc::new(mock), &Config::test_config())
    }

    fn topic_request(topic: &str, question_count: Option<usize>) -> GenerateQuizRequest {
        GenerateQuizRequest {
            topic: topic.to_string(),
            difficulty: "Medium".to_string(),
            grade_level: None,
            question_count,
            timed_mode: false,
        }
    }

    #[test]
    fn topics_are_sanitized_and_capped() {
        assert_eq!(
            QuizFlowService::sanitize_topic("  space <script>{rockets}|  "),
            "space scriptrockets"
        );
        let long = "a".repeat(150);
        assert_eq!(QuizFlowService::sanitize_topic(&long).chars().count(), 100);
    }

    #[tokio::test]
    async fn happy_path_leaves_session_answering() {
        let mut mock = MockQuizGenerator::new();
        mock.expect_generate_topic_quiz()
            .withf(|prompt: &str| prompt.contains("quiz about: dinosaurs"))
            .returning(|_| Ok(sample_quiz_markdown(5)));

        let service = flow(mock);
        let mut session = QuizSession::new(Uuid::new_v4(), 30);
        service
            .generate_topic_quiz(&mut session, &topic_request("dinosaurs", None))
            .await
            .expect("generation should succeed");

        assert_eq!(session.phase(), SessionPhase::Answering);
        let quiz = session.active_quiz().expect("quiz should be active");
        assert_eq!(quiz.topic, "dinosaurs");
        assert_eq!(quiz.question_count, 5);
    }

    #[tokio::test]
    async fn question_count_is_clamped_to_the_configured_maximum() {
        let mut mock = MockQuizGenerator::new();
        mock.expect_generate_topic_quiz()
            .withf(|prompt: &str| prompt.contains("Create a 10-question"))
            .returning(|_| Ok(sample_quiz_markdown(10)));

        let service = flow(mock);
        let mut session = QuizSession::new(Uuid::new_v4(), 30);
        service
            .generate_topic_quiz(&mut session, &topic_request("oceans", Some(25)))
            .await
            .expect("generation should succeed");

        assert_eq!(
            session.active_quiz().expect("quiz active").question_count,
            10
        );
    }

    #[tokio::test]
    async fn a_topic_that_sanitizes_to_nothing_is_rejected_before_generation() {
        let mock = MockQuizGenerator::new();
        let service = flow(mock);
        let mut session = QuizSession::new(Uuid::new_v4(), 30);

        let err = service
            .generate_topic_quiz(&mut session, &topic_request("<>{}", None))
            .await
            .expect_err("empty topic should be rejected");
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(session.phase(), SessionPhase::CollectingInput);
    }

    #[tokio::test]
    async fn collaborator_failure_rolls_the_session_back() {
        let mut mock = MockQuizGenerator::new();
        mock.expect_generate_topic_quiz()
            .returning(|_| Err(AppError::GenerationFailed("timeout while reading".to_string())));

        let service = flow(mock);
        let mut session = QuizSession::new(Uuid::new_v4(), 30);
        let err = service
            .generate_topic_quiz(&mut session, &topic_request("magnets", None))
            .await
            .expect_err("failure should surface");

        assert!(err.to_string().contains("took too long"));
        assert_eq!(session.phase(), SessionPhase::CollectingInput);
    }

    #[tokio::test]
    async fn image_quiz_uses_the_detected_topic() {
        let mut mock = MockQuizGenerator::new();
        mock.expect_generate_image_quiz().returning(|_, _, _| {
            let mut text = "**📸 Image Topic: The Solar System**\n\n".to_string();
            text.push_str(&sample_quiz_markdown(5));
            Ok(text)
        });

        let service = flow(mock);
        let mut session = QuizSession::new(Uuid::new_v4(), 30);
        let request = ImageQuizRequest {
            image_base64: "aGVsbG8=".to_string(),
            mime_type: "image/png".to_string(),
            difficulty: "Easy Mode".to_string(),
            grade_level: None,
            question_count: None,
            timed_mode: false,
        };
        service
            .generate_image_quiz(&mut session, &request)
            .await
            .expect("generation should succeed");

        let quiz = session.active_quiz().expect("quiz should be active");
        assert_eq!(quiz.topic, "The Solar System");
        assert_eq!(quiz.difficulty, "Easy");
    }
}
