use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::OptionLetter;

fn default_difficulty() -> String {
    "Medium".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Topic must be between 1 and 100 characters"
    ))]
    pub topic: String,

    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    pub grade_level: Option<String>,

    /// Clamped server-side to the configured maximum.
    pub question_count: Option<usize>,

    #[serde(default)]
    pub timed_mode: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImageQuizRequest {
    #[validate(length(min = 1, message = "Image data must not be empty"))]
    pub image_base64: String,

    #[validate(length(min = 1, message = "Image mime type must not be empty"))]
    pub mime_type: String,

    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    pub grade_level: Option<String>,

    pub question_count: Option<usize>,

    #[serde(default)]
    pub timed_mode: bool,
}

/// One slot per question, in order. `null` marks a question the learner has
/// not answered yet; the session rejects such submissions by name.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<Option<String>>,
}

impl SubmitAnswersRequest {
    pub fn parsed_answers(&self) -> AppResult<Vec<Option<OptionLetter>>> {
        self.answers
            .iter()
            .map(|slot| match slot {
                None => Ok(None),
                Some(raw) => OptionLetter::parse(raw).map(Some).ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "'{}' is not a valid answer choice, expected A, B, C or D",
                        raw
                    ))
                }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_parse_case_insensitively_and_keep_gaps() {
        let request = SubmitAnswersRequest {
            answers: vec![Some("a".to_string()), None, Some(" C ".to_string())],
        };
        let parsed = request.parsed_answers().expect("letters should parse");
        assert_eq!(
            parsed,
            vec![Some(OptionLetter::A), None, Some(OptionLetter::C)]
        );
    }

    #[test]
    fn an_unknown_letter_is_a_validation_error() {
        let request = SubmitAnswersRequest {
            answers: vec![Some("E".to_string())],
        };
        assert!(matches!(
            request.parsed_answers(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn topic_length_is_validated() {
        let request = GenerateQuizRequest {
            topic: String::new(),
            difficulty: default_difficulty(),
            grade_level: None,
            question_count: None,
            timed_mode: false,
        };
        assert!(request.validate().is_err());

        let request = GenerateQuizRequest {
            topic: "x".repeat(101),
            difficulty: default_difficulty(),
            grade_level: None,
            question_count: None,
            timed_mode: false,
        };
        assert!(request.validate().is_err());
    }
}
