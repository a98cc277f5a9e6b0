pub mod answer_key;
pub mod parsed_question;
pub mod player_progress;
pub mod quiz_attempt;

pub use answer_key::AnswerKey;
pub use parsed_question::{OptionLetter, ParsedQuestion};
pub use player_progress::PlayerProgress;
pub use quiz_attempt::QuizAttempt;
