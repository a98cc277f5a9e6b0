pub mod request;
pub mod response;

pub use request::{GenerateQuizRequest, ImageQuizRequest, SubmitAnswersRequest};
pub use response::{
    BadgeView, GradedQuestionView, ProgressSnapshot, QuestionView, QuizView, ResultsView,
    SessionCreatedResponse,
};
