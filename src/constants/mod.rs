pub mod gamification;
pub mod quiz_prompt;
