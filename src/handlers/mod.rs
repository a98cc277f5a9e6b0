pub mod session_handler;

pub use session_handler::{
    create_session, current_quiz, delete_session, generate_image_quiz, generate_quiz,
    get_progress, health_check, submit_answers,
};
