pub mod lesson_handler;
pub mod quiz_handler;
pub mod session_handler;

pub use lesson_handler::{answer_follow_up, generate_lesson, get_history, submit_profile};
pub use quiz_handler::{generate_quiz, get_quiz, restart_quiz, submit_answer};
pub use session_handler::{
    create_session, delete_session, get_session, health_check, reset_session,
};
