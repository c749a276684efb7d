pub mod quiz;
pub mod session;

pub use quiz::{Difficulty, MissedQuestion, QuizQuestion, QuizState, OPTIONS_PER_QUESTION};
pub use session::{ChatRole, ChatTurn, LearnerProfile, SessionState};
