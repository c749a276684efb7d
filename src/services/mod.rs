pub mod model_service;
pub mod quiz_parser;
pub mod quiz_service;
pub mod session_service;
pub mod tutor_service;

pub use model_service::{
    CompletionClient, CompletionClientFactory, OpenAiClientFactory, OpenAiModelService,
};
pub use quiz_service::QuizService;
pub use session_service::{SessionHandle, SessionManager};
pub use tutor_service::TutorService;
