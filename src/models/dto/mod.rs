pub mod request;
pub mod response;

pub use request::{
    CreateSessionRequest, FollowUpRequest, GenerateLessonRequest, GenerateQuizRequest,
    SubmitAnswerRequest, SubmitProfileRequest,
};
pub use response::{
    AnswerFeedbackResponse, ChatTurnDto, FollowUpResponse, HistoryResponse, LessonResponse,
    MessageResponse, MissedAnswerDto, QuizProgressDto, QuizQuestionDto, QuizViewResponse,
    SessionCreatedResponse, SessionOverviewResponse,
};
