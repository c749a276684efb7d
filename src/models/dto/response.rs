use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{ChatRole, ChatTurn, MissedQuestion, QuizQuestion, QuizState, SessionState};

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizProgressDto {
    pub total_questions: usize,
    pub answered: usize,
    pub score: usize,
    pub completed: bool,
}

impl From<&QuizState> for QuizProgressDto {
    fn from(quiz: &QuizState) -> Self {
        QuizProgressDto {
            total_questions: quiz.total_questions(),
            answered: quiz.current_index,
            score: quiz.score,
            completed: quiz.is_complete(),
        }
    }
}

/// Enough for the browser to re-render any page without refetching every
/// sub-resource.
#[derive(Debug, Clone, Serialize)]
pub struct SessionOverviewResponse {
    pub session_id: Uuid,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub has_profile: bool,
    pub topic: Option<String>,
    pub has_content: bool,
    pub chat_turns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizProgressDto>,
}

impl SessionOverviewResponse {
    pub fn new(session_id: Uuid, model: &str, state: &SessionState) -> Self {
        SessionOverviewResponse {
            session_id,
            model: model.to_string(),
            created_at: state.created_at,
            has_profile: state.profile.is_some(),
            topic: state.topic.clone(),
            has_content: state.content.is_some(),
            chat_turns: state.chat_history.len(),
            quiz: state.quiz.as_ref().map(QuizProgressDto::from),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonResponse {
    pub topic: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpResponse {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurnDto {
    pub role: ChatRole,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatTurn> for ChatTurnDto {
    fn from(turn: &ChatTurn) -> Self {
        ChatTurnDto {
            role: turn.role,
            text: turn.text.clone(),
            created_at: turn.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub turns: Vec<ChatTurnDto>,
}

impl From<&SessionState> for HistoryResponse {
    fn from(state: &SessionState) -> Self {
        HistoryResponse {
            turns: state.chat_history.iter().map(ChatTurnDto::from).collect(),
        }
    }
}

/// The current question as the learner sees it. The correct index is
/// deliberately absent.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestionDto {
    pub question: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for QuizQuestionDto {
    fn from(question: &QuizQuestion) -> Self {
        QuizQuestionDto {
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MissedAnswerDto {
    pub question: String,
    pub correct_answer: String,
}

impl From<&MissedQuestion> for MissedAnswerDto {
    fn from(missed: &MissedQuestion) -> Self {
        MissedAnswerDto {
            question: missed.question.clone(),
            correct_answer: missed.correct_answer.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizViewResponse {
    InProgress {
        question_number: usize, // 1-based
        total_questions: usize,
        score: usize,
        question: QuizQuestionDto,
    },
    Completed {
        score: usize,
        total_questions: usize,
        wrong_answers: Vec<MissedAnswerDto>,
    },
}

impl From<&QuizState> for QuizViewResponse {
    fn from(quiz: &QuizState) -> Self {
        match quiz.current_question() {
            Some(question) => QuizViewResponse::InProgress {
                question_number: quiz.current_index + 1,
                total_questions: quiz.total_questions(),
                score: quiz.score,
                question: QuizQuestionDto::from(question),
            },
            None => QuizViewResponse::Completed {
                score: quiz.score,
                total_questions: quiz.total_questions(),
                wrong_answers: quiz
                    .wrong_answers
                    .iter()
                    .map(MissedAnswerDto::from)
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerFeedbackResponse {
    pub correct: bool,
    /// The right option's text, revealed only when the answer was wrong.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    pub score: usize,
    pub question_number: usize, // 1-based number of the question just answered
    pub total_questions: usize,
    pub quiz_completed: bool,
}
