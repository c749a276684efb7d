use crate::constants::prompts;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{ChatTurn, LearnerProfile, SessionState};
use crate::models::dto::{FollowUpResponse, LessonResponse};
use crate::services::model_service::CompletionClient;

pub struct TutorService;

impl TutorService {
    /// Record the learner's free-text profile. Set once per session; "Start
    /// Over" is the way to change it.
    pub fn submit_profile(state: &mut SessionState, personal_info: &str) -> AppResult<()> {
        if state.profile.is_some() {
            return Err(AppError::InvalidState(
                "a learner profile is already recorded; reset the session to change it"
                    .to_string(),
            ));
        }

        let trimmed = personal_info.trim();
        if trimmed.is_empty() {
            return Err(AppError::ValidationError(
                "personal_info must not be empty".to_string(),
            ));
        }

        state.profile = Some(LearnerProfile {
            personal_info: trimmed.to_string(),
        });
        Ok(())
    }

    /// Generate a personalized explanation and make it the session's current
    /// lesson. Replaces earlier content and clears any quiz built from it.
    /// State is only touched when the model call succeeds.
    pub async fn generate_lesson(
        client: &dyn CompletionClient,
        state: &mut SessionState,
        topic: &str,
    ) -> AppResult<LessonResponse> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError(
                "topic must not be empty".to_string(),
            ));
        }
        let profile = state.profile.as_ref().ok_or_else(|| {
            AppError::InvalidState(
                "share a learner profile before generating content".to_string(),
            )
        })?;

        let prompt = prompts::build_explanation_prompt(topic, profile);
        log::info!("Generating lesson content for topic '{}'", topic);
        let content = client.complete(&prompt).await?;

        state.topic = Some(topic.to_string());
        state.content = Some(content.clone());
        state.chat_history.push(ChatTurn::assistant(content.clone()));
        state.quiz = None; // a new lesson invalidates the old quiz
        Ok(LessonResponse {
            topic: topic.to_string(),
            content,
        })
    }

    /// Answer a follow-up question using the latest assistant turn as
    /// context. Both turns are appended to the history only when the model
    /// call succeeds.
    pub async fn answer_follow_up(
        client: &dyn CompletionClient,
        state: &mut SessionState,
        question: &str,
    ) -> AppResult<FollowUpResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::ValidationError(
                "question must not be empty".to_string(),
            ));
        }
        let profile = state.profile.as_ref().ok_or_else(|| {
            AppError::InvalidState(
                "share a learner profile before asking questions".to_string(),
            )
        })?;
        let prior_context = state.last_assistant_text().ok_or_else(|| {
            AppError::InvalidState(
                "generate learning content before asking follow-up questions".to_string(),
            )
        })?;

        let prompt = prompts::build_follow_up_prompt(question, profile, prior_context);
        log::info!("Answering follow-up question");
        let answer = client.complete(&prompt).await?;

        state.chat_history.push(ChatTurn::human(question));
        state.chat_history.push(ChatTurn::assistant(answer.clone()));
        Ok(FollowUpResponse {
            question: question.to_string(),
            answer,
        })
    }
}
