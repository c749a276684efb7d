use crate::constants::prompts;
use crate::errors::{AppError, AppResult};
use crate::models::domain::{Difficulty, MissedQuestion, QuizState, SessionState};
use crate::models::dto::{AnswerFeedbackResponse, QuizViewResponse};
use crate::services::model_service::CompletionClient;
use crate::services::quiz_parser;

pub struct QuizService;

impl QuizService {
    /// Generate a quiz from the current lesson. Prompt, parse, validate and
    /// shuffle happen as one atomic step: on any failure the session keeps
    /// whatever quiz state it had (usually none), never a partial quiz.
    pub async fn generate_quiz(
        client: &dyn CompletionClient,
        state: &mut SessionState,
        difficulty: Difficulty,
        num_questions: u8,
    ) -> AppResult<QuizViewResponse> {
        let (topic, content) = match (state.topic.as_deref(), state.content.as_deref()) {
            (Some(topic), Some(content)) => (topic, content),
            _ => {
                return Err(AppError::InvalidState(
                    "generate learning content before requesting a quiz".to_string(),
                ))
            }
        };
        if state.quiz.is_some() {
            return Err(AppError::InvalidState(
                "a quiz already exists for this lesson; restart it or reset the session"
                    .to_string(),
            ));
        }

        let prompt = prompts::build_quiz_prompt(topic, content, difficulty, num_questions);
        log::info!(
            "Generating a {}-question {} quiz for topic '{}'",
            num_questions,
            difficulty,
            topic
        );
        let raw = client.complete(&prompt).await?;

        let mut questions = match quiz_parser::parse_quiz_response(&raw, num_questions as usize) {
            Ok(questions) => questions,
            Err(err) => {
                log::warn!("Discarding unusable quiz response: {}", err);
                return Err(err);
            }
        };
        let mut rng = rand::thread_rng();
        for question in &mut questions {
            question.shuffle_options(&mut rng);
        }

        state.quiz = Some(QuizState::new(questions));
        Self::quiz_view(state)
    }

    /// Grade the submitted option against the current question and advance.
    /// The answer is matched by text; on duplicate option text the first
    /// occurrence wins.
    pub fn submit_answer(
        state: &mut SessionState,
        answer: &str,
    ) -> AppResult<AnswerFeedbackResponse> {
        let quiz = state.quiz.as_mut().ok_or_else(|| {
            AppError::InvalidState("no quiz has been generated for this lesson".to_string())
        })?;
        if quiz.is_complete() {
            return Err(AppError::InvalidState(
                "the quiz is already completed; restart it to try again".to_string(),
            ));
        }

        let question = &quiz.questions[quiz.current_index];
        let selected = question
            .options
            .iter()
            .position(|option| option == answer)
            .ok_or_else(|| {
                AppError::ValidationError(
                    "answer must match one of the current question's options".to_string(),
                )
            })?;

        let correct = selected == question.correct_answer;
        let correct_text = question.correct_option().to_string();
        let question_text = question.question.clone();

        if correct {
            quiz.score += 1;
        } else {
            quiz.wrong_answers.push(MissedQuestion {
                question: question_text,
                correct_answer: correct_text.clone(),
            });
        }
        quiz.current_index += 1;

        Ok(AnswerFeedbackResponse {
            correct,
            correct_answer: if correct { None } else { Some(correct_text) },
            score: quiz.score,
            question_number: quiz.current_index,
            total_questions: quiz.total_questions(),
            quiz_completed: quiz.is_complete(),
        })
    }

    /// Back to question one with zeroed progress; the questions are kept.
    /// Safe to call repeatedly.
    pub fn restart(state: &mut SessionState) -> AppResult<QuizViewResponse> {
        let quiz = state.quiz.as_mut().ok_or_else(|| {
            AppError::InvalidState("no quiz has been generated for this lesson".to_string())
        })?;
        quiz.restart();
        log::info!("Restarted quiz with {} questions", quiz.total_questions());
        Ok(QuizViewResponse::from(&*quiz))
    }

    pub fn quiz_view(state: &SessionState) -> AppResult<QuizViewResponse> {
        let quiz = state.quiz.as_ref().ok_or_else(|| {
            AppError::InvalidState("no quiz has been generated for this lesson".to_string())
        })?;
        Ok(QuizViewResponse::from(quiz))
    }
}
