use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Difficulty;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, max = 200))]
    pub api_key: String,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitProfileRequest {
    #[validate(length(min = 1, max = 2000))]
    pub personal_info: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateLessonRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FollowUpRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,

    #[serde(default = "default_num_questions")]
    #[validate(range(min = 3, max = 20))]
    pub num_questions: u8,
}

// The browser form defaults: 5 questions at Medium.
fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

fn default_num_questions() -> u8 {
    5
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_valid_create_session_request() {
        let request = CreateSessionRequest {
            api_key: "sk-test-key".to_string(),
            model: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let request = CreateSessionRequest {
            api_key: "".to_string(),
            model: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_topic_rejected() {
        let request = GenerateLessonRequest {
            topic: "".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_num_questions_bounds() {
        let too_few = GenerateQuizRequest {
            difficulty: Difficulty::Easy,
            num_questions: 2,
        };
        assert!(too_few.validate().is_err());

        let too_many = GenerateQuizRequest {
            difficulty: Difficulty::Easy,
            num_questions: 21,
        };
        assert!(too_many.validate().is_err());

        let just_right = GenerateQuizRequest {
            difficulty: Difficulty::Hard,
            num_questions: 20,
        };
        assert!(just_right.validate().is_ok());
    }

    #[test]
    fn test_quiz_request_defaults() {
        let request: GenerateQuizRequest =
            serde_json::from_str("{}").expect("empty body should deserialize with defaults");

        assert_eq!(request.difficulty, Difficulty::Medium);
        assert_eq!(request.num_questions, 5);
        assert!(request.validate().is_ok());
    }
}
