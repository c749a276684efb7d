use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{QuizQuestion, OPTIONS_PER_QUESTION};

// Leading ```/```json fence and the closing fence.
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[a-zA-Z]*\s*|\s*```$").expect("code fence pattern is valid"));

static STRAY_BACKTICKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`+").expect("stray backtick pattern is valid"));

// Quote the three contract keys when a model emits them bare. Restricted to
// key position (after `{` or `,`, before `:`) so option text is never
// rewritten.
static BARE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<pre>[{,]\s*)(?P<key>question|options|correct_answer)(?P<post>\s*:)")
        .expect("bare key pattern is valid")
});

const REQUIRED_KEYS: [&str; 3] = ["question", "options", "correct_answer"];

/// Turn a raw model completion into validated questions, or report exactly
/// which contract rule the payload broke. All-or-nothing: no partial quiz is
/// ever returned.
pub fn parse_quiz_response(raw: &str, expected_questions: usize) -> AppResult<Vec<QuizQuestion>> {
    let cleaned = clean_payload(raw);
    let value: Value =
        serde_json::from_str(&cleaned).map_err(|err| AppError::MalformedJson(err.to_string()))?;

    let items = value
        .as_array()
        .ok_or_else(|| AppError::Structure("expected a JSON array of questions".to_string()))?;
    if items.len() != expected_questions {
        return Err(AppError::Structure(format!(
            "expected a list of {} questions, got {}",
            expected_questions,
            items.len()
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_question(index, item))
        .collect()
}

/// Strip markdown fences and stray backticks, then quote bare contract keys.
fn clean_payload(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_fences = CODE_FENCE.replace_all(trimmed, "");
    let without_backticks = STRAY_BACKTICKS.replace_all(&without_fences, "");
    let quoted = BARE_KEY.replace_all(&without_backticks, "${pre}\"${key}\"${post}");
    quoted.trim().to_string()
}

fn parse_question(index: usize, item: &Value) -> AppResult<QuizQuestion> {
    let number = index + 1;
    let object = item
        .as_object()
        .ok_or_else(|| AppError::Structure(format!("question {} is not a JSON object", number)))?;

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(AppError::Structure(format!(
                "question {} is missing the '{}' key",
                number, key
            )));
        }
    }

    let question = object
        .get("question")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::Structure(format!(
                "question {} has an invalid question text: expected a string",
                number
            ))
        })?;

    let raw_options = object
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::Structure(format!(
                "question {} has invalid options: expected a list of {} options",
                number, OPTIONS_PER_QUESTION
            ))
        })?;
    if raw_options.len() != OPTIONS_PER_QUESTION {
        return Err(AppError::Structure(format!(
            "question {} has invalid options: expected a list of {} options, got {}",
            number,
            OPTIONS_PER_QUESTION,
            raw_options.len()
        )));
    }
    let options = raw_options
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| {
            AppError::Structure(format!(
                "question {} has invalid options: every option must be a string",
                number
            ))
        })?;

    let correct_answer = object
        .get("correct_answer")
        .and_then(Value::as_i64)
        .filter(|value| (0..OPTIONS_PER_QUESTION as i64).contains(value))
        .ok_or_else(|| {
            AppError::Structure(format!(
                "question {} has an invalid correct_answer: expected an integer 0-{}",
                number,
                OPTIONS_PER_QUESTION - 1
            ))
        })?;

    Ok(QuizQuestion {
        question: question.to_string(),
        options,
        correct_answer: correct_answer as usize,
    })
}
