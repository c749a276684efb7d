use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every generated question carries exactly this many answer options.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

/// A single multiple-choice question. Invariant: `options` holds exactly
/// [`OPTIONS_PER_QUESTION`] entries and `correct_answer` indexes the true
/// one, before and after shuffling.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuizQuestion {
    /// Shuffle the options uniformly and re-point `correct_answer` at the new
    /// position of the previously-correct text. Duplicate option text
    /// resolves to the first occurrence.
    pub fn shuffle_options<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let correct_text = self.options[self.correct_answer].clone();
        self.options.shuffle(rng);
        if let Some(position) = self.options.iter().position(|option| *option == correct_text) {
            self.correct_answer = position;
        }
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

/// A question the learner got wrong, kept for the end-of-quiz review.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MissedQuestion {
    pub question: String,
    pub correct_answer: String,
}

/// Progress through one generated quiz. Created in a single atomic batch;
/// advanced one question at a time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizState {
    pub questions: Vec<QuizQuestion>,
    pub current_index: usize,
    pub score: usize,
    pub wrong_answers: Vec<MissedQuestion>,
}

impl QuizState {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0,
            wrong_answers: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Return to the first question with zeroed progress. The questions (and
    /// their already-shuffled options) are kept as-is.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.wrong_answers.clear();
    }
}
