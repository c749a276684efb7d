use crate::models::domain::{Difficulty, LearnerProfile, OPTIONS_PER_QUESTION};

/// Prompt for the initial personalized explanation of a topic.
pub fn build_explanation_prompt(topic: &str, profile: &LearnerProfile) -> String {
    format!(
        "You are an expert educator specialized in creating personalized learning experiences. \
         Your task is to explain topics using analogies and examples that relate to the learner's \
         interests, experiences, and emotions. Make the content engaging, memorable, and easy to \
         understand.\n\
         \n\
         Explain the following topic: {topic}\n\
         \n\
         Use this information about the learner to create personalized analogies and explanations:\n\
         \n\
         {personal_info}\n\
         \n\
         Provide a comprehensive explanation of the topic, using analogies and examples that \
         relate to the learner's interests, experiences, and emotions.",
        personal_info = profile.personal_info,
    )
}

/// Prompt for answering a follow-up question, grounded in the most recent
/// explanation or answer.
pub fn build_follow_up_prompt(question: &str, profile: &LearnerProfile, prior_context: &str) -> String {
    format!(
        "Based on the previous explanation and the learner's personal information, answer the \
         following follow-up question:\n\
         \n\
         Question: {question}\n\
         \n\
         Learner's interests: {personal_info}\n\
         \n\
         Provide a detailed answer, continuing to use personalized analogies and examples.\n\
         Previous context:\n\
         {prior_context}",
        personal_info = profile.personal_info,
    )
}

/// Prompt for quiz generation. Spells out the machine-readable contract the
/// response parser enforces: a JSON array of objects with `question`,
/// `options` and `correct_answer` keys.
pub fn build_quiz_prompt(
    topic: &str,
    content: &str,
    difficulty: Difficulty,
    num_questions: u8,
) -> String {
    format!(
        "Based on the following learning content about {topic}, create a quiz with \
         {num_questions} multiple-choice questions. Each question should have {option_count} \
         options with only one correct answer, and the option texts should be distinct. \
         The difficulty level should be {difficulty}.\n\
         Format the output as a JSON array of objects, where each object represents a question \
         with the following keys:\n\
         - \"question\": the question text\n\
         - \"options\": an array of exactly {option_count} possible answers\n\
         - \"correct_answer\": the index of the correct answer (an integer from 0 to {max_index})\n\
         \n\
         Learning content:\n\
         {content}\n\
         \n\
         Generate the quiz questions and return them as a valid JSON array without any markdown \
         formatting:",
        option_count = OPTIONS_PER_QUESTION,
        max_index = OPTIONS_PER_QUESTION - 1,
    )
}
