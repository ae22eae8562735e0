use serde::{Deserialize, Serialize};

/// Question as sent to the client: correct-answer fields stripped.
#[derive(Debug, Serialize)]
pub struct SanitizedQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<SanitizedOption>,
}

#[derive(Debug, Serialize)]
pub struct SanitizedOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerSubmission {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "optionId")]
    pub option_id: String,
}

/// Per-question grading result. Field names match the client contract.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub question: String,
    #[serde(rename = "selectedOption")]
    pub selected_option: Option<String>,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: Option<String>,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    #[serde(rename = "totalPoints")]
    pub total_points: i64,
    pub results: Vec<AnswerResult>,
    pub new_badges: Vec<String>,
    /// The user's cumulative point total after this submission.
    pub user_points: i64,
}
