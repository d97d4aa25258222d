use serde::Serialize;

/// Response payload for POST /api/.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Final cleaned-up answer (plain text).
    pub answer: String,
}
