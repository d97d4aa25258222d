//! Prompt builder: fixed instructional template around the literal question.

/// Builds the outbound prompt for an assignment question.
///
/// The template asks for the direct answer only, with no explanation, so the
/// response drops straight into an answer box after normalization.
///
/// # Example
/// ```
/// # use gemini_service::prompt::build_prompt;
/// let prompt = build_prompt("What is the capital of France?");
/// assert!(prompt.contains("What is the capital of France?"));
/// ```
pub fn build_prompt(question: &str) -> String {
    format!(
        "You are helping with IIT Madras Online Degree in Data Science assignments.\n\n\
         Question: {question}\n\n\
         Answer only with the exact answer that should be entered into the assignment form. \
         Do not include explanations or anything else. Just the direct answer."
    )
}
