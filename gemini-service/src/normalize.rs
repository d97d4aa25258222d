//! Answer cleanup matching assignment-answer-box conventions.

const FENCE: &str = "```";

/// Normalizes raw model output into a form-ready answer.
///
/// - Trims leading/trailing whitespace.
/// - Removes every literal double-quote and single-quote character anywhere
///   in the string, not just at the ends. This matches answer-box
///   conventions even though it can corrupt legitimate quoted content.
/// - If the result both starts and ends with a ``` fence, strips exactly one
///   marker from each end and re-trims.
///
/// No other transformation: no case-folding, no numeric parsing.
///
/// # Example
/// ```
/// # use gemini_service::normalize::normalize;
/// assert_eq!(normalize(" \"4\" "), "4");
/// assert_eq!(normalize("```Paris```"), "Paris");
/// ```
pub fn normalize(raw: &str) -> String {
    let answer: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();

    // The string must be long enough to carry two distinct fences.
    if answer.len() >= 2 * FENCE.len() && answer.starts_with(FENCE) && answer.ends_with(FENCE) {
        return answer[FENCE.len()..answer.len() - FENCE.len()]
            .trim()
            .to_string();
    }

    answer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_strips_quotes() {
        assert_eq!(normalize(" \"4\" "), "4");
    }

    #[test]
    fn strips_quotes_everywhere() {
        assert_eq!(normalize("It's \"fine\""), "Its fine");
    }

    #[test]
    fn unwraps_code_fence() {
        assert_eq!(normalize("```Paris```"), "Paris");
        assert_eq!(normalize("``` Paris ```"), "Paris");
    }

    #[test]
    fn lone_fence_is_untouched() {
        assert_eq!(normalize("```"), "```");
    }

    #[test]
    fn plain_answers_pass_through() {
        assert_eq!(normalize("42"), "42");
        assert_eq!(normalize("  multi word answer\n"), "multi word answer");
    }

    #[test]
    fn is_idempotent() {
        for s in [" \"4\" ", "```Paris```", "It's \"fine\"", "  42  ", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
