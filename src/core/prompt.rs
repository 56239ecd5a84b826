//! Composite prompt construction.

use crate::core::constants::{MAX_SUGGESTIONS, SUGGESTION_DELIMITER};

/// Wrap persona text in the instruction block placed at the top of the prompt.
///
/// Returns an empty string for blank personas.
pub fn persona_block(persona: &str) -> String {
    let persona = persona.trim();
    if persona.is_empty() {
        return String::new();
    }
    format!(
        "Act as the persona described below. Stay in this persona consistently for the rest of the conversation.\n\
--- persona start ---\n\
{persona}\n\
--- persona end ---\n\n"
    )
}

/// Trailing instructions asking for a reply followed by quick-reply candidates.
pub fn suggestion_instructions() -> String {
    let placeholders: String = (1..=MAX_SUGGESTIONS)
        .map(|n| format!("[suggestion {n}]\n"))
        .collect();
    format!(
        "Taking the conversation above and the given persona into account, reply normally.\n\
After your reply, propose {MAX_SUGGESTIONS} natural replies the user is likely to send next.\n\
Write them after the delimiter '{SUGGESTION_DELIMITER}', one per line, in this format:\n\
{SUGGESTION_DELIMITER}\n\
{placeholders}\
Do not wrap the candidate lines in []. Write plain text only, without numbers or bullet symbols."
    )
}

/// Build the single prompt sent to the model: persona block (if any), the
/// serialized history, then the suggestion instructions.
pub fn build_prompt(persona: &str, history: &str) -> String {
    format!(
        "{}{}\n\n{}",
        persona_block(persona),
        history,
        suggestion_instructions()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_persona_produces_no_persona_block() {
        let prompt = build_prompt("", "user: Hi\n");
        assert!(prompt.starts_with("user: Hi\n"));
        assert!(!prompt.contains("persona start"));
        assert!(prompt.contains(SUGGESTION_DELIMITER));
    }

    #[test]
    fn whitespace_persona_is_treated_as_blank() {
        assert_eq!(persona_block("  \n\t"), "");
        assert!(!build_prompt(" \n ", "user: Hi\n").contains("persona start"));
    }

    #[test]
    fn persona_block_precedes_history() {
        let prompt = build_prompt("  A calm butler.  ", "user: Hi\n");
        let persona_at = prompt.find("A calm butler.").expect("persona present");
        let history_at = prompt.find("user: Hi").expect("history present");
        assert!(persona_at < history_at);
        assert!(prompt.contains("--- persona start ---\nA calm butler.\n--- persona end ---"));
    }

    #[test]
    fn instructions_follow_history_and_name_the_delimiter() {
        let prompt = build_prompt("", "user: Hi\nassistant: Hello\n");
        let history_end = prompt.find("assistant: Hello").expect("history present");
        let delimiter_at = prompt.find(SUGGESTION_DELIMITER).expect("delimiter present");
        assert!(history_end < delimiter_at);
        assert!(prompt.contains("[suggestion 3]"));
        assert!(!prompt.contains("[suggestion 4]"));
    }
}
