//! Splitting raw model output into a message and quick-reply suggestions.

use crate::core::constants::{MAX_SUGGESTIONS, SUGGESTION_DELIMITER};

/// What the generator hands back for one assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl Reply {
    /// A reply carrying only a diagnostic; suggestions are always empty.
    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }
}

/// Parse the raw model text.
///
/// With the delimiter present, the text before its first occurrence is the
/// message and the non-blank lines after it (at most [`MAX_SUGGESTIONS`]) are
/// the suggestions. Without it the whole trimmed text is the message.
pub fn parse_reply(raw: &str) -> Reply {
    match raw.split_once(SUGGESTION_DELIMITER) {
        Some((message, tail)) => Reply {
            message: message.trim().to_string(),
            suggestions: tail
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .take(MAX_SUGGESTIONS)
                .map(str::to_owned)
                .collect(),
        },
        None => Reply::diagnostic(raw.trim()),
    }
}
