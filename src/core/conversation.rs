//! Per-session conversation state: turns, persona text and pending suggestions.

use crate::core::constants::{DEFAULT_PERSONA, MAX_SUGGESTIONS};
use crate::core::message::{ChatTurn, Role};

/// Holds everything one interactive session knows about the conversation.
///
/// Turns are append-only. The suggestion list never holds more than
/// [`MAX_SUGGESTIONS`] entries.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    persona: String,
    suggestions: Vec<String>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}

impl Conversation {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            turns: Vec::new(),
            persona: persona.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn append_turn(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ChatTurn::new(role, content));
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Replace the persona used for the next request. Past turns are kept.
    ///
    /// Returns `true` when the stored text actually changed.
    pub fn set_persona(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.persona {
            return false;
        }
        self.persona = text;
        true
    }

    /// The persona as the user last entered it, blank or not.
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// The persona sent with requests; blank input falls back to the default.
    pub fn active_persona(&self) -> &str {
        if self.persona.trim().is_empty() {
            DEFAULT_PERSONA
        } else {
            &self.persona
        }
    }

    pub fn serialize_history(&self) -> String {
        self.serialize_history_window(None)
    }

    /// Like [`serialize_history`](Self::serialize_history) but limited to the
    /// most recent `window` turns when a window is given. A zero window is
    /// ignored.
    pub fn serialize_history_window(&self, window: Option<usize>) -> String {
        let skip = window
            .filter(|w| *w > 0)
            .map(|w| self.turns.len().saturating_sub(w))
            .unwrap_or(0);
        self.turns
            .iter()
            .skip(skip)
            .map(ChatTurn::history_line)
            .collect()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        let mut suggestions = suggestions;
        suggestions.truncate(MAX_SUGGESTIONS);
        self.suggestions = suggestions;
    }

    pub fn clear_suggestions(&mut self) {
        self.suggestions.clear();
    }

    /// Pick a suggestion by position. The whole set is cleared on success.
    pub fn take_suggestion(&mut self, index: usize) -> Option<String> {
        if index >= self.suggestions.len() {
            return None;
        }
        let chosen = self.suggestions.swap_remove(index);
        self.suggestions.clear();
        Some(chosen)
    }
}
