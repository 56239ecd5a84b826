use std::time::Instant;

use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

/// Which editor receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFocus {
    Input,
    Persona,
}

pub struct UiState {
    input: TextArea<'static>,
    persona_editor: TextArea<'static>,
    pub focus: UiFocus,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub is_busy: bool,
    pub pulse_start: Instant,
    pub status: Option<String>,
    pub status_set_at: Option<Instant>,
    pub exit_requested: bool,
}

fn styled_textarea(lines: Vec<String>, placeholder: &str) -> TextArea<'static> {
    let mut textarea = TextArea::new(lines);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    textarea.set_placeholder_text(placeholder.to_string());
    textarea
}

/// Editor lines for `text`; joining them with `\n` gives `text` back.
fn text_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

impl UiState {
    pub fn new(persona: &str) -> Self {
        Self {
            input: styled_textarea(vec![String::new()], "Type a message..."),
            persona_editor: styled_textarea(text_lines(persona), "Describe the assistant's persona"),
            focus: UiFocus::Input,
            scroll_offset: 0,
            auto_scroll: true,
            is_busy: false,
            pulse_start: Instant::now(),
            status: None,
            status_set_at: None,
            exit_requested: false,
        }
    }

    pub fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.input
    }

    pub fn persona_editor(&self) -> &TextArea<'static> {
        &self.persona_editor
    }

    pub fn persona_editor_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.persona_editor
    }

    pub fn input_text(&self) -> String {
        self.input.lines().join("\n")
    }

    pub fn persona_text(&self) -> String {
        self.persona_editor.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.input = styled_textarea(vec![String::new()], "Type a message...");
    }

    /// Replace the persona editor contents, e.g. to discard an edit.
    pub fn reset_persona_editor(&mut self, persona: &str) {
        self.persona_editor =
            styled_textarea(text_lines(persona), "Describe the assistant's persona");
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            UiFocus::Input => UiFocus::Persona,
            UiFocus::Persona => UiFocus::Input,
        };
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
        self.status_set_at = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_set_at = None;
    }

    /// Drop the status once it has been visible for `ttl`.
    pub fn expire_status(&mut self, ttl: std::time::Duration) -> bool {
        match self.status_set_at {
            Some(set_at) if set_at.elapsed() >= ttl => {
                self.clear_status();
                true
            }
            _ => false,
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// Scroll down, re-enabling auto-scroll once the bottom is reached.
    pub fn scroll_down(&mut self, lines: u16, max_offset: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(max_offset);
        if self.scroll_offset >= max_offset {
            self.auto_scroll = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn persona_editor_starts_with_persona_lines() {
        let ui = UiState::new("Line one\nLine two");
        assert_eq!(ui.persona_text(), "Line one\nLine two");
        assert_eq!(ui.input_text(), "");
        assert_eq!(ui.focus, UiFocus::Input);
    }

    #[test]
    fn persona_editor_keeps_trailing_newline() {
        let ui = UiState::new("A\n");
        assert_eq!(ui.persona_text(), "A\n");
        assert_eq!(UiState::new("").persona_text(), "");
    }

    #[test]
    fn focus_toggles_between_editors() {
        let mut ui = UiState::new("");
        ui.toggle_focus();
        assert_eq!(ui.focus, UiFocus::Persona);
        ui.toggle_focus();
        assert_eq!(ui.focus, UiFocus::Input);
    }

    #[test]
    fn reset_persona_editor_discards_edits() {
        let mut ui = UiState::new("Original");
        ui.persona_editor_mut().insert_str(" edited");
        assert_ne!(ui.persona_text(), "Original");
        ui.reset_persona_editor("Original");
        assert_eq!(ui.persona_text(), "Original");
    }

    #[test]
    fn status_expires_after_ttl() {
        let mut ui = UiState::new("");
        ui.set_status("Persona updated");
        assert!(!ui.expire_status(Duration::from_secs(60)));
        assert!(ui.expire_status(Duration::ZERO));
        assert!(ui.status.is_none());
    }

    #[test]
    fn scrolling_toggles_auto_scroll() {
        let mut ui = UiState::new("");
        ui.scroll_offset = 5;
        ui.scroll_up(2);
        assert_eq!(ui.scroll_offset, 3);
        assert!(!ui.auto_scroll);

        ui.scroll_down(10, 6);
        assert_eq!(ui.scroll_offset, 6);
        assert!(ui.auto_scroll);
    }
}
