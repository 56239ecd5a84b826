use std::collections::VecDeque;

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tui_textarea::Input;

use crate::core::app::{App, PendingRequest, UiFocus};
use crate::ui::renderer::max_scroll_offset;

const MOUSE_SCROLL_LINES: u16 = 3;

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyLoopAction {
    /// State changed; redraw.
    Continue,
    /// Nothing changed.
    Ignored,
    /// A user turn was appended; issue this request.
    Submit(PendingRequest),
    /// Leave the chat.
    Break,
}

/// Map `F1`..`F3` and `Alt+1`..`Alt+3` to a suggestion index.
pub fn suggestion_index(key: &KeyEvent) -> Option<usize> {
    match key.code {
        KeyCode::F(n @ 1..=3) => Some(usize::from(n) - 1),
        KeyCode::Char(c @ '1'..='3') if key.modifiers.contains(KeyModifiers::ALT) => {
            Some(c as usize - '1' as usize)
        }
        _ => None,
    }
}

pub fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn is_newline_chord(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
        && (key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::SHIFT))
}

fn scroll_history(app: &mut App, history_area: Rect, up: bool, lines: u16) {
    let max_offset = max_scroll_offset(app, history_area);
    if app.ui.auto_scroll {
        app.ui.scroll_offset = max_offset;
    }
    if up {
        app.ui.scroll_up(lines);
    } else {
        app.ui.scroll_down(lines, max_offset);
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent, history_area: Rect) -> KeyLoopAction {
    if is_quit_key(&key) {
        app.ui.exit_requested = true;
        return KeyLoopAction::Break;
    }

    match app.ui.focus {
        UiFocus::Persona => handle_persona_key(app, key),
        UiFocus::Input => handle_input_key(app, key, history_area),
    }
}

fn handle_persona_key(app: &mut App, key: KeyEvent) -> KeyLoopAction {
    if is_newline_chord(&key) {
        app.ui.persona_editor_mut().insert_newline();
        return KeyLoopAction::Continue;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Tab => {
            app.apply_persona_edit();
            KeyLoopAction::Continue
        }
        KeyCode::Esc => {
            app.cancel_persona_edit();
            KeyLoopAction::Continue
        }
        _ => {
            if app.ui.persona_editor_mut().input(Input::from(key)) {
                KeyLoopAction::Continue
            } else {
                KeyLoopAction::Ignored
            }
        }
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent, history_area: Rect) -> KeyLoopAction {
    if let Some(index) = suggestion_index(&key) {
        return match app.select_suggestion(index) {
            Some(request) => KeyLoopAction::Submit(request),
            None => KeyLoopAction::Ignored,
        };
    }

    if is_newline_chord(&key) {
        app.ui.input_mut().insert_newline();
        return KeyLoopAction::Continue;
    }

    let page = history_area.height.saturating_sub(1).max(1);
    match key.code {
        KeyCode::Enter => match app.submit_input() {
            Some(request) => KeyLoopAction::Submit(request),
            None => KeyLoopAction::Ignored,
        },
        KeyCode::Tab => {
            app.ui.toggle_focus();
            KeyLoopAction::Continue
        }
        KeyCode::Up => {
            scroll_history(app, history_area, true, 1);
            KeyLoopAction::Continue
        }
        KeyCode::Down => {
            scroll_history(app, history_area, false, 1);
            KeyLoopAction::Continue
        }
        KeyCode::PageUp => {
            scroll_history(app, history_area, true, page);
            KeyLoopAction::Continue
        }
        KeyCode::PageDown => {
            scroll_history(app, history_area, false, page);
            KeyLoopAction::Continue
        }
        _ => {
            if app.ui.input_mut().input(Input::from(key)) {
                KeyLoopAction::Continue
            } else {
                KeyLoopAction::Ignored
            }
        }
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, history_area: Rect) -> KeyLoopAction {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            scroll_history(app, history_area, true, MOUSE_SCROLL_LINES);
            KeyLoopAction::Continue
        }
        MouseEventKind::ScrollDown => {
            scroll_history(app, history_area, false, MOUSE_SCROLL_LINES);
            KeyLoopAction::Continue
        }
        _ => KeyLoopAction::Ignored,
    }
}

/// Route one terminal event to the matching handler.
pub fn dispatch_event(app: &mut App, event: Event, history_area: Rect) -> KeyLoopAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key, history_area),
        Event::Mouse(mouse) => handle_mouse(app, mouse, history_area),
        Event::Paste(text) => handle_paste(app, &text),
        Event::Resize(_, _) => KeyLoopAction::Continue,
        _ => KeyLoopAction::Ignored,
    }
}

/// Hold an event that arrived while a reply was pending so it can be
/// dispatched afterwards. Returns `true` for Ctrl+C, which is never queued.
pub fn defer_event(event: Event, deferred: &mut VecDeque<Event>) -> bool {
    if let Event::Key(key) = &event {
        if key.kind == KeyEventKind::Press && is_quit_key(key) {
            return true;
        }
    }
    deferred.push_back(event);
    false
}

/// Insert pasted text into whichever editor has focus.
pub fn handle_paste(app: &mut App, text: &str) -> KeyLoopAction {
    let editor = match app.ui.focus {
        UiFocus::Input => app.ui.input_mut(),
        UiFocus::Persona => app.ui.persona_editor_mut(),
    };
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    if editor.insert_str(normalized) {
        KeyLoopAction::Continue
    } else {
        KeyLoopAction::Ignored
    }
}
