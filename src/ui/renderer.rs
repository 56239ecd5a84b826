use crate::core::app::{App, UiFocus};
use crate::core::message::Role;
use crate::ui::wrap::wrap_text;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const PERSONA_PANEL_WIDTH: u16 = 36;
const INPUT_HEIGHT: u16 = 3;
const SUGGESTION_ROW_HEIGHT: u16 = 3;
const USER_PREFIX: &str = "You: ";

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub history: Rect,
    pub suggestions: Option<Rect>,
    pub input: Rect,
    pub persona: Rect,
}

pub fn compute_layout(area: Rect, has_suggestions: bool) -> ScreenLayout {
    let persona_width = PERSONA_PANEL_WIDTH.min(area.width / 2);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(persona_width)])
        .split(area);

    let suggestion_height = if has_suggestions {
        SUGGESTION_ROW_HEIGHT
    } else {
        0
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(suggestion_height),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .split(columns[0]);

    ScreenLayout {
        history: rows[0],
        suggestions: has_suggestions.then_some(rows[1]),
        input: rows[2],
        persona: columns[1],
    }
}

/// History rows, pre-wrapped to `width` columns.
pub fn build_display_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for turn in app.conversation.turns() {
        match turn.role() {
            Role::User => {
                let prefixed = format!("{USER_PREFIX}{}", turn.content());
                for (i, row) in wrap_text(&prefixed, width).into_iter().enumerate() {
                    let style = Style::default().fg(Color::Cyan);
                    if i == 0 && row.starts_with(USER_PREFIX) {
                        let rest = row[USER_PREFIX.len()..].to_string();
                        lines.push(Line::from(vec![
                            Span::styled(USER_PREFIX, style.add_modifier(Modifier::BOLD)),
                            Span::styled(rest, style),
                        ]));
                    } else {
                        lines.push(Line::from(Span::styled(row, style)));
                    }
                }
            }
            Role::Assistant => {
                for row in wrap_text(turn.content(), width) {
                    lines.push(Line::from(Span::styled(
                        row,
                        Style::default().fg(Color::White),
                    )));
                }
            }
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Largest useful scroll offset for a history pane of `area`.
pub fn max_scroll_offset(app: &App, area: Rect) -> u16 {
    let available_height = area.height.saturating_sub(1);
    let total = build_display_lines(app, area.width).len();
    let total = u16::try_from(total).unwrap_or(u16::MAX);
    total.saturating_sub(available_height)
}

fn busy_symbol(app: &App) -> &'static str {
    let elapsed = app.ui.pulse_start.elapsed().as_millis() as f32 / 1000.0;
    let phase = (elapsed * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

fn history_title(app: &App) -> String {
    let mut title = format!(
        "quickreply v{} - {} • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.generator.settings().model,
        app.logging.get_status_string()
    );
    if app.ui.is_busy {
        title.push_str(&format!(" • {} Thinking...", busy_symbol(app)));
    } else if let Some(status) = &app.ui.status {
        title.push_str(&format!(" • {status}"));
    }
    title
}

/// Label shown on each suggestion chip; the number is the key that picks it.
pub fn suggestion_label(index: usize, text: &str, max_width: usize) -> String {
    let label = format!("{}: {}", index + 1, text);
    if label.width() <= max_width {
        return label;
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in label.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

fn render_suggestions(f: &mut Frame, app: &App, area: Rect) {
    let suggestions = app.conversation.suggestions();
    let constraints: Vec<Constraint> = suggestions
        .iter()
        .map(|_| Constraint::Ratio(1, suggestions.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (index, (text, cell)) in suggestions.iter().zip(cells.iter()).enumerate() {
        let inner_width = usize::from(cell.width.saturating_sub(2));
        let chip = Paragraph::new(suggestion_label(index, text, inner_width))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(chip, *cell);
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let layout = compute_layout(f.area(), !app.conversation.suggestions().is_empty());

    let lines = build_display_lines(app, layout.history.width);
    let max_offset = max_scroll_offset(app, layout.history);
    let scroll_offset = if app.ui.auto_scroll {
        max_offset
    } else {
        app.ui.scroll_offset.min(max_offset)
    };

    let history = Paragraph::new(lines)
        .block(Block::default().title(history_title(app)))
        .scroll((scroll_offset, 0));
    f.render_widget(history, layout.history);

    if let Some(area) = layout.suggestions {
        render_suggestions(f, app, area);
    }

    let focused = Style::default().fg(Color::Cyan);
    let unfocused = Style::default().fg(Color::DarkGray);

    let mut input = app.ui.input().clone();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if app.ui.focus == UiFocus::Input {
                focused
            } else {
                unfocused
            })
            .title("Message (Enter to send, F1-F3 to pick a suggestion, Tab for persona, Ctrl+C to quit)"),
    );
    f.render_widget(&input, layout.input);

    let mut persona = app.ui.persona_editor().clone();
    persona.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if app.ui.focus == UiFocus::Persona {
                focused
            } else {
                unfocused
            })
            .title("Persona (Enter to apply, Esc to discard)"),
    );
    f.render_widget(&persona, layout.persona);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reply::Reply;
    use crate::utils::test_utils::create_test_app;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn suggestion_row_only_when_suggestions_exist() {
        let area = Rect::new(0, 0, 100, 30);
        assert!(compute_layout(area, false).suggestions.is_none());
        let with = compute_layout(area, true);
        assert_eq!(with.suggestions.map(|r| r.height), Some(SUGGESTION_ROW_HEIGHT));
        assert_eq!(with.persona.width, PERSONA_PANEL_WIDTH);
    }

    #[test]
    fn display_lines_tag_user_turns_and_space_turns() {
        let mut app = create_test_app();
        app.begin_submission("Hi").unwrap();
        app.complete_submission(Reply::diagnostic("Hello\nthere"));

        let lines = build_display_lines(&app, 40);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text, ["You: Hi", "", "Hello", "there", ""]);
    }

    #[test]
    fn renders_history_suggestions_and_persona() {
        let mut app = create_test_app();
        app.begin_submission("Hi").unwrap();
        app.complete_submission(Reply {
            message: "Hello there".into(),
            suggestions: vec!["How are you?".into(), "Bye".into()],
        });

        let screen = render_to_string(&app, 120, 20);
        assert!(screen.contains("You: Hi"));
        assert!(screen.contains("Hello there"));
        assert!(screen.contains("1: How are you?"));
        assert!(screen.contains("2: Bye"));
        assert!(screen.contains("A helpful tester."));
    }

    #[test]
    fn busy_state_shows_indicator() {
        let mut app = create_test_app();
        app.begin_submission("Hi").unwrap();
        let screen = render_to_string(&app, 120, 12);
        assert!(screen.contains("Thinking..."));
    }

    #[test]
    fn long_suggestions_are_truncated_to_fit() {
        let label = suggestion_label(0, "a very long suggestion text", 12);
        assert!(label.width() <= 12);
        assert!(label.ends_with('…'));
        assert_eq!(suggestion_label(2, "ok", 12), "3: ok");
    }
}
