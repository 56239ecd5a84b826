//! Interactive chat session: terminal setup, input dispatch and rendering.
//!
//! The loop is single-threaded. While a generation request is in flight the
//! loop keeps redrawing the busy indicator and watches for Ctrl+C. Other input
//! is queued and dispatched in order once the reply has been recorded.

pub mod keybindings;
pub mod lifecycle;

use std::collections::VecDeque;
use std::error::Error;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event};
use ratatui::layout::Rect;
use tracing::{debug, info};

use self::keybindings::{defer_event, dispatch_event, KeyLoopAction};
use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::core::app::{App, PendingRequest};
use crate::ui::renderer::{compute_layout, ui};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const BUSY_FRAME_INTERVAL: Duration = Duration::from_millis(120);
const STATUS_TTL: Duration = Duration::from_secs(3);

fn history_area(terminal: &ChatTerminal, app: &App) -> Rect {
    let size = terminal.size().unwrap_or_default();
    let area = Rect::new(0, 0, size.width, size.height);
    compute_layout(area, !app.conversation.suggestions().is_empty()).history
}

/// Queue whatever input is waiting. Returns `true` once Ctrl+C is seen.
fn collect_pending_events(deferred: &mut VecDeque<Event>) -> std::io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if defer_event(event::read()?, deferred) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run one request while animating the busy indicator.
///
/// Input other than Ctrl+C is queued in `deferred`. Returns `false` if the
/// user quit before the reply arrived.
async fn await_reply(
    terminal: &mut ChatTerminal,
    app: &mut App,
    request: PendingRequest,
    deferred: &mut VecDeque<Event>,
) -> Result<bool, Box<dyn Error>> {
    terminal.draw(|f| ui(f, app))?;

    let reply = {
        let app_view: &App = app;
        let request_future = app_view.run_request(&request);
        tokio::pin!(request_future);
        let mut ticker = tokio::time::interval(BUSY_FRAME_INTERVAL);

        loop {
            tokio::select! {
                reply = &mut request_future => break Some(reply),
                _ = ticker.tick() => {
                    if collect_pending_events(deferred)? {
                        break None;
                    }
                    terminal.draw(|f| ui(f, app_view))?;
                }
            }
        }
    };

    match reply {
        Some(reply) => {
            app.complete_submission(reply);
            Ok(true)
        }
        None => {
            info!("Quit while a request was in flight");
            app.ui.exit_requested = true;
            Ok(false)
        }
    }
}

async fn event_loop(terminal: &mut ChatTerminal, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut needs_redraw = true;
    let mut deferred = VecDeque::new();

    while !app.ui.exit_requested {
        if app.ui.expire_status(STATUS_TTL) {
            needs_redraw = true;
        }
        if needs_redraw {
            terminal.draw(|f| ui(f, app))?;
            needs_redraw = false;
        }

        let event = match deferred.pop_front() {
            Some(event) => event,
            None => {
                if !event::poll(POLL_INTERVAL)? {
                    continue;
                }
                event::read()?
            }
        };

        let area = history_area(terminal, app);
        let action = dispatch_event(app, event, area);

        match action {
            KeyLoopAction::Continue => needs_redraw = true,
            KeyLoopAction::Ignored => {}
            KeyLoopAction::Break => break,
            KeyLoopAction::Submit(request) => {
                debug!("Submitting turn");
                if !await_reply(terminal, app, request, &mut deferred).await? {
                    break;
                }
                needs_redraw = true;
            }
        }
    }

    Ok(())
}

/// Take over the terminal and chat until the user quits.
pub async fn run_chat(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    info!(turns = app.conversation.turns().len(), "Chat session ended");
    result
}
