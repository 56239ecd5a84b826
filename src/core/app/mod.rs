//! Session controller: the conversation, the generator and the UI state for
//! one interactive session.
//!
//! A submission is split into [`App::begin_submission`] and
//! [`App::complete_submission`] so the event loop can draw its busy indicator
//! while the request is in flight. [`App::submit`] runs both halves.

use tracing::{debug, info, warn};

use crate::core::config::data::Config;
use crate::core::conversation::Conversation;
use crate::core::generator::{GeneratorSettings, ResponseGenerator};
use crate::core::message::{ChatTurn, Role};
use crate::core::reply::Reply;
use crate::utils::logging::LoggingState;

pub mod ui_state;

pub use ui_state::{UiFocus, UiState};

/// Everything needed to issue one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub persona: String,
    pub history: String,
}

pub struct App {
    pub conversation: Conversation,
    pub generator: ResponseGenerator,
    pub logging: LoggingState,
    pub history_window: Option<usize>,
    pub ui: UiState,
}

/// Startup options gathered from the CLI and the config file.
pub struct AppInitConfig {
    pub model: Option<String>,
    pub persona: Option<String>,
    pub log_file: Option<String>,
}

pub fn new_from_config(init: AppInitConfig, config: &Config) -> App {
    let persona = init
        .persona
        .or_else(|| config.persona.clone())
        .unwrap_or_else(|| crate::core::constants::DEFAULT_PERSONA.to_string());
    let settings = GeneratorSettings::from_config(config, init.model.as_deref());
    info!(model = %settings.model, "Starting session");

    App::new(
        Conversation::new(persona),
        settings,
        LoggingState::new(init.log_file),
        config.history_window,
    )
}

impl App {
    pub fn new(
        conversation: Conversation,
        settings: GeneratorSettings,
        logging: LoggingState,
        history_window: Option<usize>,
    ) -> Self {
        let ui = UiState::new(conversation.persona());
        let app = Self {
            conversation,
            generator: ResponseGenerator::new(settings),
            logging,
            history_window,
            ui,
        };
        if let Err(e) = app.logging.log_session_start(app.conversation.persona()) {
            warn!(error = %e, "Failed to write transcript header");
        }
        app
    }

    fn record_turn(&mut self, role: Role, content: String) {
        if let Err(e) = self.logging.log_turn(&ChatTurn::new(role, content.as_str())) {
            warn!(error = %e, "Failed to log message");
        }
        self.conversation.append_turn(role, content);
    }

    /// Append the user turn, clear suggestions and capture the request.
    ///
    /// Blank text is ignored and returns `None`.
    pub fn begin_submission(&mut self, text: impl Into<String>) -> Option<PendingRequest> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }

        self.ui.clear_status();
        self.conversation.clear_suggestions();
        self.record_turn(Role::User, text);
        self.ui.is_busy = true;
        self.ui.auto_scroll = true;

        let request = PendingRequest {
            persona: self.conversation.active_persona().to_string(),
            history: self
                .conversation
                .serialize_history_window(self.history_window),
        };
        debug!(
            turns = self.conversation.turns().len(),
            history_bytes = request.history.len(),
            "Prepared generation request"
        );
        Some(request)
    }

    /// Submit the suggestion at `index` as if the user had typed it.
    pub fn select_suggestion(&mut self, index: usize) -> Option<PendingRequest> {
        let text = self.conversation.take_suggestion(index)?;
        debug!(index, "Selected suggestion");
        self.begin_submission(text)
    }

    /// Submit whatever is in the input editor, clearing it.
    pub fn submit_input(&mut self) -> Option<PendingRequest> {
        let text = self.ui.input_text();
        if text.trim().is_empty() {
            return None;
        }
        self.ui.clear_input();
        self.begin_submission(text)
    }

    pub fn complete_submission(&mut self, reply: Reply) {
        let Reply {
            message,
            suggestions,
        } = reply;
        self.record_turn(Role::Assistant, message);
        self.conversation.set_suggestions(suggestions);
        if let Err(e) = self.logging.log_suggestions(self.conversation.suggestions()) {
            warn!(error = %e, "Failed to log suggestions");
        }
        self.ui.is_busy = false;
    }

    pub async fn run_request(&self, request: &PendingRequest) -> Reply {
        self.generator
            .respond(&request.persona, &request.history)
            .await
    }

    /// Full submit flow: user turn, one request, assistant turn.
    pub async fn submit(&mut self, text: impl Into<String>) -> bool {
        let Some(request) = self.begin_submission(text) else {
            return false;
        };
        let reply = self.run_request(&request).await;
        self.complete_submission(reply);
        true
    }

    /// Apply the persona editor's text. Returns whether the persona changed.
    pub fn apply_persona_edit(&mut self) -> bool {
        let text = self.ui.persona_text();
        let changed = self.conversation.set_persona(text);
        if changed {
            info!("Persona updated");
            if let Err(e) = self
                .logging
                .log_persona_change(self.conversation.active_persona())
            {
                warn!(error = %e, "Failed to log persona change");
            }
            self.ui.set_status("Persona updated");
        }
        self.ui.focus = UiFocus::Input;
        changed
    }

    pub fn cancel_persona_edit(&mut self) {
        let persona = self.conversation.persona().to_string();
        self.ui.reset_persona_editor(&persona);
        self.ui.focus = UiFocus::Input;
    }
}
