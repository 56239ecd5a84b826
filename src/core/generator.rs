//! Turning persona text and conversation history into an assistant reply.
//!
//! [`ResponseGenerator::respond`] never fails: every error is folded into a
//! [`Reply`] whose message describes what went wrong and whose suggestion
//! list is empty.

use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::GeminiClient;
use crate::core::config::data::Config;
use crate::core::constants::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::core::prompt::build_prompt;
use crate::core::reply::{parse_reply, Reply};

/// Failures that can happen while producing a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No API key in the environment.
    MissingCredential { env_var: String },
    /// The HTTP client or model handle could not be set up.
    ModelInit { model: String, reason: String },
    /// The service answered but returned no text (e.g. a blocked prompt).
    EmptyResponse {
        finish_reason: Option<String>,
        feedback: Option<String>,
    },
    /// The service answered with a non-success status.
    Api { status: u16, summary: String },
    /// Connection, decoding or any other unexpected failure.
    Transport(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingCredential { env_var } => write!(
                f,
                "Error: no API key found. Set the {env_var} environment variable and try again."
            ),
            GenerationError::ModelInit { model, reason } => {
                write!(f, "Error while loading model '{model}': {reason}")
            }
            GenerationError::EmptyResponse {
                finish_reason,
                feedback,
            } => {
                write!(f, "The model returned no response.")?;
                if let Some(reason) = finish_reason {
                    write!(f, " Finish reason: {reason}.")?;
                }
                if let Some(feedback) = feedback {
                    write!(f, " Prompt feedback: {feedback}")?;
                }
                Ok(())
            }
            GenerationError::Api { status, summary } => {
                write!(f, "API request failed with status {status}: {summary}")
            }
            GenerationError::Transport(reason) => {
                write!(f, "Unexpected error while calling the API: {reason}")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// A text-generation service: one prompt in, raw text out.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Where and how to reach the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl GeneratorSettings {
    /// Settings from the config file, with an optional model override from the CLI.
    pub fn from_config(config: &Config, model_override: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            model: model_override
                .filter(|m| !m.trim().is_empty())
                .map(str::to_owned)
                .or_else(|| config.model.clone())
                .unwrap_or(defaults.model),
            base_url: config.base_url.clone().unwrap_or(defaults.base_url),
            api_key_env: config.api_key_env.clone().unwrap_or(defaults.api_key_env),
        }
    }
}

pub struct ResponseGenerator {
    settings: GeneratorSettings,
}

impl ResponseGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Read the API key from the environment at call time.
    pub fn credential(&self) -> Result<String, GenerationError> {
        std::env::var(&self.settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingCredential {
                env_var: self.settings.api_key_env.clone(),
            })
    }

    /// Produce a reply for the given persona and serialized history.
    pub async fn respond(&self, persona: &str, history: &str) -> Reply {
        fold_errors(self.try_respond(persona, history).await)
    }

    async fn try_respond(&self, persona: &str, history: &str) -> Result<Reply, GenerationError> {
        let api_key = self.credential()?;
        let backend = GeminiClient::new(&self.settings, api_key)?;
        generate_reply(&backend, persona, history).await
    }
}

/// Build the prompt, send it through `backend` and parse the result.
pub async fn generate_reply<B>(
    backend: &B,
    persona: &str,
    history: &str,
) -> Result<Reply, GenerationError>
where
    B: GenerationBackend + ?Sized,
{
    let prompt = build_prompt(persona, history);
    debug!(prompt_bytes = prompt.len(), "Sending generation request");
    let raw = backend.generate(&prompt).await?;
    let reply = parse_reply(&raw);
    debug!(
        message_bytes = reply.message.len(),
        suggestions = reply.suggestions.len(),
        "Parsed model reply"
    );
    Ok(reply)
}

/// Total variant of [`generate_reply`] for callers that hold a backend directly.
pub async fn respond_with<B>(backend: &B, persona: &str, history: &str) -> Reply
where
    B: GenerationBackend + ?Sized,
{
    fold_errors(generate_reply(backend, persona, history).await)
}

fn fold_errors(result: Result<Reply, GenerationError>) -> Reply {
    result.unwrap_or_else(|err| {
        warn!(error = %err, "Generation failed");
        Reply::diagnostic(err.to_string())
    })
}
