use async_trait::async_trait;
use tracing::debug;

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::core::generator::{GenerationBackend, GenerationError, GeneratorSettings};
use crate::utils::url::model_action_url;

/// Client for one Gemini model reached through the REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &GeneratorSettings, api_key: String) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| GenerationError::ModelInit {
                model: settings.model.clone(),
                reason: err.to_string(),
            })?;
        Self::with_http_client(client, settings, api_key)
    }

    pub fn with_http_client(
        client: reqwest::Client,
        settings: &GeneratorSettings,
        api_key: String,
    ) -> Result<Self, GenerationError> {
        let model = settings.model.trim();
        if model.is_empty() {
            return Err(GenerationError::ModelInit {
                model: settings.model.clone(),
                reason: "the model identifier is empty".to_string(),
            });
        }
        if model.contains(char::is_whitespace) || model.contains('/') {
            return Err(GenerationError::ModelInit {
                model: settings.model.clone(),
                reason: "the model identifier contains invalid characters".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            model: model.to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        model_action_url(&self.base_url, &self.model, "generateContent")
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = self.endpoint();
        debug!(model = %self.model, %url, "POST generateContent");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                summary: summarize_error_body(&body),
            });
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        match body.first_text() {
            Some(text) => Ok(text.to_string()),
            None => Err(GenerationError::EmptyResponse {
                finish_reason: body.finish_reason().map(str::to_owned),
                feedback: body.feedback_text(),
            }),
        }
    }
}

/// One-line summary of an error body: the API's `error.message` when the body
/// is JSON, otherwise the collapsed body text.
fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    let summary = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .or_else(|| value.get("message"))
                .and_then(|v| v.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| trimmed.to_string());

    summary.split_whitespace().collect::<Vec<_>>().join(" ")
}
