//! Payloads for the Gemini `generateContent` endpoint.

pub mod gemini;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use gemini::GeminiClient;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A request carrying one user message made of a single text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<Value>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if there is one.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// Why the first candidate stopped, e.g. `SAFETY` for a blocked answer.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    /// Provider feedback rendered as compact JSON; `None` when absent or empty.
    pub fn feedback_text(&self) -> Option<String> {
        match self.prompt_feedback.as_ref()? {
            Value::Null => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}
