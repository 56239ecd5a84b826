//! Shared constants used across the application

/// Marker line separating the main reply from the suggestion block.
pub const SUGGESTION_DELIMITER: &str = "---suggestions---";

/// Upper bound on quick-reply suggestions kept per assistant turn.
pub const MAX_SUGGESTIONS: usize = 3;

/// Persona used when the user leaves the persona editor blank.
pub const DEFAULT_PERSONA: &str =
    "You are a kind and friendly assistant. Always answer politely.";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable the API key is read from unless configured otherwise.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";
