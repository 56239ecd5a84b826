//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::app::{self, AppInitConfig};
use crate::core::config::data::Config;
use crate::core::message::Role;

/// Print the assistant message followed by its suggestions as a numbered list.
pub fn write_reply<W: Write>(out: &mut W, message: &str, suggestions: &[String]) -> io::Result<()> {
    writeln!(out, "{message}")?;
    if !suggestions.is_empty() {
        writeln!(out)?;
        for (index, suggestion) in suggestions.iter().enumerate() {
            writeln!(out, "{}. {}", index + 1, suggestion)?;
        }
    }
    Ok(())
}

pub async fn run_say(
    prompt: Vec<String>,
    model: Option<String>,
    persona: Option<String>,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Usage: quickreply say <prompt>");
        std::process::exit(1);
    }

    let config = Config::load()?;
    let mut app = app::new_from_config(
        AppInitConfig {
            model,
            persona,
            log_file,
        },
        &config,
    );

    app.submit(prompt).await;

    let message = app
        .conversation
        .turns()
        .last()
        .filter(|turn| turn.role() == Role::Assistant)
        .map(|turn| turn.content().to_string())
        .unwrap_or_default();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_reply(&mut out, &message, app.conversation.suggestions())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_lists_numbered_suggestions_after_message() {
        let mut out = Vec::new();
        write_reply(
            &mut out,
            "Hello there!",
            &["How are you?".to_string(), "Tell me a joke".to_string()],
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Hello there!\n\n1. How are you?\n2. Tell me a joke\n"
        );
    }

    #[test]
    fn reply_without_suggestions_is_just_the_message() {
        let mut out = Vec::new();
        write_reply(&mut out, "Missing API key", &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Missing API key\n");
    }
}
