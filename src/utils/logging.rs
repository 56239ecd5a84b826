//! Optional plain-text transcript of the session.

use crate::core::message::{ChatTurn, Role};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct LoggingState {
    file_path: Option<String>,
}

impl LoggingState {
    /// Logging is active as soon as a file is given.
    pub fn new(log_file: Option<String>) -> Self {
        LoggingState {
            file_path: log_file,
        }
    }

    /// Header written once when a session starts.
    pub fn log_session_start(&self, persona: &str) -> Result<(), Box<dyn std::error::Error>> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut header = format!("## Session started {timestamp}");
        if !persona.trim().is_empty() {
            header.push_str(&format!("\n## Persona: {}", persona.trim()));
        }
        self.write_block(&header)
    }

    pub fn log_persona_change(&self, persona: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.write_block(&format!("## Persona updated: {}", persona.trim()))
    }

    pub fn log_turn(&self, turn: &ChatTurn) -> Result<(), Box<dyn std::error::Error>> {
        match turn.role() {
            Role::User => self.write_block(&format!("You: {}", turn.content())),
            Role::Assistant => self.write_block(turn.content()),
        }
    }

    pub fn log_suggestions(&self, suggestions: &[String]) -> Result<(), Box<dyn std::error::Error>> {
        if suggestions.is_empty() {
            return Ok(());
        }
        let lines: Vec<String> = suggestions.iter().map(|s| format!("  > {s}")).collect();
        self.write_block(&lines.join("\n"))
    }

    fn write_block(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        // Blank line between entries, matching the on-screen spacing
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn get_status_string(&self) -> String {
        match &self.file_path {
            Some(path) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            None => "disabled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn inactive_logger_writes_nothing() {
        let logging = LoggingState::new(None);
        logging.log_turn(&ChatTurn::user("hello")).unwrap();
        assert_eq!(logging.get_status_string(), "disabled");
    }

    #[test]
    fn turns_and_suggestions_are_appended_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned()));

        logging.log_turn(&ChatTurn::user("Hi")).unwrap();
        logging
            .log_turn(&ChatTurn::assistant("Hello!\nNice to meet you."))
            .unwrap();
        logging
            .log_suggestions(&["Thanks".to_string(), "Who are you?".to_string()])
            .unwrap();
        logging.log_suggestions(&[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "You: Hi\n\nHello!\nNice to meet you.\n\n  > Thanks\n  > Who are you?\n\n"
        );
        assert_eq!(logging.get_status_string(), "active (chat.log)");
    }

    #[test]
    fn session_header_mentions_persona_when_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned()));

        logging.log_session_start("  A pirate.  ").unwrap();
        logging.log_session_start("").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("## Session started "));
        assert!(contents.contains("## Persona: A pirate.\n"));
        assert_eq!(contents.matches("## Persona:").count(), 1);
    }
}
