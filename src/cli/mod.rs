//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cli::say::run_say;
use crate::cli::settings::{run_set, run_unset};
use crate::core::app::{self, AppInitConfig};
use crate::core::config::data::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::tracing_setup::{init_tracing, TraceTarget};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "quickreply")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A persona chat client that offers quick-reply suggestions")]
#[command(
    long_about = "quickreply is a full-screen terminal chat with a Gemini model. The assistant \
follows an editable persona, and every reply comes with up to three suggested next messages \
you can send with a single key.\n\n\
Environment Variables:\n\
  GOOGLE_API_KEY    Your Gemini API key (the variable name can be changed with 'set api-key-env')\n\
  RUST_LOG          Filter for diagnostic output (see --trace-file)\n\n\
Controls:\n\
  Enter             Send the message, or apply the persona when editing it\n\
  F1-F3 / Alt+1-3   Send the corresponding suggestion\n\
  Tab               Switch between the message input and the persona editor\n\
  Esc               Discard persona edits\n\
  Up/Down/PgUp/PgDn Scroll through chat history\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for this session
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Persona for this session (overrides the configured persona)
    #[arg(long, global = true, value_name = "TEXT")]
    pub persona: Option<String>,

    /// Write a transcript of the conversation to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Write diagnostic tracing output to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub trace_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message and print the reply with its suggestions
    Say {
        /// Message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set a configuration value, or list all values when none is given
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

impl Args {
    fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Chat))
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(&TraceTarget::select(
        args.trace_file.clone(),
        args.is_interactive(),
    ))?;

    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    debug!(command = ?args.command, "Dispatching command");

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let app = app::new_from_config(
                AppInitConfig {
                    model: args.model,
                    persona: args.persona,
                    log_file: args.log,
                },
                &config,
            );
            run_chat(app).await
        }
        Commands::Say { prompt } => run_say(prompt, args.model, args.persona, args.log).await,
        Commands::Set { key, value } => {
            if let Err(e) = run_set(&key, &value) {
                e.print();
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Unset { key } => {
            if let Err(e) = run_unset(&key) {
                e.print();
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
