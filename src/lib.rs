//! quickreply is a terminal persona chat for Gemini models that pairs every
//! assistant reply with up to three suggested next messages.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the conversation, the persona, prompt construction, reply
//!   parsing and the response generator.
//! - [`api`] defines the `generateContent` payloads and the HTTP client that
//!   backs the generator.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`cli`] parses arguments and dispatches subcommands.
//! - [`utils`] holds transcript logging, tracing setup and URL helpers.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
