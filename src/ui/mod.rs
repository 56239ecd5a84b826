//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: terminal setup and the event loop that turns key presses
//!   into submissions, suggestion picks and persona edits.
//! - [`renderer`]: layout and frame output for history, suggestions, input
//!   and the persona editor.
//! - [`wrap`]: width-aware line wrapping shared by rendering and scrolling.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns the conversation and talks to the model.

pub mod chat_loop;
pub mod renderer;
pub mod wrap;
