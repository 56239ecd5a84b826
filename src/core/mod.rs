pub mod app;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod generator;
pub mod message;
pub mod prompt;
pub mod reply;
