//! Duet - a minimal chat relay that forwards browser messages to LLM providers.

pub mod chat;
pub mod config;
pub mod handlers;
pub mod llm;
pub mod response;
pub mod server;
