//! Text-generation service access: HTTP client, prompts and JSON extraction

pub mod client;
pub mod extract;
pub mod prompts;

pub use client::LlmClient;
