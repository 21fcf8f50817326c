//! LLM integration module.
//!
//! Provides an OpenAI-compatible client for LLM API calls and
//! the prompts used to ask for points of interest.

mod client;
mod prompts;

pub use client::{LlmClient, LlmResponse, MAX_TOKENS, Message, Role, TEMPERATURE, TokenUsage};
pub use prompts::Prompts;
