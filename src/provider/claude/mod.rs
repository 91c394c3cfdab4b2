//! Anthropic Messages API (`POST /v1/messages`).

mod provider;
mod request;
pub mod types;

pub use provider::{ANTHROPIC_VERSION, ClaudeClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use types::*;
