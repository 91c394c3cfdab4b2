use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderKind;
use crate::error::AgentError;
use crate::types::{Request, Response};

pub mod chatgpt;
pub mod claude;
pub mod deepseek;

/// Common ask-and-answer contract implemented by every provider client.
#[async_trait]
pub trait AiAgent: Send + Sync {
    /// Validates the wrapped payload, sends it in a single POST and returns the decoded
    /// answer.
    ///
    /// # Errors
    ///
    /// - [`AgentError::InvalidInput`] for an empty envelope, a payload meant for another
    ///   provider, or missing required fields.
    /// - [`AgentError::Network`] when the exchange fails or times out.
    /// - [`AgentError::Upstream`] for a non-2xx status.
    /// - [`AgentError::Decode`] when the body does not match the response schema.
    async fn ask_ai(&self, request: Request) -> Result<Response, AgentError>;

    /// Provider served by this agent.
    fn kind(&self) -> ProviderKind;
}

/// Thread-safe agent handle returned by [`crate::agent::new_agent`].
pub type DynAgent = Arc<dyn AiAgent>;

pub(crate) fn wrong_payload(expected: ProviderKind, got: ProviderKind) -> AgentError {
    AgentError::invalid_input(format!("{expected} agent cannot handle a {got} request"))
}

/// Returns `fallback` when the configured endpoint is blank.
pub(crate) fn resolve_endpoint<'a>(configured: &'a str, fallback: &'a str) -> &'a str {
    if configured.trim().is_empty() {
        fallback
    } else {
        configured
    }
}
