use crate::config::ProviderKind;
use crate::error::AgentError;
use crate::provider::wrong_payload;
use crate::types::{Request, Role, TextRequest};

use super::types::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, TextInputRequest};

/// Extracts the Claude payload, fills defaults and checks required fields.
pub(crate) fn prepare_request(request: Request) -> Result<TextInputRequest, AgentError> {
    let mut request = match request.into_payload()? {
        TextRequest::Claude(request) => request,
        other => return Err(wrong_payload(ProviderKind::Claude, other.provider())),
    };

    if request.model.is_empty() {
        request.model = DEFAULT_MODEL.to_string();
    }
    if request.max_tokens.unwrap_or(0) == 0 {
        request.max_tokens = Some(DEFAULT_MAX_TOKENS);
    }
    if request.messages.is_empty() {
        return Err(AgentError::invalid_input("messages is required"));
    }
    for message in &mut request.messages {
        if message.role.is_empty() {
            message.role = Role::user();
        }
        if message.content.is_empty() {
            return Err(AgentError::invalid_input("content in message is required"));
        }
    }

    Ok(request)
}
