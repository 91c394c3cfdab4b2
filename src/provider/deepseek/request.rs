use crate::config::ProviderKind;
use crate::error::AgentError;
use crate::provider::wrong_payload;
use crate::types::{Request, Role, TextRequest};

use super::types::{DEFAULT_MODEL, TextInputRequest};

/// Extracts the DeepSeek payload, fills defaults and checks required fields.
pub(crate) fn prepare_request(request: Request) -> Result<TextInputRequest, AgentError> {
    let mut request = match request.into_payload()? {
        TextRequest::DeepSeek(request) => request,
        other => return Err(wrong_payload(ProviderKind::DeepSeek, other.provider())),
    };

    if request.model.is_empty() {
        request.model = DEFAULT_MODEL.to_string();
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
