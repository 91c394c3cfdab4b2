//! Provider-agnostic request and response envelopes.
//!
//! An envelope carries exactly one provider payload. The payload types themselves
//! live next to each provider (`crate::provider::chatgpt::types` and friends); the
//! envelope only lets callers hand them to any [`crate::provider::AiAgent`] without
//! naming the concrete client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ProviderKind;
use crate::error::AgentError;
use crate::provider::{chatgpt, claude, deepseek};

/// Payload that can serialize itself to the provider's JSON wire bytes.
pub trait Requester {
    /// Serializes the payload.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidInput`] if the payload cannot be represented as JSON.
    fn marshal(&self) -> Result<Vec<u8>, AgentError>;
}

/// Payload that can be populated from a provider's raw response body.
pub trait Responser: Sized {
    /// Parses the raw bytes of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Decode`] on malformed or mismatched JSON.
    fn unmarshal(bytes: &[u8]) -> Result<Self, AgentError>;
}

pub(crate) fn marshal_json<T: Serialize>(value: &T) -> Result<Vec<u8>, AgentError> {
    serde_json::to_vec(value)
        .map_err(|err| AgentError::invalid_input(format!("failed to serialize request: {err}")))
}

pub(crate) fn unmarshal_json<T: DeserializeOwned>(
    provider: &'static str,
    bytes: &[u8],
) -> Result<T, AgentError> {
    serde_json::from_slice(bytes)
        .map_err(|err| AgentError::decode(provider, format!("failed to unmarshal response: {err}")))
}

/// Chat role string shared by the role-bearing providers.
///
/// Roles are kept as open strings because providers accept values beyond the three
/// constructors below; an empty role is replaced with `user` before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);

impl Role {
    pub fn system() -> Self {
        Self("system".to_string())
    }

    pub fn user() -> Self {
        Self("user".to_string())
    }

    pub fn assistant() -> Self {
        Self("assistant".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One concrete provider request.
#[derive(Debug, Clone, PartialEq)]
pub enum TextRequest {
    /// OpenAI Responses text input.
    ChatGpt(chatgpt::TextInputRequest),
    /// OpenAI Responses multimodal input with image parts.
    ChatGptImage(chatgpt::ImageInputRequest),
    /// OpenAI Responses multimodal input with file parts.
    ChatGptFile(chatgpt::FileInputRequest),
    /// Anthropic Messages request.
    Claude(claude::TextInputRequest),
    /// DeepSeek chat completion request.
    DeepSeek(deepseek::TextInputRequest),
}

impl TextRequest {
    /// Provider able to serve this payload.
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::ChatGpt(_) | Self::ChatGptImage(_) | Self::ChatGptFile(_) => {
                ProviderKind::ChatGpt
            }
            Self::Claude(_) => ProviderKind::Claude,
            Self::DeepSeek(_) => ProviderKind::DeepSeek,
        }
    }
}

impl Requester for TextRequest {
    fn marshal(&self) -> Result<Vec<u8>, AgentError> {
        match self {
            Self::ChatGpt(request) => request.marshal(),
            Self::ChatGptImage(request) => request.marshal(),
            Self::ChatGptFile(request) => request.marshal(),
            Self::Claude(request) => request.marshal(),
            Self::DeepSeek(request) => request.marshal(),
        }
    }
}

impl From<chatgpt::TextInputRequest> for TextRequest {
    fn from(value: chatgpt::TextInputRequest) -> Self {
        Self::ChatGpt(value)
    }
}

impl From<chatgpt::ImageInputRequest> for TextRequest {
    fn from(value: chatgpt::ImageInputRequest) -> Self {
        Self::ChatGptImage(value)
    }
}

impl From<chatgpt::FileInputRequest> for TextRequest {
    fn from(value: chatgpt::FileInputRequest) -> Self {
        Self::ChatGptFile(value)
    }
}

impl From<claude::TextInputRequest> for TextRequest {
    fn from(value: claude::TextInputRequest) -> Self {
        Self::Claude(value)
    }
}

impl From<deepseek::TextInputRequest> for TextRequest {
    fn from(value: deepseek::TextInputRequest) -> Self {
        Self::DeepSeek(value)
    }
}

/// Request envelope handed to [`crate::provider::AiAgent::ask_ai`].
///
/// # Examples
///
/// ```
/// use askai::provider::deepseek::{TextInputMessage, TextInputRequest};
/// use askai::types::{Request, Role};
///
/// let request = Request::new(TextInputRequest {
///     messages: vec![TextInputMessage {
///         role: Role::user(),
///         content: "Hey, this is a test message".into(),
///     }],
///     ..Default::default()
/// });
/// assert!(!request.is_empty());
/// assert!(Request::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    /// Wrapped provider payload; `None` is an empty envelope.
    pub text_request: Option<TextRequest>,
}

impl Request {
    pub fn new(payload: impl Into<TextRequest>) -> Self {
        Self {
            text_request: Some(payload.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text_request.is_none()
    }

    /// Takes the payload out, failing on an empty envelope.
    pub(crate) fn into_payload(self) -> Result<TextRequest, AgentError> {
        self.text_request
            .ok_or_else(|| AgentError::invalid_input("empty request envelope"))
    }
}

/// One concrete provider response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextResponse {
    ChatGpt(chatgpt::TextInputResponse),
    Claude(claude::TextInputResponse),
    DeepSeek(deepseek::TextInputResponse),
}

impl TextResponse {
    /// Provider that produced this payload.
    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::ChatGpt(_) => ProviderKind::ChatGpt,
            Self::Claude(_) => ProviderKind::Claude,
            Self::DeepSeek(_) => ProviderKind::DeepSeek,
        }
    }

    /// Text segments of the answer in the order the provider returned them.
    pub fn output_segments(&self) -> Vec<&str> {
        match self {
            Self::ChatGpt(response) => response
                .output
                .iter()
                .flat_map(|item| item.content.iter())
                .filter(|part| part.kind == "output_text")
                .map(|part| part.text.as_str())
                .collect(),
            Self::Claude(response) => response
                .content
                .iter()
                .filter(|block| block.kind == "text")
                .map(|block| block.text.as_str())
                .collect(),
            Self::DeepSeek(response) => response
                .choices
                .iter()
                .filter_map(|choice| choice.message.content.as_deref())
                .collect(),
        }
    }

    /// All text segments joined by newlines, or `None` when the answer has no text.
    pub fn output_text(&self) -> Option<String> {
        let segments: Vec<&str> = self
            .output_segments()
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(segments.join("\n"))
        }
    }
}

/// Response envelope returned by [`crate::provider::AiAgent::ask_ai`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub text_response: TextResponse,
}

impl Response {
    pub fn new(payload: TextResponse) -> Self {
        Self {
            text_response: payload,
        }
    }

    /// Shortcut for [`TextResponse::output_text`].
    pub fn text(&self) -> Option<String> {
        self.text_response.output_text()
    }

    pub fn as_chatgpt(&self) -> Option<&chatgpt::TextInputResponse> {
        match &self.text_response {
            TextResponse::ChatGpt(response) => Some(response),
            _ => None,
        }
    }

    pub fn as_claude(&self) -> Option<&claude::TextInputResponse> {
        match &self.text_response {
            TextResponse::Claude(response) => Some(response),
            _ => None,
        }
    }

    pub fn as_deepseek(&self) -> Option<&deepseek::TextInputResponse> {
        match &self.text_response {
            TextResponse::DeepSeek(response) => Some(response),
            _ => None,
        }
    }
}
