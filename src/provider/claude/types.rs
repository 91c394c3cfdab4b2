use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::types::{Requester, Responser, Role, marshal_json, unmarshal_json};

pub const MODEL_CLAUDE_SONNET_4_20250514: &str = "claude-sonnet-4-20250514";

/// Model sent when the request leaves `model` empty.
pub const DEFAULT_MODEL: &str = MODEL_CLAUDE_SONNET_4_20250514;

/// Output budget sent when the request leaves `max_tokens` unset or zero.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Anthropic Messages request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInputRequest {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub messages: Vec<TextInputMessage>,
    /// Top-level system prompt; Messages has no `system` role inside `messages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputMessage {
    pub role: Role,
    pub content: String,
}

impl Requester for TextInputRequest {
    fn marshal(&self) -> Result<Vec<u8>, AgentError> {
        marshal_json(self)
    }
}

/// Non-streaming Messages response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInputResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub role: Role,
    pub model: String,
    /// Ordered content blocks; text answers arrive as `text` blocks.
    pub content: Vec<ResponseContent>,
    pub stop_reason: Option<String>,
    pub stop_sequence: Option<String>,
    pub usage: ResponseUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseUsage {
    pub input_tokens: u64,
    pub cache_creation_input_tokens: Option<u64>,
    pub cache_read_input_tokens: Option<u64>,
    pub cache_creation: Option<CacheCreation>,
    pub output_tokens: u64,
    pub service_tier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheCreation {
    pub ephemeral_5m_input_tokens: u64,
    pub ephemeral_1h_input_tokens: u64,
}

impl Responser for TextInputResponse {
    fn unmarshal(bytes: &[u8]) -> Result<Self, AgentError> {
        unmarshal_json("claude", bytes)
    }
}
