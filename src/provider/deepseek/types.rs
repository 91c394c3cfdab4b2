use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AgentError;
use crate::types::{Requester, Responser, Role, marshal_json, unmarshal_json};

pub const MODEL_DEEPSEEK_CHAT: &str = "deepseek-chat";
pub const MODEL_DEEPSEEK_REASONER: &str = "deepseek-reasoner";

/// Model sent when the request leaves `model` empty.
pub const DEFAULT_MODEL: &str = MODEL_DEEPSEEK_CHAT;

/// DeepSeek chat completion request (OpenAI-compatible shape, non-streaming).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInputRequest {
    pub messages: Vec<TextInputMessage>,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    /// A single stop string or a list of them, forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInputMessage {
    pub content: String,
    pub role: Role,
}

/// `{"type": "text"}` or `{"type": "json_object"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

impl Requester for TextInputRequest {
    fn marshal(&self) -> Result<Vec<u8>, AgentError> {
        marshal_json(self)
    }
}

/// Non-streaming chat completion response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInputResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ResponseChoice>,
    pub usage: Option<ResponseUsage>,
    pub system_fingerprint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseChoice {
    pub index: u32,
    pub message: ResponseChoiceMessage,
    pub logprobs: Option<Value>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseChoiceMessage {
    pub role: Role,
    /// `null` when the model answers with tool calls only.
    pub content: Option<String>,
    /// Chain of thought returned by `deepseek-reasoner`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub prompt_tokens_details: PromptTokensDetails,
    pub prompt_cache_hit_tokens: u64,
    pub prompt_cache_miss_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTokensDetails {
    pub cached_tokens: u64,
}

impl Responser for TextInputResponse {
    fn unmarshal(bytes: &[u8]) -> Result<Self, AgentError> {
        unmarshal_json("deepseek", bytes)
    }
}
