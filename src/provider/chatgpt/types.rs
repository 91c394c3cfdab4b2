use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AgentError;
use crate::types::{Requester, Responser, Role, marshal_json, unmarshal_json};

pub const MODEL_GPT_3_5_TURBO_0301: &str = "gpt-3.5-turbo-0301";
pub const MODEL_GPT_3_5_TURBO_1106: &str = "gpt-3.5-turbo-1106";
pub const MODEL_GPT_3_5_TURBO: &str = "gpt-3.5-turbo";
pub const MODEL_GPT_4O: &str = "gpt-4o";
pub const MODEL_GPT_4_1: &str = "gpt-4.1";
pub const MODEL_GPT_4O_MINI: &str = "gpt-4o-mini";
pub const MODEL_GPT_4_TURBO: &str = "gpt-4-turbo";
pub const MODEL_TTS_1: &str = "tts-1";
pub const MODEL_TTS_1_HD: &str = "tts-1-hd";

/// Model sent when the request leaves `model` empty.
pub const DEFAULT_MODEL: &str = MODEL_GPT_4_1;

/// Plain text prompt for the Responses API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInputRequest {
    pub model: String,
    pub input: String,
    /// System-level instructions inserted ahead of the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

/// Content part of an image input message (`input_text` or `input_image`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInputContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInputMessage {
    pub role: Role,
    pub content: Vec<ImageInputContent>,
}

/// Multimodal prompt mixing text and image URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInputRequest {
    pub model: String,
    pub input: Vec<ImageInputMessage>,
}

/// Content part of a file input message (`input_text` or `input_file`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInputContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInputMessage {
    pub role: Role,
    pub content: Vec<FileInputContent>,
}

/// Multimodal prompt mixing text and remote files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInputRequest {
    pub model: String,
    pub input: Vec<FileInputMessage>,
}

impl Requester for TextInputRequest {
    fn marshal(&self) -> Result<Vec<u8>, AgentError> {
        marshal_json(self)
    }
}

impl Requester for ImageInputRequest {
    fn marshal(&self) -> Result<Vec<u8>, AgentError> {
        marshal_json(self)
    }
}

impl Requester for FileInputRequest {
    fn marshal(&self) -> Result<Vec<u8>, AgentError> {
        marshal_json(self)
    }
}

/// Non-streaming Responses API body.
///
/// The same shape is returned for text, image and file input; fields that only some
/// of them carry stay optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInputResponse {
    pub id: String,
    pub object: String,
    pub created_at: u64,
    pub status: String,
    pub background: Option<bool>,
    pub error: Option<Value>,
    pub incomplete_details: Option<Value>,
    pub instructions: Option<Value>,
    pub max_output_tokens: Option<u64>,
    pub max_tool_calls: Option<u64>,
    pub model: String,
    pub output: Vec<ResponseOutput>,
    pub parallel_tool_calls: bool,
    pub previous_response_id: Option<String>,
    pub reasoning: Option<ResponseReasoning>,
    pub service_tier: Option<String>,
    pub store: bool,
    pub temperature: Option<f64>,
    pub text: Option<ResponseText>,
    pub tool_choice: Option<Value>,
    pub tools: Vec<Value>,
    pub top_logprobs: Option<u32>,
    pub top_p: Option<f64>,
    pub truncation: Option<String>,
    pub usage: Option<ResponseUsage>,
    pub user: Option<Value>,
    pub metadata: Option<Value>,
}

/// One output item, usually a `message` carrying `output_text` parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseOutput {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub status: Option<String>,
    pub role: Option<Role>,
    pub content: Vec<ResponseOutputContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseOutputContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub annotations: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseReasoning {
    pub effort: Option<Value>,
    pub summary: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseText {
    pub format: ResponseTextFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTextFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseUsage {
    pub input_tokens: u64,
    pub input_tokens_details: InputTokensDetails,
    pub output_tokens: u64,
    pub output_tokens_details: OutputTokensDetails,
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTokensDetails {
    pub cached_tokens: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputTokensDetails {
    pub reasoning_tokens: u64,
}

impl Responser for TextInputResponse {
    fn unmarshal(bytes: &[u8]) -> Result<Self, AgentError> {
        unmarshal_json("chatgpt", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_request_round_trips() {
        let request = TextInputRequest {
            model: MODEL_GPT_4O_MINI.to_string(),
            input: "Hey, this is a test message".to_string(),
            instructions: Some("Answer in one sentence.".to_string()),
            max_output_tokens: Some(64),
            temperature: Some(0.5),
            top_p: Some(0.9),
        };

        let bytes = request.marshal().expect("marshal");
        let parsed: TextInputRequest = serde_json::from_slice(&bytes).expect("parse");
        assert_eq!(parsed, request);
    }

    #[test]
    fn unset_options_are_omitted_from_the_wire() {
        let request = TextInputRequest {
            model: MODEL_GPT_4_1.to_string(),
            input: "hi".to_string(),
            ..Default::default()
        };
        let value: Value = serde_json::from_slice(&request.marshal().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "model": "gpt-4.1", "input": "hi" }));
    }

    #[test]
    fn image_request_round_trips() {
        let request = ImageInputRequest {
            model: MODEL_GPT_4O.to_string(),
            input: vec![ImageInputMessage {
                role: Role::user(),
                content: vec![
                    ImageInputContent {
                        kind: "input_text".to_string(),
                        text: Some("what is in this image?".to_string()),
                        image_url: None,
                    },
                    ImageInputContent {
                        kind: "input_image".to_string(),
                        text: None,
                        image_url: Some("https://example.com/cat.png".to_string()),
                    },
                ],
            }],
        };

        let bytes = request.marshal().expect("marshal");
        let parsed: ImageInputRequest = serde_json::from_slice(&bytes).expect("parse");
        assert_eq!(parsed, request);
    }

    #[test]
    fn file_request_round_trips() {
        let request = FileInputRequest {
            model: MODEL_GPT_4_1.to_string(),
            input: vec![FileInputMessage {
                role: Role::user(),
                content: vec![
                    FileInputContent {
                        kind: "input_file".to_string(),
                        text: None,
                        file_url: Some("https://example.com/letter.pdf".to_string()),
                    },
                    FileInputContent {
                        kind: "input_text".to_string(),
                        text: Some("Summarize this letter.".to_string()),
                        file_url: None,
                    },
                ],
            }],
        };

        let bytes = request.marshal().expect("marshal");
        let value: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(
            value["input"][0]["content"][0],
            serde_json::json!({ "type": "input_file", "file_url": "https://example.com/letter.pdf" })
        );
        let parsed: FileInputRequest = serde_json::from_slice(&bytes).expect("parse");
        assert_eq!(parsed, request);
    }

    #[test]
    fn response_sample_is_decoded() {
        let body = br#"{
  "id": "resp_67ccd2bed1ec8190b14f964abc0542670bb6a6b452d3795b",
  "object": "response",
  "created_at": 1741476542,
  "status": "completed",
  "error": null,
  "incomplete_details": null,
  "instructions": null,
  "max_output_tokens": null,
  "model": "gpt-4.1-2025-04-14",
  "output": [
    {
      "type": "message",
      "id": "msg_67ccd2bf17f0819081ff3bb2cf6508e60bb6a6b452d3795b",
      "status": "completed",
      "role": "assistant",
      "content": [
        {
          "type": "output_text",
          "text": "In a peaceful grove beneath a silver moon...",
          "annotations": []
        }
      ]
    }
  ],
  "parallel_tool_calls": true,
  "previous_response_id": null,
  "reasoning": { "effort": null, "summary": null },
  "store": true,
  "temperature": 1.0,
  "text": { "format": { "type": "text" } },
  "tool_choice": "auto",
  "tools": [],
  "top_p": 1.0,
  "truncation": "disabled",
  "usage": {
    "input_tokens": 36,
    "input_tokens_details": { "cached_tokens": 0 },
    "output_tokens": 87,
    "output_tokens_details": { "reasoning_tokens": 0 },
    "total_tokens": 123
  },
  "user": null,
  "metadata": {}
}"#;

        let response = TextInputResponse::unmarshal(body).expect("decode");
        assert_eq!(response.status, "completed");
        assert_eq!(response.model, "gpt-4.1-2025-04-14");
        assert_eq!(response.output.len(), 1);
        assert_eq!(response.output[0].role, Some(Role::assistant()));
        assert_eq!(response.output[0].content[0].kind, "output_text");
        assert_eq!(
            response.text.as_ref().map(|text| text.format.kind.as_str()),
            Some("text")
        );
        let usage = response.usage.expect("usage");
        assert_eq!(usage.total_tokens, 123);
        assert_eq!(usage.input_tokens_details.cached_tokens, 0);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = TextInputResponse::unmarshal(b"<html>bad gateway</html>").expect_err("decode");
        match err {
            AgentError::Decode { provider, .. } => assert_eq!(provider, "chatgpt"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
