use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::ProviderKind;
use crate::error::AgentError;
use crate::http::{DynHttpTransport, post_json_with_headers};
use crate::provider::{AiAgent, resolve_endpoint};
use crate::types::{Request, Response, Responser, TextResponse};

use super::request::prepare_request;
use super::types::TextInputResponse;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
pub struct ClaudeClient {
    pub(crate) transport: DynHttpTransport,
    pub(crate) api_token: String,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl ClaudeClient {
    pub fn new(transport: DynHttpTransport, api_token: impl Into<String>) -> Self {
        Self {
            transport,
            api_token: api_token.into(),
            endpoint: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the endpoint, e.g. for a proxy; empty keeps the public default.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        resolve_endpoint(&self.endpoint, DEFAULT_ENDPOINT)
    }

    fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("x-api-key".to_string(), self.api_token.clone());
        headers.insert("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }
}

#[async_trait]
impl AiAgent for ClaudeClient {
    async fn ask_ai(&self, request: Request) -> Result<Response, AgentError> {
        let payload = prepare_request(request)?;
        let endpoint = self.endpoint();
        debug!(
            provider = "claude",
            endpoint,
            model = %payload.model,
            messages = payload.messages.len(),
            "sending request"
        );

        let response = post_json_with_headers(
            self.transport.as_ref(),
            endpoint,
            self.build_headers(),
            self.timeout,
            &payload,
        )
        .await?;
        if !response.is_success() {
            warn!(provider = "claude", status = response.status, "upstream rejected request");
        }
        let body = response.into_success_body()?;

        let parsed = TextInputResponse::unmarshal(&body)?;
        Ok(Response::new(TextResponse::Claude(parsed)))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }
}
