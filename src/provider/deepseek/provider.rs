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

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for DeepSeek chat completions.
pub struct DeepSeekClient {
    pub(crate) transport: DynHttpTransport,
    pub(crate) api_token: String,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl DeepSeekClient {
    pub fn new(transport: DynHttpTransport, api_token: impl Into<String>) -> Self {
        Self {
            transport,
            api_token: api_token.into(),
            endpoint: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

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
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_token),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }
}

#[async_trait]
impl AiAgent for DeepSeekClient {
    async fn ask_ai(&self, request: Request) -> Result<Response, AgentError> {
        let payload = prepare_request(request)?;
        let endpoint = self.endpoint();
        debug!(provider = "deepseek", endpoint, model = %payload.model, "sending request");

        let response = post_json_with_headers(
            self.transport.as_ref(),
            endpoint,
            self.build_headers(),
            self.timeout,
            &payload,
        )
        .await?;
        if !response.is_success() {
            warn!(provider = "deepseek", status = response.status, "upstream rejected request");
        }
        let body = response.into_success_body()?;

        let parsed = TextInputResponse::unmarshal(&body)?;
        Ok(Response::new(TextResponse::DeepSeek(parsed)))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DeepSeek
    }
}
