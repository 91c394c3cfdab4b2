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

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the OpenAI Responses API.
///
/// # Examples
///
/// ```
/// # use askai::provider::chatgpt::ChatGptClient;
/// # use askai::provider::AiAgent;
/// # use askai::config::ProviderKind;
/// # use askai::http::reqwest::default_dyn_transport;
/// let transport = default_dyn_transport().expect("transport");
/// let client = ChatGptClient::new(transport, "sk-test");
/// assert_eq!(client.kind(), ProviderKind::ChatGpt);
/// assert_eq!(client.endpoint(), "https://api.openai.com/v1/responses");
/// ```
pub struct ChatGptClient {
    pub(crate) transport: DynHttpTransport,
    pub(crate) api_token: String,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl ChatGptClient {
    pub fn new(transport: DynHttpTransport, api_token: impl Into<String>) -> Self {
        Self {
            transport,
            api_token: api_token.into(),
            endpoint: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the endpoint; an empty value keeps the public default.
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
impl AiAgent for ChatGptClient {
    async fn ask_ai(&self, request: Request) -> Result<Response, AgentError> {
        let payload = prepare_request(request)?;
        let endpoint = self.endpoint();
        debug!(provider = "chatgpt", endpoint, "sending request");

        let response = post_json_with_headers(
            self.transport.as_ref(),
            endpoint,
            self.build_headers(),
            self.timeout,
            &payload,
        )
        .await?;
        if !response.is_success() {
            warn!(provider = "chatgpt", status = response.status, "upstream rejected request");
        }
        let body = response.into_success_body()?;

        let parsed = TextInputResponse::unmarshal(&body)?;
        debug!(provider = "chatgpt", id = %parsed.id, "response decoded");
        Ok(Response::new(TextResponse::ChatGpt(parsed)))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::ChatGpt
    }
}
