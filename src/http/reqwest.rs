use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AgentError;

use super::{DynHttpTransport, HttpRequest, HttpResponse, HttpTransport};

/// Default [`HttpTransport`] backed by reqwest.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wraps a caller-configured `reqwest::Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a transport with reqwest's default client settings.
    pub fn default_client() -> Result<Self, AgentError> {
        Client::builder()
            .build()
            .map(Self::new)
            .map_err(|err| AgentError::network(format!("failed to create reqwest client: {err}")))
    }

    fn build_request(&self, mut request: HttpRequest) -> Result<reqwest::RequestBuilder, AgentError> {
        let mut builder = self.client.post(&request.url);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        for (name, value) in request.headers.drain() {
            let header_name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| AgentError::invalid_input(format!("invalid header name: {err}")))?;
            let header_value = reqwest::header::HeaderValue::from_str(&value).map_err(|err| {
                AgentError::invalid_input(format!("invalid header value for {header_name}: {err}"))
            })?;
            builder = builder.header(header_name, header_value);
        }

        if let Some(body) = request.body.take() {
            builder = builder.body(body);
        }

        Ok(builder)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AgentError> {
        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(|err| AgentError::network(format!("do request: {err}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| AgentError::network(format!("read response: {err}")))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Builds a thread-safe reqwest transport with default settings.
pub fn default_dyn_transport() -> Result<DynHttpTransport, AgentError> {
    Ok(Arc::new(ReqwestTransport::default_client()?))
}
