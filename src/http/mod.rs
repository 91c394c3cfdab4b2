use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::types::Requester;

/// Minimal JSON POST request shared across providers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Builds a POST request with a JSON request body.
    ///
    /// The helper sets the `Content-Type` header to `application/json` and stores the
    /// provided buffer as the body.
    ///
    /// # Examples
    ///
    /// ```
    /// use askai::http::HttpRequest;
    ///
    /// let request = HttpRequest::post_json("https://example.com", br"{}".to_vec());
    /// assert_eq!(request.headers.get("Content-Type"), Some(&"application/json".to_string()));
    /// ```
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
            body: Some(body),
            timeout: None,
        }
    }

    /// Replaces the request headers after construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use askai::http::HttpRequest;
    ///
    /// let request = HttpRequest::post_json("https://example.com", br"{}".to_vec())
    ///     .with_headers(HashMap::from([("Authorization".into(), "Bearer test".into())]));
    /// assert_eq!(request.headers.get("Authorization"), Some(&"Bearer test".to_string()));
    /// ```
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the client-side timeout for this single exchange.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Minimal HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns `true` for statuses in `200..300`.
    ///
    /// # Examples
    ///
    /// ```
    /// use askai::http::HttpResponse;
    ///
    /// let ok = HttpResponse { status: 204, body: Vec::new() };
    /// assert!(ok.is_success());
    /// let missing = HttpResponse { status: 404, body: Vec::new() };
    /// assert!(!missing.is_success());
    /// ```
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body when the status is 2xx, otherwise an [`AgentError::Upstream`]
    /// carrying the status and the raw body text.
    pub fn into_success_body(self) -> Result<Vec<u8>, AgentError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(AgentError::Upstream {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }
}

/// Transport abstraction used to decouple providers from the concrete HTTP client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a POST request and resolves when the full response body has been read.
    ///
    /// # Examples
    ///
    /// ```
    /// # use async_trait::async_trait;
    /// # use askai::http::{HttpTransport, HttpRequest, HttpResponse};
    /// # use askai::error::AgentError;
    /// struct MemoryTransport;
    ///
    /// #[async_trait]
    /// impl HttpTransport for MemoryTransport {
    ///     async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AgentError> {
    ///         Ok(HttpResponse { status: 200, body: request.body.unwrap_or_default() })
    ///     }
    /// }
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let response = MemoryTransport
    ///     .send(HttpRequest::post_json("https://example.com", br"{}".to_vec()))
    ///     .await
    ///     .unwrap();
    /// assert_eq!(response.status, 200);
    /// # });
    /// ```
    ///
    /// # Errors
    ///
    /// Implementations map connection failures, timeouts and body read failures to
    /// [`AgentError::Network`]. Non-2xx statuses are not errors at this layer.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AgentError>;
}

/// Thread-safe handle to a transport implementation.
pub type DynHttpTransport = Arc<dyn HttpTransport>;

/// Marshals a payload, attaches headers and a timeout, and issues a POST request.
///
/// Every provider goes through this helper so serialization failures surface as
/// [`AgentError::InvalidInput`] before anything touches the network.
///
/// # Errors
///
/// Returns the error produced by [`Requester::marshal`] or forwards the error raised
/// by [`HttpTransport::send`].
pub async fn post_json_with_headers<R: Requester + ?Sized>(
    transport: &dyn HttpTransport,
    url: impl Into<String>,
    headers: HashMap<String, String>,
    timeout: Duration,
    body: &R,
) -> Result<HttpResponse, AgentError> {
    let payload = body.marshal()?;
    let request = HttpRequest::post_json(url, payload)
        .with_headers(headers)
        .with_timeout(timeout);
    transport.send(request).await
}

pub mod reqwest;
