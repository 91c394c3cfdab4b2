#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use askai::error::AgentError;
use askai::http::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use serde_json::Value;

/// Transport answering every request with a fixed status and body while recording
/// what was sent.
pub struct MockTransport {
    status: u16,
    body: Vec<u8>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.as_bytes().to_vec(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request sent so far.
    pub fn only_request(&self) -> HttpRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    /// Body of the single request parsed as JSON.
    pub fn only_body(&self) -> Value {
        let request = self.only_request();
        serde_json::from_slice(&request.body.expect("request body")).expect("json body")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, AgentError> {
        self.requests.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Transport that fails like a dropped connection.
pub struct UnreachableTransport;

#[async_trait]
impl HttpTransport for UnreachableTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, AgentError> {
        Err(AgentError::network("do request: connection refused"))
    }
}

pub const NOT_FOUND_BODY: &str = r#"{"error":"not found"}"#;
