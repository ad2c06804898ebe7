//! HTTP session used by every test case.
//!
//! Cases talk to an [`ApiClient`]; the wire work sits behind the
//! [`Transport`] trait so the suite can run against reqwest or a scripted
//! stand-in.

#[cfg(test)]
pub mod fake;
pub mod http;
pub mod traits;

pub use http::HttpTransport;
pub use traits::{ApiRequest, ApiResponse, Transport, TransportError};

use reqwest::Method;
use serde_json::Value;

/// Shared session handed to each case by reference
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn endpoint(&self) -> String {
        self.transport.endpoint()
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let display = request.display();
        self.transport.send(request).await.map_err(|e| {
            log::debug!("{} failed: {}", display, e);
            e
        })
    }

    /// GET with query parameters
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, TransportError> {
        let mut request = ApiRequest::new(Method::GET, path);
        for (k, v) in query {
            request = request.query(k, v);
        }
        self.send(request).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        self.send(ApiRequest::new(Method::POST, path).json(body))
            .await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, TransportError> {
        self.send(ApiRequest::new(Method::PUT, path).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(ApiRequest::new(Method::DELETE, path)).await
    }

    pub async fn options(&self, path: &str) -> Result<ApiResponse, TransportError> {
        self.send(ApiRequest::new(Method::OPTIONS, path)).await
    }
}
