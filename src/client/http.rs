use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use super::traits::{ApiRequest, ApiResponse, Transport, TransportError};

/// reqwest-backed transport holding the one long-lived session
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTransport {
    /// Build a session rooted at `base_url` + `api_prefix`.
    ///
    /// Every request carries `Content-Type` and `Accept` set to JSON. When
    /// `timeout` is `None` reqwest's defaults apply.
    pub fn new(
        base_url: &str,
        api_prefix: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_base: join_url(base_url, api_prefix),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        log::debug!("{} {}", request.method, self.url(&request.path));

        let mut req = self
            .client
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        let headers = res.headers().clone();
        let body = res.text().await?;

        log::debug!("{} -> {} ({} bytes)", request.display(), status, body.len());

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    fn endpoint(&self) -> String {
        self.api_base.clone()
    }
}

/// Join two URL fragments with exactly one `/` between them
fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
