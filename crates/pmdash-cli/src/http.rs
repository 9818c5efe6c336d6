use std::time::Duration;

use anyhow::Context;
use pmdash_core::{ApiRequest, ApiResponse, HttpBackend, Method, TransportError};
use tracing::{debug, warn};

/// `HttpBackend` over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("pmdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed building HTTP client")?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest(request.method), request.url.as_str());
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(url = %request.url, error = %error, "request failed");
            TransportError(error.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|error| {
            warn!(url = %request.url, error = %error, "failed reading response body");
            TransportError(error.to_string())
        })?;
        debug!(url = %request.url, status, size = body.len(), "response received");

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
