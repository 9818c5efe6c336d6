use gloo::net::http::{Request, RequestBuilder};
use pmdash_core::{ApiRequest, ApiResponse, HttpBackend, Method, TransportError};

/// `HttpBackend` over the browser's fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooBackend;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

impl HttpBackend for GlooBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let builder = builder(request.method, &request.url);
        let sent = match request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(js_sys::Uint8Array::from(body.as_slice()))
                .map_err(|e| TransportError(format!("failed to build request: {e}")))?
                .send()
                .await,
            None => builder.send().await,
        };
        let response = sent.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| TransportError(format!("failed to read body: {e}")))?;
        Ok(ApiResponse { status, body })
    }
}
