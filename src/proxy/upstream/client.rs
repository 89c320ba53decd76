// Upstream client implementation
// reqwest-backed `Upstream`, one client shared by every request

use async_trait::async_trait;
use reqwest::Client;

use super::{TransportError, Upstream, UpstreamRequest, UpstreamResponse};
use crate::proxy::config::UpstreamProxyConfig;

pub struct UpstreamClient {
    http_client: Client,
}

impl UpstreamClient {
    pub fn new(timeout_secs: u64, proxy_config: Option<UpstreamProxyConfig>) -> Self {
        let http_client = crate::utils::http::create_client_with_proxy(timeout_secs, proxy_config);
        Self { http_client }
    }
}

#[async_trait]
impl Upstream for UpstreamClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        tracing::debug!("Upstream {} {}", request.method, request.url.path());

        let mut builder = self
            .http_client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        // The body stream is single-use; buffer it once and hand out the bytes.
        let body = response.bytes().await?;

        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }
}
