use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{AppError, Context};

use super::{FetchResult, PreparedRequest};

/// Status line and body of a completed request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes prepared requests. Shared read-only across pool workers.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &PreparedRequest) -> FetchResult<TransportResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to construct HTTP client")?;
        Ok(Self { client })
    }

    pub fn from_config(provider: &ProviderConfig) -> FetchResult<Self> {
        Self::new(Duration::from_secs(provider.timeout_secs))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &PreparedRequest) -> FetchResult<TransportResponse> {
        let transport_error = |err: reqwest::Error| AppError::Transport {
            url: request.url.clone(),
            reason: err.to_string(),
        };

        let response = self
            .client
            .get(&request.url)
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(TransportResponse { status, body })
    }
}
