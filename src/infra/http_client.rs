use crate::app::ports::PageFetcher;
use crate::error::{RefreshError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Single-attempt GET over a shared reqwest client. No retries, no custom headers.
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for ReqwestHttp {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::info!("HTTP GET request to: {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RefreshError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        tracing::debug!(
            "HTTP response: status={}, size={} bytes",
            status.as_u16(),
            body.len()
        );
        Ok(body)
    }
}
