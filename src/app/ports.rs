use crate::error::Result;
use async_trait::async_trait;

// Fetch-side port; the refresher only ever needs the page body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` once and return the body of a 2xx response.
    async fn fetch(&self, url: &str) -> Result<String>;
}
