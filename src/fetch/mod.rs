mod browser;
mod http;

pub use browser::BrowserSource;
pub use http::HttpSource;

use crate::error::FetchError;
use async_trait::async_trait;

/// A page source: given a URL, returns the page's serialized markup or
/// fails. Implementations own whatever resources they need (HTTP client,
/// browser process) and must release them on every exit path before
/// returning.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
