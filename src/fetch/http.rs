use super::PageSource;
use crate::error::FetchError;
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use rquest::{Client as RquestClient, Impersonate};
use std::str::FromStr;
use std::time::Duration;

/// Applied when the caller configures no timeout; a fetch must never hang
/// indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Plain HTTP page source: fetches markup directly, no script execution.
pub struct HttpSource {
    inner: RquestClient,
    timeout: Duration,
}

pub struct HttpSourceBuilder {
    timeout: Duration,
    chrome_impersonation: bool,
    headers: HeaderMap,
}

impl HttpSource {
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::new()
    }
}

impl Default for HttpSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSourceBuilder {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            chrome_impersonation: false,
            headers: HeaderMap::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn chrome_impersonation(mut self, enabled: bool) -> Self {
        self.chrome_impersonation = enabled;
        self
    }

    pub fn header<K, V>(mut self, key: K, value: V) -> Result<Self, FetchError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let header_name = HeaderName::from_str(key.as_ref())
            .map_err(|e| FetchError::Client(format!("Invalid header name: {}", e)))?;

        let header_value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| FetchError::Client(format!("Invalid header value: {}", e)))?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn build(self) -> Result<HttpSource, FetchError> {
        let mut client_builder = RquestClient::builder().timeout(self.timeout);

        if self.chrome_impersonation {
            client_builder = client_builder.impersonate(Impersonate::Chrome131);
        }

        let mut inner = client_builder
            .build()
            .map_err(|e| FetchError::Client(format!("Failed to build client: {}", e)))?;

        // Set the headers on the client
        *inner.as_mut().headers() = self.headers;

        Ok(HttpSource {
            inner,
            timeout: self.timeout,
        })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.inner.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout.as_secs())
            } else {
                FetchError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Request(format!("Failed to read response body: {}", e)))
    }
}
